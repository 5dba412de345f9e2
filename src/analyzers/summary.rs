//! Per-group model fitting and summary extraction.

use tracing::warn;

use crate::analyzers::model::LinearFit;
use crate::analyzers::nest::Group;
use crate::analyzers::types::TrendSummary;

/// The (year, value) points of one metric within a group, in year order.
/// Rows where the metric is missing contribute no point.
pub fn metric_points(group: &Group, metric: &str) -> Vec<(f64, f64)> {
    group
        .rows
        .iter()
        .filter_map(|row| row.value(metric).map(|v| (row.year as f64, v)))
        .collect()
}

/// Fits `metric ~ year` for every group and extracts one summary row each.
///
/// Groups that cannot be fit (fewer than 2 distinct years with the metric
/// observed) are kept as explicit null rows rather than dropped, so the
/// summary table always has exactly one row per group.
pub fn summarize(groups: &[Group], metric: &str) -> Vec<TrendSummary> {
    groups
        .iter()
        .map(|group| {
            let points = metric_points(group, metric);
            match LinearFit::fit(&points) {
                Ok(fit) => TrendSummary::from_fit(&group.key, &fit),
                Err(e) => {
                    warn!(country = %group.key.country, metric, error = %e, "Group not modeled");
                    TrendSummary::from_error(&group.key, points.len(), &e)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::nest::nest;
    use crate::parser::Observation;
    use crate::table::{LIFE_EXP, WideTable};

    fn obs(country: &str, year: i32, life_exp: f64) -> Observation {
        Observation {
            country: country.to_string(),
            continent: "Europe".to_string(),
            year,
            life_exp,
            pop: 1000.0,
            gdp_per_cap: 500.0,
        }
    }

    #[test]
    fn test_summarize_exact_trend() {
        // lifeExp = 50 + 0.5 * (year - 1952)
        let base: Vec<Observation> = (0..4)
            .map(|i| obs("Linearia", 1952 + 5 * i, 50.0 + 2.5 * i as f64))
            .collect();
        let groups = nest(&WideTable::merge(&base, &[]));
        let summaries = summarize(&groups, LIFE_EXP);

        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.n_obs, 4);
        assert!((s.r_squared.unwrap() - 1.0).abs() < 1e-12);
        assert!((s.slope.unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(s.grade.as_deref(), Some("A+"));
        assert!(s.error.is_none());
    }

    #[test]
    fn test_summarize_single_year_group_is_null_row() {
        let base = vec![obs("Lonely", 1952, 40.0)];
        let groups = nest(&WideTable::merge(&base, &[]));
        let summaries = summarize(&groups, LIFE_EXP);

        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert!(!s.is_fit());
        assert_eq!(s.n_obs, 1);
        assert!(s.grade.is_none());
        assert!(s.error.as_deref().unwrap().contains("distinct"));
    }

    #[test]
    fn test_metric_points_skip_missing_cells() {
        // The aux sheet covers 1952 only, so the 1957 row has no "cells"
        // value and contributes no point for that metric.
        let base = vec![obs("Norway", 1952, 72.0), obs("Norway", 1957, 73.0)];
        let aux = crate::table::LongTable {
            variable: "cells".to_string(),
            rows: vec![crate::table::LongRow {
                country: "Norway".to_string(),
                year: 1952,
                value: 9.0,
            }],
        };
        let groups = nest(&WideTable::merge(&base, &[aux]));

        assert_eq!(groups.len(), 1);
        assert_eq!(metric_points(&groups[0], "cells"), vec![(1952.0, 9.0)]);
        assert_eq!(
            metric_points(&groups[0], LIFE_EXP),
            vec![(1952.0, 72.0), (1957.0, 73.0)]
        );
    }
}
