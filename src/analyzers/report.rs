//! Ranking, threshold filtering, and re-expansion of flagged groups.

use chrono::Utc;
use tracing::info;

use crate::analyzers::nest::{Group, GroupKey};
use crate::analyzers::types::{FlaggedEntry, FlaggedReport, TrendSummary};
use crate::table::WideRow;

/// Sorts summaries worst trend first (ascending R²). Groups without a fit
/// sort after every fitted group; ties break on country name so the order
/// is stable across runs.
pub fn rank_worst_first(summaries: &mut [TrendSummary]) {
    summaries.sort_by(|a, b| {
        match (a.r_squared, b.r_squared) {
            (Some(ra), Some(rb)) => ra.total_cmp(&rb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
        .then_with(|| a.country.cmp(&b.country))
    });
}

/// Keys of the groups whose R² is strictly below `threshold`.
///
/// Groups without a fitted model carry no R² and are never flagged here;
/// their null summary rows already make them visible.
pub fn flag_below(summaries: &[TrendSummary], threshold: f64) -> Vec<GroupKey> {
    summaries
        .iter()
        .filter(|s| s.r_squared.is_some_and(|r| r < threshold))
        .map(|s| GroupKey {
            country: s.country.clone(),
            continent: s.continent.clone(),
        })
        .collect()
}

/// Builds the timestamped report of flagged groups.
pub fn build_report(summaries: &[TrendSummary], metric: &str, threshold: f64) -> FlaggedReport {
    let flagged: Vec<FlaggedEntry> = summaries
        .iter()
        .filter(|s| s.r_squared.is_some_and(|r| r < threshold))
        .map(|s| FlaggedEntry {
            country: s.country.clone(),
            continent: s.continent.clone(),
            r_squared: s.r_squared.unwrap_or_default(),
            grade: s.grade.clone().unwrap_or_default(),
        })
        .collect();

    info!(
        flagged = flagged.len(),
        total = summaries.len(),
        threshold,
        "Flagged groups below threshold"
    );

    FlaggedReport {
        generated_at: Utc::now(),
        metric: metric.to_string(),
        threshold,
        flagged,
    }
}

/// Re-expands the selected groups back into their raw rows, in group
/// order, for downstream inspection and plotting.
pub fn expand_rows(groups: &[Group], keys: &[GroupKey]) -> Vec<WideRow> {
    groups
        .iter()
        .filter(|g| keys.contains(&g.key))
        .flat_map(|g| g.rows.iter().cloned())
        .collect()
}
