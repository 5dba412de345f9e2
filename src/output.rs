//! Output formatting and persistence for trend summaries.
//!
//! Supports CSV append for summary rows, a manual CSV layout for
//! re-expanded raw rows (their column set is only known after the merge),
//! and pretty JSON logging.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::TrendSummary;
use crate::table::WideRow;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends summary rows to a CSV file.
///
/// Creates the file with headers if it does not already exist, so
/// repeated runs against the same file stay parseable.
pub fn append_summaries(path: &str, summaries: &[TrendSummary]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = summaries.len(), "Appending summary rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes re-expanded raw rows as CSV: the fixed key columns followed by
/// one column per `columns` entry, empty where the measurement is absent.
pub fn write_wide_rows(path: &str, rows: &[WideRow], columns: &[String]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    let mut header = vec!["country".to_string(), "continent".to_string(), "year".to_string()];
    header.extend(columns.iter().cloned());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.country.clone(),
            row.continent.clone().unwrap_or_default(),
            row.year.to_string(),
        ];
        for column in columns {
            record.push(row.value(column).map(|v| v.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(path, rows = rows.len(), "Raw rows written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::model::LinearFit;
    use crate::analyzers::nest::GroupKey;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_summary() -> TrendSummary {
        let key = GroupKey {
            country: "Norway".to_string(),
            continent: Some("Europe".to_string()),
        };
        let fit = LinearFit::fit(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]).unwrap();
        TrendSummary::from_fit(&key, &fit)
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_summary()).unwrap();
    }

    #[test]
    fn test_append_summaries_creates_file() {
        let path = temp_path("trend_rater_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_summaries(&path, &[sample_summary()]).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("r_squared"));
        assert!(content.contains("Norway"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_summaries_writes_header_once() {
        let path = temp_path("trend_rater_test_header.csv");
        let _ = fs::remove_file(&path);

        append_summaries(&path, &[sample_summary()]).unwrap();
        append_summaries(&path, &[sample_summary()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.contains("r_squared")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_wide_rows_blank_for_missing() {
        let path = temp_path("trend_rater_test_rows.csv");
        let _ = fs::remove_file(&path);

        let mut row = WideRow {
            country: "Chad".to_string(),
            year: 1957,
            continent: None,
            values: Default::default(),
        };
        row.values.insert("cells".to_string(), 1.5);

        let columns = vec!["cells".to_string(), "tvs".to_string()];
        write_wide_rows(&path, &[row], &columns).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("country,continent,year,cells,tvs"));
        assert_eq!(lines.next(), Some("Chad,,1957,1.5,"));

        fs::remove_file(&path).unwrap();
    }
}
