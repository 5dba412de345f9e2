//! Parsers that normalize every source into tabular rows.
//!
//! The base dataset is a local delimited file with a fixed header
//! (country, continent, year, lifeExp, pop, gdpPercap). Remote sheets come
//! back wide: first column is the country, every remaining column header is
//! a year label. [`parse_wide_sheet`] reshapes that into a [`LongTable`]
//! before the merge; empty cells are treated as missing, not zero.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::PipelineError;
use crate::table::{LongRow, LongTable, Year};

/// One parsed record of the base dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub country: String,
    pub continent: String,
    pub year: Year,
    #[serde(rename = "lifeExp")]
    pub life_exp: f64,
    pub pop: f64,
    #[serde(rename = "gdpPercap")]
    pub gdp_per_cap: f64,
}

const BASE_HEADERS: [&str; 6] = ["country", "continent", "year", "lifeExp", "pop", "gdpPercap"];
const JOIN_HEADERS: [&str; 2] = ["country", "year"];

/// Reads the base dataset from a local delimited file.
///
/// The delimiter is chosen by extension: `.tsv` and `.txt` are
/// tab-delimited, anything else is treated as comma-delimited.
///
/// # Errors
///
/// [`PipelineError::JoinKeyMismatch`] if a join column is missing from the
/// header, [`PipelineError::Parse`] for any other header or cell problem.
pub fn parse_base_file(path: &Path) -> Result<Vec<Observation>, PipelineError> {
    let source_name = path.display().to_string();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("txt") => b'\t',
        _ => b',',
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| PipelineError::parse(&source_name, e.to_string()))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::parse(&source_name, e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for required in BASE_HEADERS {
        if !headers.iter().any(|h| h == required) {
            if JOIN_HEADERS.contains(&required) {
                return Err(PipelineError::join_key(&source_name, required));
            }
            return Err(PipelineError::parse(
                &source_name,
                format!("missing column '{required}'"),
            ));
        }
    }

    let mut observations = Vec::new();
    for result in reader.deserialize::<Observation>() {
        let obs = result.map_err(|e| PipelineError::parse(&source_name, e.to_string()))?;
        observations.push(obs);
    }

    debug!(rows = observations.len(), source = %source_name, "Base dataset parsed");
    Ok(observations)
}

/// Reshapes a wide sheet (entity column + one column per year) into a
/// [`LongTable`] labeled with the configured `variable` name.
///
/// `key` identifies the sheet in error messages. Empty cells produce no
/// long row; non-numeric cells and non-year column headers are
/// [`PipelineError::Parse`] failures that abort the whole sheet.
pub fn parse_wide_sheet(
    text: &str,
    key: &str,
    variable: &str,
) -> Result<LongTable, PipelineError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::parse(key, e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.len() < 2 {
        // A sheet with no year columns has nothing to join on.
        return Err(PipelineError::join_key(key, "year"));
    }

    let years: Vec<Year> = headers[1..]
        .iter()
        .map(|h| {
            h.parse::<Year>().map_err(|_| {
                PipelineError::parse(key, format!("column header '{h}' is not a year"))
            })
        })
        .collect::<Result<_, _>>()?;

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| PipelineError::parse(key, e.to_string()))?;
        let country = record.get(0).unwrap_or("").trim();
        if country.is_empty() {
            debug!(key, line, "Skipping sheet row without a country");
            continue;
        }

        for (idx, year) in years.iter().enumerate() {
            let cell = record.get(idx + 1).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| {
                PipelineError::parse(
                    key,
                    format!("row '{country}', year {year}: '{cell}' is not a number"),
                )
            })?;
            rows.push(LongRow {
                country: country.to_string(),
                year: *year,
                value,
            });
        }
    }

    debug!(key, variable, rows = rows.len(), "Sheet reshaped to long format");
    Ok(LongTable {
        variable: variable.to_string(),
        rows,
    })
}
