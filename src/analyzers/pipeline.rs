//! End-to-end analysis driver: load, merge, nest, fit, rank, flag.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::analyzers::nest::{Group, nest};
use crate::analyzers::report::{build_report, expand_rows, flag_below, rank_worst_first};
use crate::analyzers::summary::summarize;
use crate::analyzers::types::{FlaggedReport, TrendSummary};
use crate::infra::sources::SourceSpec;
use crate::parser::{parse_base_file, parse_wide_sheet};
use crate::services::sheet_api::SheetApi;
use crate::table::{LongTable, WideRow, WideTable};

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Variable regressed on year, per group.
    pub metric: String,
    /// Groups with R² strictly below this are flagged.
    pub threshold: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            metric: crate::table::LIFE_EXP.to_string(),
            threshold: 0.5,
        }
    }
}

/// Everything one batch run produces.
pub struct Analysis {
    pub table: WideTable,
    pub groups: Vec<Group>,
    /// Ranked worst trend first.
    pub summaries: Vec<TrendSummary>,
    pub report: FlaggedReport,
    /// Raw rows of the flagged groups, re-expanded for inspection.
    pub flagged_rows: Vec<WideRow>,
}

/// Fetches the configured sheets in order and reshapes each to long
/// format. Sequential on purpose: the merge left-folds in config order.
pub async fn load_sources(
    sheets: &dyn SheetApi,
    sources: &[SourceSpec],
) -> Result<Vec<LongTable>> {
    let mut tables = Vec::with_capacity(sources.len());
    for spec in sources {
        let text = sheets.fetch_sheet(&spec.key).await?;
        let table = parse_wide_sheet(&text, &spec.key, &spec.variable)?;
        info!(key = %spec.key, variable = %spec.variable, rows = table.rows.len(), "Source loaded");
        tables.push(table);
    }
    Ok(tables)
}

/// Runs the whole pipeline over one base file and the configured remote
/// sources.
pub async fn run(
    base_path: &Path,
    sources: &[SourceSpec],
    sheets: &dyn SheetApi,
    options: &AnalysisOptions,
) -> Result<Analysis> {
    let base = parse_base_file(base_path)?;
    info!(rows = base.len(), base = %base_path.display(), "Base dataset loaded");

    let auxiliary = load_sources(sheets, sources).await?;

    let table = WideTable::merge(&base, &auxiliary);
    info!(
        rows = table.len(),
        columns = table.columns().len(),
        "Sources merged"
    );

    let groups = nest(&table);
    let mut summaries = summarize(&groups, &options.metric);
    rank_worst_first(&mut summaries);

    let fitted = summaries.iter().filter(|s| s.is_fit()).count();
    info!(
        groups = groups.len(),
        fitted,
        unfit = groups.len() - fitted,
        metric = %options.metric,
        "Groups modeled"
    );

    let report = build_report(&summaries, &options.metric, options.threshold);
    let flagged = flag_below(&summaries, options.threshold);
    let flagged_rows = expand_rows(&groups, &flagged);

    Ok(Analysis {
        table,
        groups,
        summaries,
        report,
        flagged_rows,
    })
}
