use std::path::{Path, PathBuf};

use trend_rater::analyzers::nest::flatten;
use trend_rater::analyzers::pipeline::{self, AnalysisOptions};
use trend_rater::infra::sources::SourceSpec;
use trend_rater::services::sheet_api::SheetApi;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/minipop.csv")
}

/// In-memory sheet host: one wide sheet, partially covering the fixture.
struct MockSheets;

#[async_trait::async_trait]
impl SheetApi for MockSheets {
    async fn fetch_sheet(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "cells-sheet" => {
                Ok("country,1952,1957\nLinearia,10,20\nFlatland,1,\n".to_string())
            }
            other => anyhow::bail!("unknown sheet key {other}"),
        }
    }
}

#[tokio::test]
async fn test_full_pipeline_ranks_and_flags() {
    let sources = vec![SourceSpec {
        key: "cells-sheet".to_string(),
        variable: "cellphones".to_string(),
    }];

    let analysis = pipeline::run(
        &fixture_path(),
        &sources,
        &MockSheets,
        &AnalysisOptions::default(),
    )
    .await
    .expect("pipeline run");

    // The sheet contributed a column without dropping any base row.
    assert!(analysis.table.columns().iter().any(|c| c == "cellphones"));
    assert_eq!(analysis.table.len(), 13);
    assert_eq!(
        analysis
            .table
            .get("Linearia", 1957)
            .and_then(|r| r.value("cellphones")),
        Some(20.0)
    );

    // Worst-first ranking: noisy Flatland, then exact Linearia, then the
    // single-year group that could not be fit at all.
    assert_eq!(analysis.summaries.len(), 3);
    assert_eq!(analysis.summaries[0].country, "Flatland");
    assert_eq!(analysis.summaries[1].country, "Linearia");
    assert_eq!(analysis.summaries[2].country, "Soloville");

    let flatland = &analysis.summaries[0];
    let linearia = &analysis.summaries[1];
    assert!(flatland.r_squared.unwrap() < 0.5);
    assert!((linearia.r_squared.unwrap() - 1.0).abs() < 1e-9);
    assert!((linearia.slope.unwrap() - 0.4).abs() < 1e-9);
    assert_eq!(linearia.grade.as_deref(), Some("A+"));

    let soloville = &analysis.summaries[2];
    assert!(!soloville.is_fit());
    assert!(soloville.error.is_some());

    // Threshold 0.5 flags exactly Flatland.
    assert_eq!(analysis.report.flagged.len(), 1);
    assert_eq!(analysis.report.flagged[0].country, "Flatland");

    // Re-expansion returns exactly Flatland's raw rows.
    assert_eq!(analysis.flagged_rows.len(), 6);
    assert!(analysis.flagged_rows.iter().all(|r| r.country == "Flatland"));
}

#[tokio::test]
async fn test_nesting_is_lossless_end_to_end() {
    let analysis = pipeline::run(
        &fixture_path(),
        &[],
        &MockSheets,
        &AnalysisOptions::default(),
    )
    .await
    .expect("pipeline run");

    let flattened = flatten(&analysis.groups);
    assert_eq!(flattened.len(), analysis.table.len());
    for row in &flattened {
        assert_eq!(analysis.table.get(&row.country, row.year), Some(row));
    }
}

#[tokio::test]
async fn test_unknown_sheet_key_aborts_run() {
    let sources = vec![SourceSpec {
        key: "missing-sheet".to_string(),
        variable: "cellphones".to_string(),
    }];

    let result = pipeline::run(
        &fixture_path(),
        &sources,
        &MockSheets,
        &AnalysisOptions::default(),
    )
    .await;

    assert!(result.is_err());
}
