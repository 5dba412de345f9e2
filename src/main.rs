//! CLI entry point for the trend rater tool.
//!
//! Provides subcommands for running the full analysis over a base dataset
//! plus configured remote sheets, inspecting a single sheet, and listing
//! configured sources.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use trend_rater::analyzers::pipeline::{self, AnalysisOptions};
use trend_rater::infra::sheets::HostedSheetClient;
use trend_rater::infra::sources::SourceConfig;
use trend_rater::output::{append_summaries, print_json, write_wide_rows};
use trend_rater::parser::parse_wide_sheet;
use trend_rater::services::sheet_api::SheetApi;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "trend_rater")]
#[command(about = "Rates the linearity of per-country trends in panel data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis over a base dataset and configured sheets
    Analyze {
        /// Path to the base delimited file (.csv comma, .tsv/.txt tab)
        #[arg(value_name = "BASE_FILE")]
        base: PathBuf,

        /// JSON config of remote sheet sources to merge in
        #[arg(short, long)]
        sources: Option<String>,

        /// Variable to regress on year per group
        #[arg(short, long, default_value = "lifeExp")]
        metric: String,

        /// Flag groups with R² below this value
        #[arg(short, long, default_value_t = 0.5)]
        threshold: f64,

        /// CSV file to append summary rows to
        #[arg(short, long, default_value = "summaries.csv")]
        output: String,

        /// Optional: CSV file for the raw rows of flagged groups
        #[arg(long)]
        flagged_rows: Option<String>,

        /// Log the flagged-group report as pretty JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch one remote sheet, reshape it, and log its long rows
    FetchSheet {
        /// Opaque sheet key
        #[arg(value_name = "KEY")]
        key: String,

        /// Variable name for the sheet's values
        #[arg(short, long, default_value = "value")]
        variable: String,
    },
    /// List the remote sources a config file declares
    ListSources {
        /// JSON config of remote sheet sources
        #[arg(value_name = "CONFIG")]
        sources: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/trend_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("trend_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            base,
            sources,
            metric,
            threshold,
            output,
            flagged_rows,
            json,
        } => {
            let config = match sources {
                Some(path) => SourceConfig::load(&path)?,
                None => SourceConfig::default(),
            };
            let sheets = HostedSheetClient::from_env();
            let options = AnalysisOptions { metric, threshold };

            let analysis = pipeline::run(&base, config.specs(), &sheets, &options).await?;

            append_summaries(&output, &analysis.summaries)?;
            info!(
                output = %output,
                summaries = analysis.summaries.len(),
                "Summary rows written"
            );

            if let Some(path) = flagged_rows {
                write_wide_rows(&path, &analysis.flagged_rows, analysis.table.columns())?;
            }

            if json {
                print_json(&analysis.report)?;
            }

            for entry in &analysis.report.flagged {
                info!(
                    country = %entry.country,
                    r_squared = entry.r_squared,
                    grade = %entry.grade,
                    "Below threshold"
                );
            }
        }
        Commands::FetchSheet { key, variable } => {
            let sheets = HostedSheetClient::from_env();
            let text = sheets.fetch_sheet(&key).await?;
            let table = parse_wide_sheet(&text, &key, &variable)?;

            info!(key = %key, rows = table.rows.len(), "Sheet fetched");
            for row in &table.rows {
                info!(
                    country = %row.country,
                    year = row.year,
                    value = row.value,
                    variable = %table.variable,
                    "Observation"
                );
            }
        }
        Commands::ListSources { sources } => {
            let config = SourceConfig::load(&sources)?;

            info!(total = config.len(), "Source config loaded");
            for spec in config.specs() {
                info!(key = %spec.key, variable = %spec.variable, "Source");
            }
        }
    }

    Ok(())
}
