//! # econ-diag
//!
//! Runs the diagnostic regression pipeline on a merged CSV of a market index
//! and a CO2 series and writes the reports.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use econ_core::Dataset;
use econ_pipeline::{
    run_on_dataset, ChartData, ChartRenderer, CsvSeriesProvider, DiagnosticsConfig,
    JsonChartRenderer, JsonReportRenderer, NullChartRenderer, RenderOptions, ReportRenderer,
    SeriesProvider, TextReportRenderer,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "econ-diag")]
#[command(about = "Diagnostic regression of a market index on a CO2 series", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every test and write the report
    Analyze {
        /// Merged CSV with Date, response and predictor columns
        #[arg(short, long)]
        input: PathBuf,

        /// JSON file overriding the default test parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for report files
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Also write chart data as JSON
        #[arg(long)]
        charts: bool,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Print the dataset summary without running any test
    Summary {
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,
    },
}

#[derive(clap::Args)]
struct ColumnArgs {
    #[arg(long, default_value = "Date")]
    date_column: String,

    /// Response column (Y)
    #[arg(long, default_value = "DJI_Close")]
    response: String,

    /// Predictor column (X)
    #[arg(long, default_value = "CO2_Level")]
    predictor: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
    Both,
}

fn load(input: &Path, columns: &ColumnArgs) -> Result<Dataset> {
    CsvSeriesProvider::new(input)
        .with_columns(&columns.date_column, &columns.response, &columns.predictor)
        .load()
        .with_context(|| format!("failed to load {}", input.display()))
}

fn write_report(
    renderer: &dyn ReportRenderer,
    report: &econ_pipeline::AnalysisReport,
    dataset: &Dataset,
    output_dir: &Path,
) -> Result<PathBuf> {
    let document = renderer.render(report, &dataset.summary())?;
    let path = output_dir.join(format!("report.{}", renderer.file_extension()));
    std::fs::write(&path, document).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn run_analyze(
    input: PathBuf,
    config: Option<PathBuf>,
    output_dir: PathBuf,
    format: ReportFormat,
    charts: bool,
    columns: ColumnArgs,
) -> Result<()> {
    let config = match config {
        Some(path) => DiagnosticsConfig::from_json_file(&path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => DiagnosticsConfig::default(),
    };
    let dataset = load(&input, &columns)?;
    let report = run_on_dataset(&dataset, &config)?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let options = RenderOptions::default();

    let mut written = Vec::new();
    if matches!(format, ReportFormat::Text | ReportFormat::Both) {
        let renderer = TextReportRenderer::new(options.clone());
        written.push(write_report(&renderer, &report, &dataset, &output_dir)?);
    }
    if matches!(format, ReportFormat::Json | ReportFormat::Both) {
        written.push(write_report(&JsonReportRenderer, &report, &dataset, &output_dir)?);
    }

    let mut chart_renderer: Box<dyn ChartRenderer> = if charts {
        Box::new(JsonChartRenderer::new(output_dir.join("charts.json")))
    } else {
        Box::new(NullChartRenderer)
    };
    if chart_renderer.is_enabled() {
        let data = ChartData::build(&dataset, &report, &options)?;
        written.extend(chart_renderer.render(&data)?.into_iter().map(PathBuf::from));
    }

    for path in &written {
        info!(path = %path.display(), "written");
    }

    let i = &report.interpretation;
    println!(
        "{} on {}: slope {:.4} ({}), R² {:.4}, estimator {}",
        report.response.name,
        report.predictor.name,
        report.ols.slope,
        if i.slope_significant { "significant" } else { "not significant" },
        report.ols.r_squared,
        i.primary_estimator
    );
    for issue in &i.issues {
        println!("  issue: {issue}");
    }
    Ok(())
}

fn run_summary(input: PathBuf, columns: ColumnArgs) -> Result<()> {
    let dataset = load(&input, &columns)?;
    let summary = dataset.summary();
    println!("Observations: {}", summary.n_observations);
    println!("Period: {} to {}", summary.date_start, summary.date_end);
    println!(
        "{}: {:.2} to {:.2}",
        columns.response, summary.range_a.0, summary.range_a.1
    );
    println!(
        "{}: {:.2} to {:.2}",
        columns.predictor, summary.range_b.0, summary.range_b.1
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "econ=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            input,
            config,
            output_dir,
            format,
            charts,
            columns,
        } => run_analyze(input, config, output_dir, format, charts, columns),
        Commands::Summary { input, columns } => run_summary(input, columns),
    }
}
