use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, ValueEnum};
use getinsights::{load_file, ChartType, DatasetReport, ProjectionRequest, Workspace};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Analyse a CSV or spreadsheet file.
#[derive(Debug, Parser)]
#[command(name = "getinsights", version, about)]
struct Args {
    /// CSV, XLS, XLSX or ODS file to analyse
    path: PathBuf,

    /// Restrict statistics to these columns (repeatable); defaults to all numeric columns
    #[arg(short, long = "column")]
    columns: Vec<String>,

    /// Chart to project: bar, line, scatter, pie, box or histogram
    #[arg(long)]
    chart: Option<String>,

    /// X-axis / label column for the chart
    #[arg(short, long)]
    x: Option<String>,

    /// Y-axis / value column for the chart
    #[arg(short, long)]
    y: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let dataset = match load_file(&args.path) {
        Ok(ds) => ds,
        Err(e) => {
            tracing::error!("Failed to load {:?}: {e}", args.path);
            return ExitCode::FAILURE;
        }
    };
    let mut workspace = Workspace::with_dataset(dataset);

    // Unset chart columns fall back to the same defaults a fresh view would pick.
    let projection = args.chart.as_deref().map(|tag| {
        let defaults = workspace.classification().default_selection();
        ProjectionRequest {
            chart_type: ChartType::from_tag(tag),
            x_field: args.x.clone().or(defaults.x_field),
            y_field: args.y.clone().or(defaults.y_field),
        }
    });
    let columns = (!args.columns.is_empty()).then_some(args.columns.as_slice());

    let report = DatasetReport::build(&mut workspace, columns, projection.as_ref());

    match args.format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            };
            match json {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    tracing::error!("Failed to serialize report: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }
    ExitCode::SUCCESS
}
