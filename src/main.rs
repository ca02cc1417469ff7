//! CLI entry point for the EV population dashboard.
//!
//! Provides subcommands for rendering the dashboard once, appending headline
//! metrics to a CSV file, and sampling the dataset on an interval.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ev_population_stats::{
    config::{self, Settings},
    fetch::load_source,
    output::{SummaryRow, append_record, print_pretty, render_report, write_json},
    parser::parse_records,
    publish::{DEFAULT_REPORT_KEY, write_json_to_s3},
    report::DashboardReport,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ev_population_stats")]
#[command(about = "Aggregate views over electric vehicle registration data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard for a dataset file or URL
    Report {
        /// Path to file or URL to fetch (defaults to EV_DATASET_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Also write the report as JSON to this path
        #[arg(long)]
        json: Option<String>,

        /// Optional: S3 bucket to upload the JSON report to
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Object key for the uploaded report
        #[arg(long, default_value = DEFAULT_REPORT_KEY)]
        s3_key: String,

        /// Gzip compress the report before uploading
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Append headline metrics for a dataset to a CSV file
    Record {
        /// Path to file or URL to fetch (defaults to EV_DATASET_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// CSV file to append results to
        #[arg(short, long, default_value = "data.csv")]
        output: String,
    },
    /// Re-load the dataset on an interval, appending one row per sample
    Watch {
        /// Path to file or URL to fetch (defaults to EV_DATASET_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// CSV file to append results to
        #[arg(short, long, default_value = "data.csv")]
        output: String,

        /// Sample rate: load the dataset every X seconds
        #[arg(short = 'r', long, default_value_t = 3600)]
        sample_rate: u64,

        /// Number of samples to collect (0 = infinite)
        #[arg(short = 'n', long, default_value_t = 1)]
        num_samples: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = config::log_file_path();
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ev_population_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let settings = Settings::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            source,
            json,
            s3_bucket,
            s3_key,
            gzip,
        } => {
            let source = source.unwrap_or_else(|| settings.dataset_url.clone());
            let report = build_report(&source, &settings).await?;

            println!("{}", render_report(&report));
            print_pretty(&report);

            if let Some(path) = json {
                write_json(&path, &report)?;
            }

            if let Some(bucket) = s3_bucket {
                let config = aws_config::load_from_env().await;
                let s3 = aws_sdk_s3::Client::new(&config);
                write_json_to_s3(&s3, &bucket, &s3_key, &report, gzip).await?;
            }
        }
        Commands::Record { source, output } => {
            let source = source.unwrap_or_else(|| settings.dataset_url.clone());
            let report = build_report(&source, &settings).await?;

            append_record(&output, &SummaryRow::from_report(&report))?;
            info!(output, total = report.stats.total, "Summary row appended");
        }
        Commands::Watch {
            source,
            output,
            sample_rate,
            num_samples,
        } => {
            let source = source.unwrap_or_else(|| settings.dataset_url.clone());
            watch(&source, &output, sample_rate, num_samples, &settings).await?;
        }
    }

    Ok(())
}

/// Loads, parses and aggregates one dataset.
#[tracing::instrument(skip(settings))]
async fn build_report(source: &str, settings: &Settings) -> Result<DashboardReport> {
    let bytes = load_source(source, settings.http_timeout).await?;
    let records = parse_records(&bytes).with_context(|| format!("failed to parse '{source}'"))?;
    info!(records = records.len(), "Dataset loaded");

    Ok(DashboardReport::from_records(&records).with_source(source))
}

/// Samples the dataset every `sample_rate` seconds, appending a summary row
/// per successful sample. Failed samples are logged and skipped.
#[tracing::instrument(skip(settings))]
async fn watch(
    source: &str,
    output: &str,
    sample_rate: u64,
    num_samples: usize,
    settings: &Settings,
) -> Result<()> {
    if num_samples == 0 {
        info!(sample_rate, "Sampling infinitely. Press Ctrl+C to stop.");
    } else {
        info!(num_samples, sample_rate, "Starting sample collection");
    }

    let mut sample_count = 0;

    loop {
        // Check if we've reached the sample limit (0 = infinite)
        if num_samples > 0 && sample_count >= num_samples {
            break;
        }

        sample_count += 1;

        let started = std::time::Instant::now();
        match build_report(source, settings).await {
            Ok(report) => {
                let elapsed = started.elapsed();
                if elapsed.as_secs() > 15 {
                    warn!(elapsed_secs = elapsed.as_secs(), "Dataset load was slow");
                }
                if let Err(e) = append_record(output, &SummaryRow::from_report(&report)) {
                    error!(error = %e, "Failed to write summary row");
                } else {
                    info!(sample = sample_count, total = report.stats.total, "Sample recorded");
                }
            }
            Err(e) => {
                error!(sample = sample_count, error = %e, "Sample failed");
            }
        }

        // If not the last sample, wait before next iteration
        if num_samples == 0 || sample_count < num_samples {
            info!(sample_rate, "Waiting before next sample");
            tokio::time::sleep(tokio::time::Duration::from_secs(sample_rate)).await;
        }
    }

    info!(output, "Finished sampling");
    Ok(())
}
