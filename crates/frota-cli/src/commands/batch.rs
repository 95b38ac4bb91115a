//! Batch command - extract records from a directory of invoice files and
//! optionally deliver them to the ingestion endpoint.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use frota_core::models::config::FrotaConfig;
use frota_core::models::record::FuelRecord;
use frota_core::nfe::batch::{BatchOutcome, RawDocument, process_collection};

use super::process::{OutputFormat, format_records, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output file for the aggregated records (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write a CSV diagnostic trail of failed documents
    #[arg(long)]
    diagnostics: Option<PathBuf>,

    /// Deliver each record to this ingestion endpoint (one POST per record)
    #[arg(short, long)]
    endpoint: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = collect_files(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No XML files found for: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("invoice.xml")
            .to_string();
        match fs::read(path) {
            Ok(bytes) => documents.push(RawDocument::new(name, bytes)),
            Err(e) => warn!("Failed to read {}: {}", path.display(), e),
        }
    }

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let outcome = process_collection(documents.into_iter().inspect(|_| pb.inc(1)));
    pb.finish_with_message("Complete");

    let output = format_records(&outcome.records, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else if !outcome.records.is_empty() {
        println!("{}", output);
    }

    if let Some(diagnostics_path) = &args.diagnostics {
        write_diagnostics(diagnostics_path, &outcome)?;
        println!(
            "{} Diagnostics written to {}",
            style("✓").green(),
            diagnostics_path.display()
        );
    }

    let endpoint = args.endpoint.or_else(|| config.delivery.endpoint.clone());
    let delivery = match endpoint {
        Some(endpoint) => Some(deliver_records(&endpoint, &outcome.records, &config).await?),
        None => None,
    };

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    println!(
        "   {} records extracted, {} documents failed",
        style(outcome.records.len()).green(),
        style(outcome.diagnostics.len()).red()
    );
    if let Some((delivered, failures)) = delivery {
        println!(
            "   {} records delivered, {} delivery failures",
            style(delivered).green(),
            style(failures).red()
        );
    }

    if !outcome.diagnostics.is_empty() {
        println!();
        println!("{}", style("Failed documents:").red());
        for diagnostic in &outcome.diagnostics {
            println!("  - {}: {}", diagnostic.document, diagnostic.error);
        }
    }

    Ok(())
}

/// Resolve the input to a sorted list of XML files. A directory scans for
/// `*.xml`; anything else is treated as a glob pattern.
fn collect_files(input: &str) -> anyhow::Result<Vec<PathBuf>> {
    let path = PathBuf::from(input);
    let pattern = if path.is_dir() {
        format!("{}/*.xml", input.trim_end_matches('/'))
    } else {
        input.to_string()
    };

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
        })
        .collect();

    // Stable order across runs
    files.sort();
    Ok(files)
}

/// Deliver each record as one POST. Single attempt per record; failures
/// are counted and logged, never retried.
async fn deliver_records(
    endpoint: &str,
    records: &[FuelRecord],
    config: &FrotaConfig,
) -> anyhow::Result<(usize, usize)> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.delivery.timeout_secs))
        .build()?;

    let mut delivered = 0;
    let mut failures = 0;

    for record in records {
        match client.post(endpoint).json(record).send().await {
            Ok(response) if response.status().is_success() => {
                delivered += 1;
            }
            Ok(response) => {
                warn!(status = %response.status(), "ingestion endpoint rejected record");
                failures += 1;
            }
            Err(e) => {
                warn!("failed to deliver record: {}", e);
                failures += 1;
            }
        }
    }

    debug!(delivered, failures, "delivery finished");
    Ok((delivered, failures))
}

fn write_diagnostics(path: &PathBuf, outcome: &BatchOutcome) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["document", "error"])?;
    for diagnostic in &outcome.diagnostics {
        let reason = diagnostic.error.to_string();
        wtr.write_record([diagnostic.document.as_str(), reason.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}
