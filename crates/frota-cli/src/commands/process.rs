//! Process command - extract records from a single invoice file.

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use frota_core::models::config::FrotaConfig;
use frota_core::models::record::FuelRecord;
use frota_core::nfe::extract_records;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input NF-e XML file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Config is loaded for parity with batch; process itself has no knobs yet.
    let _config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let records = extract_records(&data)
        .map_err(|e| anyhow::anyhow!("Failed to extract {}: {}", args.input.display(), e))?;

    let output = format_records(&records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FrotaConfig> {
    Ok(match config_path {
        Some(path) => FrotaConfig::from_file(std::path::Path::new(path))?,
        None => FrotaConfig::default(),
    })
}

pub fn format_records(records: &[FuelRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[FuelRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Column names follow the wire contract
    wtr.write_record([
        "invoiceId",
        "issuer",
        "invoiceDate",
        "date",
        "plate",
        "kilometers",
        "fuelType",
        "quantity",
        "unitCost",
        "totalCost",
    ])?;

    for record in records {
        wtr.write_record([
            record
                .invoice_id
                .map(|v| v.to_string())
                .unwrap_or_default(),
            record.issuer.clone().unwrap_or_default(),
            record.invoice_date.clone().unwrap_or_default(),
            record.date.clone().unwrap_or_default(),
            record.plate.clone().unwrap_or_default(),
            record
                .kilometers
                .map(|v| v.to_string())
                .unwrap_or_default(),
            record.fuel_type.clone().unwrap_or_default(),
            record.quantity.map(|v| v.to_string()).unwrap_or_default(),
            record.unit_cost.map(|v| v.to_string()).unwrap_or_default(),
            record.total_cost.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[FuelRecord]) -> String {
    let mut output = String::new();

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("Record {}\n", i + 1));
        output.push_str(&format!("  Invoice:    {}\n", display_opt(&record.invoice_id)));
        output.push_str(&format!("  Issuer:     {}\n", display_opt(&record.issuer)));
        output.push_str(&format!("  Date:       {}\n", display_opt(&record.invoice_date)));
        output.push_str(&format!("  Plate:      {}\n", display_opt(&record.plate)));
        output.push_str(&format!("  Kilometers: {}\n", display_opt(&record.kilometers)));
        output.push_str(&format!("  Fuel:       {}\n", display_opt(&record.fuel_type)));
        output.push_str(&format!("  Quantity:   {}\n", display_opt(&record.quantity)));
        output.push_str(&format!("  Unit cost:  {}\n", display_opt(&record.unit_cost)));
        output.push_str(&format!("  Total cost: {}\n", display_opt(&record.total_cost)));
    }

    if records.is_empty() {
        output.push_str("No records extracted\n");
    }

    output
}

fn display_opt<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(T::to_string)
        .unwrap_or_else(|| "-".to_string())
}
