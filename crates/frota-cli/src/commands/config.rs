//! Config command - inspect and initialize configuration.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use frota_core::models::config::FrotaConfig;

use super::process::load_config;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Write a default config file
    Init {
        /// Destination path
        #[arg(default_value = "frota.json")]
        path: PathBuf,
    },
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path } => {
            FrotaConfig::default().save(&path)?;
            println!(
                "{} Wrote default config to {}",
                style("✓").green(),
                path.display()
            );
        }
    }

    Ok(())
}
