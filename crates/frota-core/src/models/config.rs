//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the frota pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrotaConfig {
    /// Document intake configuration.
    pub intake: IntakeConfig,

    /// Record delivery configuration.
    pub delivery: DeliveryConfig,
}

impl Default for FrotaConfig {
    fn default() -> Self {
        Self {
            intake: IntakeConfig::default(),
            delivery: DeliveryConfig::default(),
        }
    }
}

/// Where invoice documents are picked up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Directory scanned for downloaded invoice XML files.
    pub document_dir: PathBuf,

    /// File extension accepted during directory scans.
    pub extension: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            document_dir: PathBuf::from("xml_abastecimentos"),
            extension: "xml".to_string(),
        }
    }
}

/// How extracted records are handed to the ingestion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Ingestion endpoint receiving one POST per record.
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

impl FrotaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
