//! Configuration utilities

use crate::data::ReviewCleaner;
use crate::defaults;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Artifact locations
    pub paths: PathSettings,
    /// Cleaning stage settings
    pub cleaning: CleaningSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl PipelineConfig {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.cleaning.sample_size == Some(0) {
            return Err(Error::Config(
                "cleaning.sample_size must be positive".to_string(),
            ));
        }
        self.logging
            .level
            .parse::<tracing::Level>()
            .map_err(|_| Error::Config(format!("unknown log level: {}", self.logging.level)))?;
        Ok(())
    }
}

/// Locations of the input and every artifact the pipeline writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Raw review CSV
    pub raw_input: PathBuf,
    /// Cleaned reviews
    pub clean: PathBuf,
    /// Reviews with sentiment columns
    pub with_sentiment: PathBuf,
    /// Reviews with topic categories
    pub final_output: PathBuf,
    /// Sentiment statistics JSON
    pub stats: PathBuf,
    /// Topic report
    pub topics: PathBuf,
    /// Executive summary
    pub summary: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            raw_input: PathBuf::from("data/reviews.csv"),
            clean: PathBuf::from("data/reviews_clean.csv"),
            with_sentiment: PathBuf::from("data/reviews_with_sentiment.csv"),
            final_output: PathBuf::from("data/reviews_final.csv"),
            stats: PathBuf::from("outputs/sentiment_stats.json"),
            topics: PathBuf::from("outputs/topics_analysis.txt"),
            summary: PathBuf::from("outputs/executive_summary.txt"),
        }
    }
}

/// Cleaning stage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningSettings {
    /// Rows to sample before cleaning; `None` keeps all rows
    ///
    /// TOML cannot express `None`, so keeping all rows from a config file
    /// needs JSON (`null`) or the CLI's `--all`.
    pub sample_size: Option<usize>,
    /// Sampling seed
    pub seed: u64,
    /// Texts of this many characters or fewer are dropped
    pub min_text_length: usize,
}

impl Default for CleaningSettings {
    fn default() -> Self {
        Self {
            sample_size: Some(defaults::SAMPLE_SIZE),
            seed: defaults::SAMPLE_SEED,
            min_text_length: defaults::MIN_TEXT_LENGTH,
        }
    }
}

impl CleaningSettings {
    /// Build the cleaner these settings describe
    pub fn cleaner(&self) -> ReviewCleaner {
        ReviewCleaner::new()
            .with_sample_size(self.sample_size)
            .with_seed(self.seed)
            .with_min_text_length(self.min_text_length)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

/// Load configuration from a `.toml` or `.json` file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let config: PipelineConfig = match extension(path) {
        "json" => serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?,
        "toml" => toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?,
        ext => return Err(Error::Config(format!("unsupported config format: {ext:?}"))),
    };

    config.validate()?;
    Ok(config)
}

/// Save configuration as `.toml` or `.json`
pub fn save_config<P: AsRef<Path>>(config: &PipelineConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = match extension(path) {
        "json" => serde_json::to_string_pretty(config)?,
        "toml" => toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?,
        ext => return Err(Error::Config(format!("unsupported config format: {ext:?}"))),
    };

    std::fs::write(path, content)?;
    Ok(())
}
