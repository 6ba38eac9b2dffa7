//! Utility modules for common functionality

pub mod config;
pub mod format;

pub use config::{load_config, save_config, PipelineConfig};
pub use format::{format_thousands, truncate_chars};
