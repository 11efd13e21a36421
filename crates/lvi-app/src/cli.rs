//! Command line of the `lvi-dash` binary

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lvi_data::DashboardConfig;
use tracing::info;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "LVI_DASH_CONFIG";

#[derive(Debug, Parser)]
#[command(name = "lvi-dash")]
#[command(about = "Render the LVI results dashboard views as JSON", long_about = None)]
#[command(version)]
pub struct Args {
    /// Dashboard config file (JSON)
    #[arg(value_name = "CONFIG", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Write a sample SQLite database to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub sample: Option<PathBuf>,
}

impl Args {
    /// The config file if one was named, defaults otherwise
    pub fn load_config(&self) -> Result<DashboardConfig> {
        match &self.config {
            Some(path) => DashboardConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => {
                info!("No config given, using defaults");
                Ok(DashboardConfig::default())
            }
        }
    }
}
