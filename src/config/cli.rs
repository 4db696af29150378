use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "scoft-eligibility")]
#[command(about = "Online course substitution eligibility service")]
pub struct CliConfig {
    /// Path to TOML configuration file (optional)
    #[arg(short, long, default_value = "scoft.toml")]
    pub config: PathBuf,

    /// Spreadsheet file, or a directory of per-sheet CSV files
    #[arg(long)]
    pub workbook: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    /// Configuration file (or defaults when it does not exist) with command-line overrides applied.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = if self.config.exists() {
            TomlConfig::from_file(&self.config)?
        } else {
            TomlConfig::default()
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(workbook) = &self.workbook {
            config.data.workbook_path = workbook.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}
