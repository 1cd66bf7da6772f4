pub mod cli;
pub mod prompt;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "suruga-order-sheet")]
#[command(about = "Turn a saved Suruga-ya order page into a priced spreadsheet block")]
pub struct CliConfig {
    /// Saved order confirmation page
    #[arg(long)]
    pub input: Option<String>,

    /// Directory the spreadsheet is written to
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// First spreadsheet row of the item block (prompted when omitted)
    #[arg(long)]
    pub first_line: Option<String>,

    /// Total GBP paid (prompted when omitted)
    #[arg(long)]
    pub gbp_paid: Option<String>,

    /// Total yen paid (prompted when omitted)
    #[arg(long)]
    pub yen_paid: Option<String>,

    /// Dry run - show what would be written without creating a file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_overrides(&self, config: &mut toml_config::OrderConfig) {
        if let Some(input) = &self.input {
            config.source.input = input.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
    }

    pub fn load_order_config(&self) -> crate::utils::error::Result<toml_config::OrderConfig> {
        let mut config = match &self.config {
            Some(path) => toml_config::OrderConfig::from_file(path)?,
            None => toml_config::OrderConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }
}
