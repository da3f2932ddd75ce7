pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, Locale, StoreHoursConfig};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_range, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "store-status")]
#[command(about = "Shows whether the store is open, closing soon, or closed")]
pub struct CliConfig {
    #[arg(long, default_value = "7")]
    pub open_hour: u32,

    #[arg(long, default_value = "22")]
    pub close_hour: u32,

    #[arg(long, default_value = "60", help = "Minutes before close that count as closing soon")]
    pub warn_minutes: u32,

    #[arg(long, help = "Disable the closing-soon warning")]
    pub no_closing_soon: bool,

    #[arg(long, value_enum, default_value = "vi")]
    pub locale: Locale,

    #[arg(long, default_value = "60")]
    pub interval_secs: u64,

    #[arg(long, help = "Evaluate once and exit")]
    pub once: bool,

    #[arg(long, value_name = "HH:MM", help = "Evaluate at a fixed local time instead of now")]
    pub at: Option<String>,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, help = "HTML page (relative to output path) whose badge is updated")]
    pub page: Option<String>,

    #[arg(long, help = "JSON file (relative to output path) receiving each snapshot")]
    pub status_json: Option<String>,

    #[arg(long, help = "Do not print status lines to stdout")]
    pub quiet: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn store_hours(&self) -> Result<StoreHoursConfig> {
        let config = StoreHoursConfig::new(self.open_hour, self.close_hour)?.with_locale(self.locale);
        if self.no_closing_soon {
            Ok(config)
        } else {
            config.with_closing_soon_warning(self.warn_minutes)
        }
    }

    fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.store_hours()?;
        validate_range("interval_secs", self.interval_secs, 1, 24 * 60 * 60)?;
        validate_path("output_path", &self.output_path)?;
        if let Some(page) = &self.page {
            validate_path("page", page)?;
        }
        if let Some(json) = &self.status_json {
            validate_path("status_json", json)?;
        }
        if let Some(at) = &self.at {
            crate::core::clock::parse_hh_mm(at)?;
        }
        Ok(())
    }
}
