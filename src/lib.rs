pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use app::build_renderers;
pub use app::renderers::{ConsoleRenderer, HtmlBadgeRenderer, JsonRenderer, RendererSet};
pub use crate::core::evaluator::{evaluate, snapshot};
pub use crate::core::refresher::StatusRefresher;
pub use crate::core::{
    Classification, Clock, FixedClock, Locale, StatusSnapshot, StoreHoursConfig, StoreStatus,
    SystemClock,
};
pub use utils::error::{Result, StatusError};
