pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig, Command};

pub use crate::config::{toml_config::TomlConfig, Settings};
pub use crate::core::engine::{OutputFormat, ReportEngine};
pub use crate::domain::model::{PeriodRecord, Report, Schedule, Termination};
pub use crate::utils::error::{CalcError, Result};
