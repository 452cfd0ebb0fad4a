pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::LinkedInClient, storage::LocalStorage};
pub use app::pipelines::{FreshPipeline, ReplayPipeline};
pub use config::{Credentials, ExportConfig};
pub use crate::core::etl::ExportEngine;
pub use utils::error::{ExportError, Result};
