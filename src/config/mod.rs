#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 1000;
pub const DEFAULT_PAGE_PATTERN: &str = "followers_page_*.json";

/// Session credentials copied from a logged-in browser.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub cookie: String,
    pub csrf_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |s: &str| if s.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("cookie", &redact(&self.cookie))
            .field("csrf_token", &redact(&self.csrf_token))
            .finish()
    }
}

/// Everything a run needs. Built once and handed to the pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub company_id: String,
    pub credentials: Credentials,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Expected number of followers; bounds the number of requests.
    pub total_followers: usize,
    pub page_size: usize,
    pub request_delay_ms: u64,
    pub start_offset: usize,
    pub max_follow_timestamp: Option<String>,
    pub pages_dir: PathBuf,
    pub page_pattern: String,
    pub output_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            company_id: String::new(),
            credentials: Credentials::default(),
            api_base_url: "https://www.linkedin.com".to_string(),
            request_timeout_secs: 30,
            total_followers: 0,
            page_size: DEFAULT_PAGE_SIZE,
            request_delay_ms: 1000,
            start_offset: 0,
            max_follow_timestamp: None,
            pages_dir: PathBuf::from("."),
            page_pattern: DEFAULT_PAGE_PATTERN.to_string(),
            output_path: PathBuf::from("followers.csv"),
        }
    }
}

impl ExportConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// The `maxFollowTimestamp` cursor, verbatim. Unset when empty.
    pub fn cursor(&self) -> Option<&str> {
        self.max_follow_timestamp
            .as_deref()
            .filter(|ts| !ts.is_empty())
    }

    /// Checks the additional settings only the fetch flow uses.
    pub fn validate_for_fetch(&self) -> Result<()> {
        self.validate()?;
        validation::validate_required_field("company_id", &self.company_id)?;
        validation::validate_required_field("cookie", &self.credentials.cookie)?;
        validation::validate_required_field("csrf_token", &self.credentials.csrf_token)?;
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_positive_number("total_followers", self.total_followers, 1)?;
        validation::validate_multiple_of("start_offset", self.start_offset, self.page_size)?;
        validation::validate_range("request_timeout_secs", self.request_timeout_secs, 1, 600)?;

        if let Some(cursor) = self.cursor() {
            match validation::parse_epoch_millis(cursor) {
                Some(until) => {
                    tracing::info!("Only followers up to {} will be fetched", until.to_rfc3339())
                }
                None => tracing::info!("Forwarding maxFollowTimestamp {:?} as given", cursor),
            }
        }
        Ok(())
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("page_size", self.page_size, 1, MAX_PAGE_SIZE)?;
        validation::validate_path("pages_dir", &self.pages_dir.to_string_lossy())?;
        validation::validate_path("output_path", &self.output_path.to_string_lossy())?;
        validation::validate_required_field("page_pattern", &self.page_pattern)?;
        Ok(())
    }
}
