use crate::config::{Credentials, ExportConfig};
use crate::utils::error::{ExportError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk layout of the configuration file. Every section and key is
/// optional; omitted values keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub linkedin: Option<LinkedInSection>,
    pub fetch: Option<FetchSection>,
    pub storage: Option<StorageSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkedInSection {
    pub company_id: Option<String>,
    pub cookie: Option<String>,
    pub csrf_token: Option<String>,
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchSection {
    pub total_followers: Option<usize>,
    pub page_size: Option<usize>,
    pub request_delay_ms: Option<u64>,
    pub start_offset: Option<usize>,
    pub max_follow_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub pages_dir: Option<PathBuf>,
    pub page_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<PathBuf>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExportError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LINKEDIN_COOKIE})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExportError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays the file's values on `ExportConfig::default()`.
    pub fn into_export_config(self) -> ExportConfig {
        let mut config = ExportConfig::default();

        if let Some(linkedin) = self.linkedin {
            if let Some(company_id) = linkedin.company_id {
                config.company_id = company_id;
            }
            config.credentials = Credentials {
                cookie: linkedin.cookie.unwrap_or_default(),
                csrf_token: linkedin.csrf_token.unwrap_or_default(),
            };
            if let Some(url) = linkedin.api_base_url {
                config.api_base_url = url;
            }
            if let Some(timeout) = linkedin.timeout_seconds {
                config.request_timeout_secs = timeout;
            }
        }

        if let Some(fetch) = self.fetch {
            config.total_followers = fetch.total_followers.unwrap_or(config.total_followers);
            config.page_size = fetch.page_size.unwrap_or(config.page_size);
            config.request_delay_ms = fetch.request_delay_ms.unwrap_or(config.request_delay_ms);
            config.start_offset = fetch.start_offset.unwrap_or(config.start_offset);
            config.max_follow_timestamp = fetch.max_follow_timestamp;
        }

        if let Some(storage) = self.storage {
            if let Some(dir) = storage.pages_dir {
                config.pages_dir = dir;
            }
            if let Some(pattern) = storage.page_pattern {
                config.page_pattern = pattern;
            }
        }

        if let Some(path) = self.output.and_then(|o| o.path) {
            config.output_path = path;
        }

        config
    }
}
