use crate::config::toml_config::TomlConfig;
use crate::config::ExportConfig;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "followers-export")]
#[command(about = "Export LinkedIn company followers to CSV")]
pub struct CliConfig {
    /// Optional TOML configuration file; flags override its values
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Download follower pages, save them, and write the CSV
    Fetch(FetchArgs),
    /// Rebuild the CSV from previously saved pages without network access
    Replay(StorageArgs),
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    #[arg(long)]
    pub company_id: Option<String>,

    #[arg(long, env = "LINKEDIN_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    #[arg(long, env = "LINKEDIN_CSRF_TOKEN", hide_env_values = true)]
    pub csrf_token: Option<String>,

    /// Expected follower count (as shown on the admin analytics page)
    #[arg(long)]
    pub total: Option<usize>,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Resume from this offset (a multiple of the page size)
    #[arg(long)]
    pub start_offset: Option<usize>,

    /// Only followers up to this Unix timestamp in milliseconds
    #[arg(long)]
    pub max_follow_timestamp: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// Directory holding the raw page files
    #[arg(long)]
    pub pages_dir: Option<PathBuf>,

    /// Page filename pattern; `*` stands for the page index
    #[arg(long)]
    pub page_pattern: Option<String>,

    /// CSV output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl StorageArgs {
    fn apply(&self, config: &mut ExportConfig) {
        if let Some(dir) = &self.pages_dir {
            config.pages_dir = dir.clone();
        }
        if let Some(pattern) = &self.page_pattern {
            config.page_pattern = pattern.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
    }
}

impl FetchArgs {
    fn apply(&self, config: &mut ExportConfig) {
        if let Some(company_id) = &self.company_id {
            config.company_id = company_id.clone();
        }
        if let Some(cookie) = &self.cookie {
            config.credentials.cookie = cookie.clone();
        }
        if let Some(token) = &self.csrf_token {
            config.credentials.csrf_token = token.clone();
        }
        if let Some(total) = self.total {
            config.total_followers = total;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(delay) = self.delay_ms {
            config.request_delay_ms = delay;
        }
        if let Some(offset) = self.start_offset {
            config.start_offset = offset;
        }
        if let Some(ts) = &self.max_follow_timestamp {
            config.max_follow_timestamp = Some(ts.clone());
        }
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        self.storage.apply(config);
    }
}

impl CliConfig {
    /// Config file values (or defaults), then command-line overrides.
    pub fn export_config(&self) -> Result<ExportConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_export_config(),
            None => ExportConfig::default(),
        };

        match &self.command {
            Command::Fetch(args) => args.apply(&mut config),
            Command::Replay(args) => args.apply(&mut config),
        }
        Ok(config)
    }
}
