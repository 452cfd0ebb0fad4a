use crate::domain::model::{ExportTable, Page, PageRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Names of the regular files directly under the storage root.
    fn list_files(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn location(&self) -> &Path;
}

/// Why a page request did not produce a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Unauthorized { status: u16 },
    Status { status: u16, body: String },
    Network(String),
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Unauthorized { status } => write!(f, "unauthorized (HTTP {})", status),
            FetchFailure::Status { status, body } => write!(f, "HTTP {}: {}", status, body),
            FetchFailure::Network(msg) => write!(f, "network error: {}", msg),
        }
    }
}

/// Remote collection of followers, addressed by offset.
#[async_trait]
pub trait FollowerSource: Send + Sync {
    /// Returns the response body verbatim.
    async fn fetch_page(&self, request: &PageRequest) -> std::result::Result<String, FetchFailure>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Page>>;
    async fn transform(&self, pages: Vec<Page>) -> Result<ExportTable>;
    async fn load(&self, table: ExportTable) -> Result<String>;
}
