//! In-memory stand-ins for storage and the remote follower source.

use crate::domain::model::PageRequest;
use crate::domain::ports::{FetchFailure, FollowerSource, Storage};
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub(crate) struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockStorage {
    pub(crate) async fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.lock().await.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.files.lock().await.keys().cloned().collect())
    }

    fn location(&self) -> &Path {
        Path::new("memory")
    }
}

/// Follower source answering requests from a fixed script, in order.
pub(crate) struct ScriptedSource {
    responses: StdMutex<Vec<std::result::Result<String, FetchFailure>>>,
    requests: StdMutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    pub(crate) fn new(responses: Vec<std::result::Result<String, FetchFailure>>) -> Self {
        Self {
            responses: StdMutex::new(responses.into_iter().rev().collect()),
            requests: StdMutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FollowerSource for ScriptedSource {
    async fn fetch_page(&self, request: &PageRequest) -> std::result::Result<String, FetchFailure> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(FetchFailure::Network("script exhausted".to_string())))
    }
}

/// A normalized page body with `count` members, numbered from `first`.
pub(crate) fn page_body(first: usize, count: usize) -> String {
    let elements: Vec<_> = (first..first + count)
        .map(|n| {
            json!({
                "entityUrn": format!("urn:li:fsd_follower:{}", n),
                "followerV2": {"*profile": format!("urn:li:fsd_profile:{}", n)},
                "followedAt": {"text": format!("{}d", n), "accessibilityText": format!("{} days ago", n)}
            })
        })
        .collect();
    let included: Vec<_> = (first..first + count)
        .map(|n| {
            json!({
                "entityUrn": format!("urn:li:fsd_profile:{}", n),
                "publicIdentifier": format!("member-{}", n),
                "firstName": format!("First{}", n),
                "lastName": format!("Last{}", n)
            })
        })
        .collect();

    json!({
        "data": {
            "data": {
                "organizationDashFollowersByOrganizationalPage": {"elements": elements}
            }
        },
        "included": included
    })
    .to_string()
}
