use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output columns, in order. Fixed so every export has identical columns.
pub const EXPORT_HEADER: [&str; 8] = [
    "firstName",
    "lastName",
    "headline",
    "publicIdentifier",
    "linkedinUrl",
    "followedAt.text",
    "followedAt.accessibilityText",
    "entityUrn",
];

/// One follower as returned by the API, with its profile already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerRecord(Value);

impl FollowerRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for FollowerRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One fetched batch of followers, kept together with the body it was decoded from.
#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub offset: usize,
    pub page_size: usize,
    pub total_hint: Option<u64>,
    pub raw: String,
    pub payload: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub headline: String,
    #[serde(rename = "publicIdentifier")]
    pub public_identifier: String,
    #[serde(rename = "linkedinUrl")]
    pub linkedin_url: String,
    #[serde(rename = "followedAt.text")]
    pub followed_at_text: String,
    #[serde(rename = "followedAt.accessibilityText")]
    pub followed_at_accessibility_text: String,
    #[serde(rename = "entityUrn")]
    pub entity_urn: String,
}

impl FlatRow {
    /// Values in `EXPORT_HEADER` order.
    pub fn values(&self) -> [&str; 8] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.headline.as_str(),
            self.public_identifier.as_str(),
            self.linkedin_url.as_str(),
            self.followed_at_text.as_str(),
            self.followed_at_accessibility_text.as_str(),
            self.entity_urn.as_str(),
        ]
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        EXPORT_HEADER
            .iter()
            .position(|name| *name == field)
            .map(|i| self.values()[i])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<FlatRow>,
}

impl ExportTable {
    pub fn new(rows: Vec<FlatRow>) -> Self {
        Self {
            header: EXPORT_HEADER.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parameters of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub page_size: usize,
    pub max_follow_timestamp: Option<String>,
}
