use crate::domain::ports::Storage;
use crate::utils::error::{ExportError, Result};
use regex::Regex;
use std::io::ErrorKind;

/// Filename scheme for saved pages: a pattern with a single `*` that stands
/// for the decimal page index, e.g. `followers_page_*.json`.
#[derive(Debug, Clone)]
pub struct PageNaming {
    pattern: String,
    prefix: String,
    suffix: String,
    matcher: Regex,
}

impl PageNaming {
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| ExportError::InvalidConfigValueError {
            field: "page_pattern".to_string(),
            value: pattern.to_string(),
            reason: reason.to_string(),
        };

        let (prefix, suffix) = pattern
            .split_once('*')
            .ok_or_else(|| invalid("Pattern must contain one '*' for the page index"))?;
        if suffix.contains('*') {
            return Err(invalid("Pattern must contain exactly one '*'"));
        }
        if pattern.contains('/') || pattern.contains('\\') {
            return Err(invalid("Pattern must be a bare filename"));
        }

        let matcher = Regex::new(&format!(
            "^{}([0-9]+){}$",
            regex::escape(prefix),
            regex::escape(suffix)
        ))
        .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            matcher,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn file_name(&self, index: usize) -> String {
        format!("{}{}{}", self.prefix, index, self.suffix)
    }

    pub fn parse_index(&self, file_name: &str) -> Option<usize> {
        self.matcher
            .captures(file_name)
            .and_then(|caps| caps[1].parse().ok())
    }
}

/// Raw page bodies on durable storage, one file per page index.
pub struct PageStore<S: Storage> {
    storage: S,
    naming: PageNaming,
}

impl<S: Storage> PageStore<S> {
    pub fn new(storage: S, naming: PageNaming) -> Self {
        Self { storage, naming }
    }

    pub fn naming(&self) -> &PageNaming {
        &self.naming
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persists `raw` for `index`, replacing any earlier save. Returns the file name.
    pub async fn save(&self, index: usize, raw: &str) -> Result<String> {
        let file = self.naming.file_name(index);
        self.storage.write_file(&file, raw.as_bytes()).await?;
        tracing::debug!("Saved page {} to {}", index, file);
        Ok(file)
    }

    pub async fn load(&self, index: usize) -> Result<String> {
        let file = self.naming.file_name(index);
        let bytes = match self.storage.read_file(&file).await {
            Ok(bytes) => bytes,
            Err(ExportError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(ExportError::PageNotFound { index, file });
            }
            Err(e) => return Err(e),
        };

        String::from_utf8(bytes).map_err(|e| ExportError::Io(std::io::Error::new(
            ErrorKind::InvalidData,
            format!("{} is not UTF-8: {}", file, e),
        )))
    }

    /// Indices with a saved page, ascending. Gaps are allowed.
    pub async fn list_saved_indices(&self) -> Result<Vec<usize>> {
        let mut indices: Vec<usize> = self
            .storage
            .list_files()
            .await?
            .iter()
            .filter_map(|name| self.naming.parse_index(name))
            .collect();
        indices.sort_unstable();
        indices.dedup();
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_helpers::MockStorage;

    fn store() -> PageStore<MockStorage> {
        let naming = PageNaming::from_pattern("followers_page_*.json").unwrap();
        PageStore::new(MockStorage::default(), naming)
    }

    #[test]
    fn test_naming_round_trip() {
        let naming = PageNaming::from_pattern("followers_page_*.json").unwrap();
        assert_eq!(naming.file_name(7), "followers_page_7.json");
        assert_eq!(naming.parse_index("followers_page_12.json"), Some(12));
        assert_eq!(naming.parse_index("followers_page_.json"), None);
        assert_eq!(naming.parse_index("followers_page_1.json.partial"), None);
        assert_eq!(naming.parse_index("followers_page_x.json"), None);
        assert_eq!(naming.parse_index("followersXpage_1.json"), None);
    }

    #[test]
    fn test_pattern_needs_exactly_one_wildcard() {
        assert!(PageNaming::from_pattern("followers.json").is_err());
        assert!(PageNaming::from_pattern("page_*_*.json").is_err());
        assert!(PageNaming::from_pattern("dir/page_*.json").is_err());
        assert!(PageNaming::from_pattern("page(*).json").is_ok());
    }

    #[tokio::test]
    async fn test_save_overwrites_and_load_returns_latest() {
        let store = store();
        store.save(0, "{\"v\":1}").await.unwrap();
        let file = store.save(0, "{\"v\":2}").await.unwrap();

        assert_eq!(file, "followers_page_0.json");
        assert_eq!(store.load(0).await.unwrap(), "{\"v\":2}");
    }

    #[tokio::test]
    async fn test_load_missing_page() {
        let err = store().load(3).await.unwrap_err();
        assert!(matches!(err, ExportError::PageNotFound { index: 3, .. }));
    }

    #[tokio::test]
    async fn test_listing_sorts_numerically_and_skips_foreign_files() {
        let store = store();
        for index in [10, 2, 0] {
            store.save(index, "{}").await.unwrap();
        }
        store
            .storage()
            .write_file("followers.csv", b"firstName")
            .await
            .unwrap();

        assert_eq!(store.list_saved_indices().await.unwrap(), vec![0, 2, 10]);
    }
}
