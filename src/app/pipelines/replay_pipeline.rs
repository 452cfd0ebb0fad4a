use crate::config::ExportConfig;
use crate::core::aggregator;
use crate::core::page_store::{PageNaming, PageStore};
use crate::core::{ExportTable, Page, Pipeline, Storage};
use crate::utils::error::{ExportError, Result};

/// Rebuilds the CSV from pages saved by earlier fetch runs. Never touches
/// the network.
pub struct ReplayPipeline<S: Storage> {
    pub(crate) store: PageStore<S>,
    pub(crate) config: ExportConfig,
}

impl<S: Storage> ReplayPipeline<S> {
    pub fn new(storage: S, config: ExportConfig) -> Result<Self> {
        let naming = PageNaming::from_pattern(&config.page_pattern)?;
        Ok(Self {
            store: PageStore::new(storage, naming),
            config,
        })
    }

    async fn load_page(&self, index: usize) -> Result<Page> {
        let raw = self.store.load(index).await?;
        let page_size = self.config.page_size;
        Page::from_raw(index, index * page_size, page_size, raw).map_err(|e| match e {
            ExportError::Serialization(source) => ExportError::CorruptPage {
                file: self.store.naming().file_name(index),
                source,
            },
            other => other,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ReplayPipeline<S> {
    async fn extract(&self) -> Result<Vec<Page>> {
        let indices = self.store.list_saved_indices().await?;
        if indices.is_empty() {
            return Err(ExportError::NoSavedPages {
                dir: self.store.storage().location().to_path_buf(),
                pattern: self.store.naming().pattern().to_string(),
            });
        }

        tracing::info!("Found {} saved page files to process", indices.len());

        let mut pages = Vec::with_capacity(indices.len());
        for index in indices {
            let page = self.load_page(index).await?;
            tracing::info!(
                "Processing {} ({} follower elements)",
                self.store.naming().file_name(index),
                page.record_count()
            );
            pages.push(page);
        }
        Ok(pages)
    }

    async fn transform(&self, pages: Vec<Page>) -> Result<ExportTable> {
        Ok(aggregator::aggregate(&pages))
    }

    async fn load(&self, table: ExportTable) -> Result<String> {
        aggregator::write(&table, &self.config.output_path)?;
        Ok(self.config.output_path.display().to_string())
    }
}
