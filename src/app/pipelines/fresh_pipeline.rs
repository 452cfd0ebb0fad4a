use crate::config::ExportConfig;
use crate::core::aggregator;
use crate::core::page_store::{PageNaming, PageStore};
use crate::core::paginator::{FetchPlan, PaginationDriver};
use crate::core::{ExportTable, FollowerSource, Page, Pipeline, Storage};
use crate::utils::error::Result;

/// Downloads every page from the remote source, saving each one, then
/// writes the CSV.
pub struct FreshPipeline<S: Storage, F: FollowerSource> {
    pub(crate) store: PageStore<S>,
    pub(crate) source: F,
    pub(crate) config: ExportConfig,
}

impl<S: Storage, F: FollowerSource> FreshPipeline<S, F> {
    pub fn new(storage: S, source: F, config: ExportConfig) -> Result<Self> {
        let naming = PageNaming::from_pattern(&config.page_pattern)?;
        Ok(Self {
            store: PageStore::new(storage, naming),
            source,
            config,
        })
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan {
            total: self.config.total_followers,
            page_size: self.config.page_size,
            start_offset: self.config.start_offset,
            delay: self.config.request_delay(),
            max_follow_timestamp: self.config.cursor().map(str::to_string),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, F: FollowerSource> Pipeline for FreshPipeline<S, F> {
    async fn extract(&self) -> Result<Vec<Page>> {
        let mut driver = PaginationDriver::new(&self.source, &self.store, self.plan());
        driver.run().await
    }

    async fn transform(&self, pages: Vec<Page>) -> Result<ExportTable> {
        Ok(aggregator::aggregate(&pages))
    }

    async fn load(&self, table: ExportTable) -> Result<String> {
        aggregator::write(&table, &self.config.output_path)?;
        Ok(self.config.output_path.display().to_string())
    }
}
