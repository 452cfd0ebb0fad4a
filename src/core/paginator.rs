use crate::core::page_store::PageStore;
use crate::domain::model::{Page, PageRequest};
use crate::domain::ports::{FetchFailure, FollowerSource, Storage};
use crate::utils::error::{ExportError, Result};
use std::time::Duration;

/// How much of the remote collection to walk and how fast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub total: usize,
    pub page_size: usize,
    pub start_offset: usize,
    pub delay: Duration,
    pub max_follow_timestamp: Option<String>,
}

impl FetchPlan {
    /// Requests needed to cover `total` from `start_offset`.
    pub fn request_budget(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        let pages = self.total.div_ceil(self.page_size);
        pages.saturating_sub(self.start_offset / self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverState {
    Init,
    Fetching { offset: usize },
    Fetched { offset: usize, records: usize },
    Exhausted { offset: usize },
    Failed { offset: usize },
}

/// Walks the follower collection one page at a time, saving each page
/// before asking for the next.
pub struct PaginationDriver<'a, F: FollowerSource, S: Storage> {
    source: &'a F,
    store: &'a PageStore<S>,
    plan: FetchPlan,
    state: DriverState,
}

impl<'a, F: FollowerSource, S: Storage> PaginationDriver<'a, F, S> {
    pub fn new(source: &'a F, store: &'a PageStore<S>, plan: FetchPlan) -> Self {
        Self {
            source,
            store,
            plan,
            state: DriverState::Init,
        }
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    fn transition(&mut self, next: DriverState) {
        tracing::debug!("Pagination {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Fetches until a short page, the request budget, or the first failure.
    /// Failures end the run; pages saved before them stay on storage.
    pub async fn run(&mut self) -> Result<Vec<Page>> {
        let budget = self.plan.request_budget();
        let page_size = self.plan.page_size;
        let mut pages = Vec::with_capacity(budget);

        tracing::info!(
            "Fetching up to {} followers in {} pages of {} (starting at offset {})",
            self.plan.total,
            budget,
            page_size,
            self.plan.start_offset
        );

        for attempt in 1..=budget {
            let offset = self
                .plan
                .start_offset
                .saturating_add((attempt - 1).saturating_mul(page_size));
            let index = offset / page_size;

            if attempt > 1 && !self.plan.delay.is_zero() {
                tokio::time::sleep(self.plan.delay).await;
            }

            self.transition(DriverState::Fetching { offset });
            tracing::info!(
                "Downloading page {}/{} (followers {}-{})",
                attempt,
                budget,
                offset,
                offset.saturating_add(page_size - 1)
            );

            let page = match self.fetch(index, offset, attempt).await {
                Ok(page) => page,
                Err(e) => {
                    self.transition(DriverState::Failed { offset });
                    tracing::error!("❌ {}", e);
                    return Err(e);
                }
            };

            let records = page.record_count();
            let file = match self.store.save(index, &page.raw).await {
                Ok(file) => file,
                Err(source) => {
                    self.transition(DriverState::Failed { offset });
                    let err = ExportError::PageSave {
                        index,
                        offset,
                        path: self
                            .store
                            .storage()
                            .location()
                            .join(self.store.naming().file_name(index)),
                        source: Box::new(source),
                    };
                    tracing::error!("❌ {}", err);
                    return Err(err);
                }
            };
            tracing::info!("  ✅ {} followers saved to {}", records, file);

            if let Some(hint) = page.total_hint {
                if hint as usize != self.plan.total {
                    tracing::debug!(
                        "Server reports {} followers, configured total is {}",
                        hint,
                        self.plan.total
                    );
                }
            }

            pages.push(page);
            self.transition(DriverState::Fetched { offset, records });

            if records < page_size {
                tracing::info!(
                    "Page at offset {} returned {} of {} followers; no more data",
                    offset,
                    records,
                    page_size
                );
                self.transition(DriverState::Exhausted { offset });
                break;
            }
        }

        if let DriverState::Fetched { offset, .. } = self.state {
            self.transition(DriverState::Exhausted { offset });
        }

        tracing::info!("Downloaded {} pages", pages.len());
        Ok(pages)
    }

    async fn fetch(&self, index: usize, offset: usize, attempt: usize) -> Result<Page> {
        let request = PageRequest {
            offset,
            page_size: self.plan.page_size,
            max_follow_timestamp: self.plan.max_follow_timestamp.clone(),
        };

        let raw = self
            .source
            .fetch_page(&request)
            .await
            .map_err(|failure| match failure {
                FetchFailure::Unauthorized { status } => ExportError::Auth {
                    offset,
                    attempt,
                    status,
                },
                other => ExportError::TransientFetch {
                    offset,
                    attempt,
                    reason: other.to_string(),
                },
            })?;

        Page::from_raw(index, offset, self.plan.page_size, raw).map_err(|e| {
            ExportError::TransientFetch {
                offset,
                attempt,
                reason: format!("response is not valid JSON: {}", e),
            }
        })
    }
}
