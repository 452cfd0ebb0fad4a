pub mod aggregator;
pub mod etl;
pub mod page;
pub mod page_store;
pub mod paginator;
pub mod projector;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use crate::domain::model::{ExportTable, FlatRow, FollowerRecord, Page, PageRequest};
pub use crate::domain::ports::{FetchFailure, FollowerSource, Pipeline, Storage};
pub use crate::utils::error::Result;
