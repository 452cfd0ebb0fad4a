use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs a pipeline's extract, transform and load steps in order.
pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("📥 STEP 1: Collecting follower pages...");
        let pages = self.pipeline.extract().await?;
        let records: usize = pages.iter().map(|p| p.record_count()).sum();
        tracing::info!("Collected {} pages with {} follower elements", pages.len(), records);

        tracing::info!("📊 STEP 2: Flattening followers...");
        let table = self.pipeline.transform(pages).await?;
        tracing::info!("Flattened {} followers", table.len());

        tracing::info!("💾 STEP 3: Writing CSV file...");
        let output_path = self.pipeline.load(table).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
