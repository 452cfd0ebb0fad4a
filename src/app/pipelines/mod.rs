pub mod fresh_pipeline;
pub mod replay_pipeline;

pub use fresh_pipeline::FreshPipeline;
pub use replay_pipeline::ReplayPipeline;
