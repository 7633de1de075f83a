// Extract, transform and load stages plus the orchestrator that sequences them

pub mod extract;
pub mod orchestrator;
pub mod processing;
pub mod rate_limiter;

pub use orchestrator::{EtlPipeline, TransformOutput};
