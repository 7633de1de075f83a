pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{EtlError, LookupError, Result};
pub use pipeline::EtlPipeline;
