use async_trait::async_trait;

use crate::error::{LookupError, Result};
use crate::types::{LoadBatch, LookupDetails};

/// Finds one movie in the external catalogue by title and optional year
#[async_trait]
pub trait MovieLookupPort: Send + Sync {
    async fn lookup(&self, title: &str, year: Option<i32>) -> std::result::Result<LookupDetails, LookupError>;
}

/// Called once after every lookup, whatever its outcome
#[async_trait]
pub trait RateLimiterPort: Send + Sync {
    async fn pause(&self);
}

/// Destination for the four analytics tables
pub trait MovieStorePort {
    /// Run the schema script, dropping and recreating every table
    fn apply_schema(&mut self, schema_sql: &str) -> Result<()>;

    /// Replace the contents of every table with `batch`
    fn replace_all(&mut self, batch: &LoadBatch) -> Result<()>;

    /// Human-readable location for log lines and the run summary
    fn location(&self) -> String;
}
