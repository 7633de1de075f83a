use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::app::ports::MovieLookupPort;
use crate::config::OmdbConfig;
use crate::error::{LookupError, Result};
use crate::types::LookupDetails;

/// OMDb search by exact title, optionally narrowed by year
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Top-level envelope of an OMDb title lookup
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(flatten)]
    details: LookupDetails,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Query parameters for one lookup. The year is omitted when unknown.
    pub fn query_params(&self, title: &str, year: Option<i32>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", self.api_key.clone()),
            ("t", title.to_string()),
        ];
        if let Some(y) = year {
            params.push(("y", y.to_string()));
        }
        params.push(("type", "movie".to_string()));
        params
    }
}

/// Classify an OMDb body. `"Response": "True"` is a hit; anything else is
/// the service telling us it has no match. A body that is not an OMDb
/// document at all counts as a transport failure.
pub fn interpret_body(body: &[u8]) -> std::result::Result<LookupDetails, LookupError> {
    let parsed: OmdbResponse = serde_json::from_slice(body)
        .map_err(|e| LookupError::Transport(format!("malformed response body: {e}")))?;

    if parsed.response.eq_ignore_ascii_case("true") {
        Ok(parsed.details)
    } else {
        Err(LookupError::NotFound(
            parsed.error.unwrap_or_else(|| "no error message".to_string()),
        ))
    }
}

#[async_trait]
impl MovieLookupPort for OmdbClient {
    async fn lookup(&self, title: &str, year: Option<i32>) -> std::result::Result<LookupDetails, LookupError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(title, year))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!("HTTP {}", status.as_u16())));
        }

        let bytes = resp.bytes().await?;
        debug!(title, bytes = bytes.len(), "OMDb response received");
        interpret_body(&bytes)
    }
}
