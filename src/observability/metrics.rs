//! Metrics for the ETL run.
//!
//! Recording goes through the `metrics` facade, so every call here is a
//! no-op until `init` installs the Prometheus recorder. Tests never install
//! one.

use std::fmt;
use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// Every metric name the pipeline records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Enrichment
    EnrichLookupsAttempted,
    EnrichLookupsSucceeded,
    EnrichLookupsNotFound,
    EnrichLookupsFailed,
    EnrichLookupDuration,
    EnrichBoxOfficeDiscarded,

    // Load
    LoadRowsWritten,
    LoadDuration,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::EnrichLookupsAttempted => "movie_etl_enrich_lookups_attempted_total",
            MetricName::EnrichLookupsSucceeded => "movie_etl_enrich_lookups_succeeded_total",
            MetricName::EnrichLookupsNotFound => "movie_etl_enrich_lookups_not_found_total",
            MetricName::EnrichLookupsFailed => "movie_etl_enrich_lookups_failed_total",
            MetricName::EnrichLookupDuration => "movie_etl_enrich_lookup_duration_seconds",
            MetricName::EnrichBoxOfficeDiscarded => "movie_etl_enrich_box_office_discarded_total",
            MetricName::LoadRowsWritten => "movie_etl_load_rows_written_total",
            MetricName::LoadDuration => "movie_etl_load_duration_seconds",
        }
    }
}

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Safe to call more than once.
pub fn init() {
    if HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = HANDLE.set(handle);
            info!("Metrics recorder installed");
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Current metrics in Prometheus text format, if a recorder is installed
pub fn render() -> Option<String> {
    HANDLE.get().map(|h| h.render())
}

/// Push the current snapshot to a Prometheus Pushgateway.
///
/// Failures are logged and swallowed; metrics never fail a run.
pub async fn push_snapshot(pushgateway_url: &str) {
    let Some(body) = render() else {
        return;
    };
    let push_url = format!("{}/metrics/job/movie_etl", pushgateway_url.trim_end_matches('/'));

    let res = reqwest::Client::new()
        .post(&push_url)
        .header("Content-Type", "text/plain; version=0.0.4")
        .body(body)
        .send()
        .await;

    match res {
        Ok(r) if r.status().is_success() => info!("Pushed metrics to Pushgateway at {}", push_url),
        Ok(r) => warn!("Pushgateway push responded with status {}", r.status().as_u16()),
        Err(e) => warn!("Failed to push metrics to Pushgateway: {}", e),
    }
}

// ============================================================================
// Enrichment Metrics
// ============================================================================

pub mod enrich {
    use super::MetricName;

    pub fn lookup_attempted() {
        ::metrics::counter!(MetricName::EnrichLookupsAttempted.as_str()).increment(1);
    }

    pub fn lookup_succeeded() {
        ::metrics::counter!(MetricName::EnrichLookupsSucceeded.as_str()).increment(1);
    }

    pub fn lookup_not_found() {
        ::metrics::counter!(MetricName::EnrichLookupsNotFound.as_str()).increment(1);
    }

    pub fn lookup_failed() {
        ::metrics::counter!(MetricName::EnrichLookupsFailed.as_str()).increment(1);
    }

    /// Wall time of one lookup, in seconds
    pub fn lookup_duration(secs: f64) {
        ::metrics::histogram!(MetricName::EnrichLookupDuration.as_str()).record(secs);
    }

    pub fn box_office_discarded() {
        ::metrics::counter!(MetricName::EnrichBoxOfficeDiscarded.as_str()).increment(1);
    }
}

// ============================================================================
// Load Metrics
// ============================================================================

pub mod load {
    use super::MetricName;

    pub fn rows_written(table: &'static str, count: usize) {
        ::metrics::counter!(MetricName::LoadRowsWritten.as_str(), "table" => table).increment(count as u64);
    }

    pub fn duration(secs: f64) {
        ::metrics::histogram!(MetricName::LoadDuration.as_str()).record(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_prefixed_and_unique() {
        let all = [
            MetricName::EnrichLookupsAttempted,
            MetricName::EnrichLookupsSucceeded,
            MetricName::EnrichLookupsNotFound,
            MetricName::EnrichLookupsFailed,
            MetricName::EnrichLookupDuration,
            MetricName::EnrichBoxOfficeDiscarded,
            MetricName::LoadRowsWritten,
            MetricName::LoadDuration,
        ];
        let mut names: Vec<_> = all.iter().map(|m| m.as_str()).collect();
        assert!(names.iter().all(|n| n.starts_with("movie_etl_")));
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn installed_recorder_renders_recorded_metrics() {
        init();
        enrich::lookup_attempted();
        load::rows_written("movies", 3);

        let body = render().expect("recorder should be installed");
        assert!(body.contains(MetricName::EnrichLookupsAttempted.as_str()));
        assert!(body.contains(MetricName::LoadRowsWritten.as_str()));
        assert!(body.contains("table=\"movies\""));
    }

    #[test]
    fn recording_never_panics() {
        enrich::lookup_attempted();
        load::rows_written("movies", 3);
        assert_eq!(MetricName::LoadDuration.to_string(), "movie_etl_load_duration_seconds");
    }
}
