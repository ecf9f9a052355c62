//! Prometheus metrics for the download endpoint
//!
//! Registered in the default registry on first use and exposed by the
//! server's `/metrics` route.

// Registration only fails on a duplicate metric name, which is a programming error.
#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder};

/// Download requests by outcome
/// Labels: outcome (success/bad_request/invalid_url/unavailable/extraction_failed/file_not_found/internal)
pub static DOWNLOAD_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "ytmp3_download_requests_total",
        "Total number of /api/download requests by outcome",
        &["outcome"]
    )
    .expect("ytmp3_download_requests_total is registered once")
});

/// Wall-clock time of one engine invocation (network fetch + transcode)
pub static EXTRACTION_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "ytmp3_extraction_duration_seconds",
        "Time spent in the extraction engine per request",
        vec![1.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0]
    )
    .expect("ytmp3_extraction_duration_seconds is registered once")
});

/// Count one finished download request.
pub fn record_outcome(outcome: &str) {
    DOWNLOAD_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Encode every registered metric in the text exposition format.
pub fn render() -> Result<(String, String), prometheus::Error> {
    // Touch the lazies so the families show up before the first request.
    Lazy::force(&DOWNLOAD_REQUESTS_TOTAL);
    Lazy::force(&EXTRACTION_DURATION_SECONDS);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    let body = String::from_utf8_lossy(&buffer).into_owned();
    Ok((encoder.format_type().to_string(), body))
}
