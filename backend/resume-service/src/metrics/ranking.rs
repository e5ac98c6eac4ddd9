use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter, Histogram, HistogramVec,
    IntCounter,
};

lazy_static! {
    /// Wall time of one hot ranking scan, segmented by outcome (ok/error).
    pub static ref HOT_RANKING_SCAN_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "hot_ranking_scan_duration_seconds",
        "Hot resume ranking scan duration segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register hot_ranking_scan_duration_seconds");

    /// Chunks read from the store across all scans.
    pub static ref HOT_RANKING_CHUNKS_TOTAL: IntCounter = register_int_counter!(
        "hot_ranking_chunks_total",
        "Total resume chunks read by the hot ranking scan"
    )
    .expect("failed to register hot_ranking_chunks_total");

    /// Records scored per scan.
    pub static ref HOT_RANKING_RECORDS_SCANNED: Histogram = register_histogram!(
        "hot_ranking_records_scanned",
        "Number of resumes scored per hot ranking scan",
        vec![10.0, 100.0, 1_000.0, 5_000.0, 10_000.0, 50_000.0, 100_000.0]
    )
    .expect("failed to register hot_ranking_records_scanned");
}
