use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

lazy_static! {
    /// Request latency by method, matched route pattern and status code.
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "resume_http_request_duration_seconds",
        "HTTP request duration segmented by method, route and status",
        &["method", "route", "status"]
    )
    .expect("failed to register resume_http_request_duration_seconds");

    /// Requests served by method, matched route pattern and status code.
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "resume_http_requests_total",
        "Total HTTP requests segmented by method, route and status",
        &["method", "route", "status"]
    )
    .expect("failed to register resume_http_requests_total");
}
