use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, Histogram,
    HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Duration of feed page requests by outcome (page, terminal, error).
    pub static ref FEED_PAGE_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "posts_feed_page_duration_seconds",
        "Feed page request duration segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register posts_feed_page_duration_seconds");

    /// Total feed page requests by outcome.
    pub static ref FEED_PAGE_TOTAL: IntCounterVec = register_int_counter_vec!(
        "posts_feed_page_total",
        "Total feed page requests segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register posts_feed_page_total");

    /// Effective page size after defaulting and clamping.
    pub static ref FEED_PAGE_SIZE: Histogram = register_histogram!(
        "posts_feed_page_size",
        "Effective feed page size",
        vec![1.0, 5.0, 10.0, 20.0, 50.0, 100.0]
    )
    .expect("failed to register posts_feed_page_size");

    /// New-post checks by result (new, none).
    pub static ref FEED_HAS_NEW_CHECKS: IntCounterVec = register_int_counter_vec!(
        "posts_feed_has_new_checks_total",
        "New-post detection checks segmented by result",
        &["result"]
    )
    .expect("failed to register posts_feed_has_new_checks_total");
}
