use error_types::ErrorKind;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// Normalized errors delivered to clients, by transport and kind.
    pub static ref ERRORS_EMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "posts_errors_emitted_total",
        "Normalized errors emitted segmented by transport and kind",
        &["transport", "kind"]
    )
    .expect("failed to register posts_errors_emitted_total");
}

pub fn record_emitted(transport: &str, kind: ErrorKind) {
    ERRORS_EMITTED_TOTAL
        .with_label_values(&[transport, kind.as_str()])
        .inc();
}
