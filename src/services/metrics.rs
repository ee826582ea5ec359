//! Prometheus counters, exported by `GET /metrics`

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// Analyses performed, by how the filename arrived
    pub static ref ANALYSES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "file_analyses_total",
        "Filenames analyzed",
        &["source"]
    )
    .unwrap();

    /// Telegram updates handled, by message kind
    pub static ref TELEGRAM_UPDATES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "telegram_updates_total",
        "Telegram updates handled",
        &["kind"]
    )
    .unwrap();
}

pub fn record_analysis(source: &str) {
    ANALYSES_TOTAL.with_label_values(&[source]).inc();
}

pub fn record_update(kind: &str) {
    TELEGRAM_UPDATES_TOTAL.with_label_values(&[kind]).inc();
}
