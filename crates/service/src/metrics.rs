use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "inventory_mutations_total",
        "Applied record mutations by collection and operation",
        &["collection", "op"]
    )
    .expect("register mutations_total")
});

pub static SNAPSHOT_SAVES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "inventory_snapshot_saves_total",
        "Snapshots written to disk"
    )
    .expect("register snapshot_saves_total")
});

pub static SNAPSHOT_SAVE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "inventory_snapshot_save_failures_total",
        "Snapshot writes that failed; in-memory state was kept"
    )
    .expect("register snapshot_save_failures_total")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
