use std::sync::OnceLock;

use metrics_exporter_prometheus::PrometheusHandle;

pub const REQUEST_COUNTER: &str = "vault_requests_total";
pub const REQUEST_DURATION: &str = "vault_request_duration_seconds";
pub const ERROR_COUNTER: &str = "vault_errors_total";
pub const OBJECT_COUNT: &str = "vault_object_count";
pub const STORED_BYTES: &str = "vault_stored_bytes";
pub const UPTIME: &str = "vault_uptime_seconds";

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("Failed to install Prometheus recorder")
        })
        .clone()
}
