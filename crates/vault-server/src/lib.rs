pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use vault_core::storage::ObjectStore;

pub struct AppState {
    pub config: vault_core::Config,
    pub store: Arc<dyn ObjectStore>,
    pub start_time: Instant,
    pub metrics_handle: PrometheusHandle,
}
