#![allow(dead_code)]

use std::sync::Arc;
use std::time::Instant;
use vault_core::Config;
use vault_core::storage::{LocalStore, ObjectStore};

pub const ADMIN: (&str, &str) = ("admin", "admin");
pub const GUEST: (&str, &str) = ("guest", "guest");

pub struct TestServer {
    pub base_url: String,
    pub ops_base_url: String,
    pub store: Arc<dyn ObjectStore>,
    pub data_path: std::path::PathBuf,
    _data_dir: tempfile::TempDir,
    _metadata_dir: tempfile::TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_config(|_| {}).await
    }

    pub async fn start_with_credentials(
        admin: (&str, &str),
        guest: (&str, &str),
    ) -> Self {
        let (admin_user, admin_pass) = (admin.0.to_string(), admin.1.to_string());
        let (guest_user, guest_pass) = (guest.0.to_string(), guest.1.to_string());
        Self::start_with_config(move |config| {
            config.admin_user = admin_user;
            config.admin_pass = admin_pass;
            config.guest_user = guest_user;
            config.guest_pass = guest_pass;
        })
        .await
    }

    pub async fn start_with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let data_dir = tempfile::tempdir().unwrap();
        let metadata_dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(data_dir.path(), metadata_dir.path()).unwrap();
        Self::launch(Arc::new(store), data_dir, metadata_dir, customize).await
    }

    /// Serve with a caller-provided store, e.g. one that always fails.
    pub async fn start_with_store(store: Arc<dyn ObjectStore>) -> Self {
        let data_dir = tempfile::tempdir().unwrap();
        let metadata_dir = tempfile::tempdir().unwrap();
        Self::launch(store, data_dir, metadata_dir, |_| {}).await
    }

    async fn launch(
        store: Arc<dyn ObjectStore>,
        data_dir: tempfile::TempDir,
        metadata_dir: tempfile::TempDir,
        customize: impl FnOnce(&mut Config),
    ) -> Self {
        let mut config = Config {
            bind: "127.0.0.1:0".into(),
            ops_bind: "127.0.0.1:0".into(),
            data_dir: data_dir.path().to_path_buf(),
            metadata_dir: metadata_dir.path().to_path_buf(),
            log_level: "warn".into(),
            ..Config::default()
        };
        customize(&mut config);

        let state = Arc::new(vault_server::AppState {
            config,
            store: store.clone(),
            start_time: Instant::now(),
            metrics_handle: vault_server::metrics::init_metrics(),
        });

        let app = vault_server::router::build_router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let ops_app = vault_server::router::build_ops_router(state);
        let ops_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let ops_addr = ops_listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(ops_listener, ops_app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            ops_base_url: format!("http://{}", ops_addr),
            store,
            data_path: data_dir.path().to_path_buf(),
            _data_dir: data_dir,
            _metadata_dir: metadata_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn upload(
    client: &reqwest::Client,
    server: &TestServer,
    creds: (&str, &str),
    encoded_key: &str,
    body: &'static [u8],
) -> reqwest::Response {
    client
        .put(server.url(&format!("/upload/{}", encoded_key)))
        .basic_auth(creds.0, Some(creds.1))
        .header("content-type", "application/pdf")
        .body(body)
        .send()
        .await
        .unwrap()
}
