use std::path::Path;
use tabled::{Table, Tabled};
use vault_core::gateway::encode_key;
use vault_core::storage::{MetadataStore, sort_newest_first};

pub struct Remote {
    pub client: reqwest::Client,
    pub base: String,
    pub user: String,
    pub pass: String,
}

impl Remote {
    fn url(&self, prefix: &str, key: &str) -> String {
        format!("{}{}{}", self.base, prefix, encode_key(key))
    }
}

#[derive(Tabled)]
struct ObjectRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Size")]
    size: u64,
    #[tabled(rename = "Type")]
    content_type: String,
    #[tabled(rename = "Uploaded")]
    uploaded: String,
}

// --- Offline (direct sled) ---

pub fn list_offline(store: &MetadataStore) {
    match store.list_records() {
        Ok(mut records) => {
            if records.is_empty() {
                println!("No files yet.");
                return;
            }
            sort_newest_first(&mut records);
            let rows: Vec<ObjectRow> = records
                .into_iter()
                .map(|r| ObjectRow {
                    key: r.key,
                    size: r.size,
                    content_type: r.content_type,
                    uploaded: r
                        .uploaded
                        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

// --- Online (HTTP to server) ---

pub async fn upload(remote: &Remote, path: &Path, key: Option<&str>) {
    let key = match key {
        Some(k) => k.to_string(),
        None => match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                eprintln!("Error: cannot derive a key from '{}'; pass --key", path.display());
                std::process::exit(2);
            }
        },
    };

    let data = match tokio::fs::read(path).await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let resp = remote
        .client
        .put(remote.url("/upload/", &key))
        .basic_auth(&remote.user, Some(&remote.pass))
        .header("content-type", content_type_for(path))
        .body(data)
        .send()
        .await;
    match resp {
        Ok(r) if r.status().is_success() => println!("Uploaded '{}'.", key),
        Ok(r) => fail(r).await,
        Err(e) => connection_error(e),
    }
}

pub async fn download(remote: &Remote, key: &str, output: Option<&Path>) {
    let resp = remote
        .client
        .get(remote.url("/files/", key))
        .basic_auth(&remote.user, Some(&remote.pass))
        .send()
        .await;
    let resp = match resp {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => fail(r).await,
        Err(e) => connection_error(e),
    };

    let bytes = match resp.bytes().await {
        Ok(b) => b,
        Err(e) => connection_error(e),
    };

    // Keys may contain '/', so only the last segment names the default file.
    let default_name = key.rsplit('/').next().unwrap_or(key);
    let target = output.unwrap_or_else(|| Path::new(default_name));
    match tokio::fs::write(target, &bytes).await {
        Ok(()) => println!("Saved '{}' ({} bytes) to {}.", key, bytes.len(), target.display()),
        Err(e) => {
            eprintln!("Error: failed to write '{}': {}", target.display(), e);
            std::process::exit(1);
        }
    }
}

pub async fn delete(remote: &Remote, key: &str) {
    let resp = remote
        .client
        .delete(remote.url("/files/", key))
        .basic_auth(&remote.user, Some(&remote.pass))
        .send()
        .await;
    match resp {
        Ok(r) if r.status().is_success() => println!("Deleted '{}'.", key),
        Ok(r) => fail(r).await,
        Err(e) => connection_error(e),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => "application/pdf",
        _ => vault_core::storage::DEFAULT_CONTENT_TYPE,
    }
}

async fn fail(resp: reqwest::Response) -> ! {
    eprintln!("Error: server returned {}", resp.status());
    if let Ok(body) = resp.text().await {
        if !body.is_empty() {
            eprintln!("{}", body);
        }
    }
    std::process::exit(1);
}

fn connection_error(e: reqwest::Error) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}
