use std::env;
use std::path::PathBuf;

pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_ADMIN_PASS: &str = "admin";
pub const DEFAULT_GUEST_USER: &str = "guest";
pub const DEFAULT_GUEST_PASS: &str = "guest";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub ops_bind: String,
    pub data_dir: PathBuf,
    pub metadata_dir: PathBuf,
    pub log_level: String,
    pub admin_user: String,
    pub admin_pass: String,
    pub guest_user: String,
    pub guest_pass: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind: env::var("VAULT_BIND").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            ops_bind: env::var("VAULT_OPS_BIND").unwrap_or_else(|_| "127.0.0.1:9090".into()),
            data_dir: PathBuf::from(env::var("VAULT_DATA_DIR").unwrap_or_else(|_| "./data".into())),
            metadata_dir: PathBuf::from(
                env::var("VAULT_METADATA_DIR").unwrap_or_else(|_| "./metadata".into()),
            ),
            log_level: env::var("VAULT_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            admin_user: credential_var("ADMIN_USER", DEFAULT_ADMIN_USER),
            admin_pass: credential_var("ADMIN_PASS", DEFAULT_ADMIN_PASS),
            guest_user: credential_var("GUEST_USER", DEFAULT_GUEST_USER),
            guest_pass: credential_var("GUEST_PASS", DEFAULT_GUEST_PASS),
        }
    }

    /// True when the admin and guest pairs are identical. Role resolution
    /// checks admin first, so every guest login would then resolve to admin.
    pub fn credentials_overlap(&self) -> bool {
        self.admin_user == self.guest_user && self.admin_pass == self.guest_pass
    }
}

/// Unset and empty values both fall back, so a configured pair is never empty.
fn credential_var(name: &str, default: &str) -> String {
    credential_or_default(env::var(name).ok(), default)
}

fn credential_or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".into(),
            ops_bind: "127.0.0.1:9090".into(),
            data_dir: PathBuf::from("./data"),
            metadata_dir: PathBuf::from("./metadata"),
            log_level: "info".into(),
            admin_user: DEFAULT_ADMIN_USER.into(),
            admin_pass: DEFAULT_ADMIN_PASS.into(),
            guest_user: DEFAULT_GUEST_USER.into(),
            guest_pass: DEFAULT_GUEST_PASS.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_credential_falls_back() {
        assert_eq!(credential_or_default(Some(String::new()), "admin"), "admin");
        assert_eq!(credential_or_default(None, "guest"), "guest");
        assert_eq!(credential_or_default(Some("bob".into()), "admin"), "bob");
    }

    #[test]
    fn test_default_pairs_do_not_overlap() {
        assert!(!Config::default().credentials_overlap());
    }

    #[test]
    fn test_identical_pairs_overlap() {
        let config = Config {
            guest_user: "admin".into(),
            guest_pass: "admin".into(),
            ..Config::default()
        };
        assert!(config.credentials_overlap());
    }
}
