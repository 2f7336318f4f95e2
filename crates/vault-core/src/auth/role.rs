use crate::auth::Credentials;
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Guest,
    Unauthenticated,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Guest => "guest",
            Role::Unauthenticated => "unauthenticated",
        }
    }
}

/// Exact, case-sensitive match against the admin pair first, then the guest
/// pair. First match wins.
pub fn resolve_role(creds: &Credentials, config: &Config) -> Role {
    if pair_matches(creds, &config.admin_user, &config.admin_pass) {
        Role::Admin
    } else if pair_matches(creds, &config.guest_user, &config.guest_pass) {
        Role::Guest
    } else {
        Role::Unauthenticated
    }
}

fn pair_matches(creds: &Credentials, user: &str, pass: &str) -> bool {
    // Both halves are always compared.
    let user_ok = constant_time_eq(creds.user.as_bytes(), user.as_bytes());
    let pass_ok = constant_time_eq(creds.pass.as_bytes(), pass.as_bytes());
    user_ok & pass_ok
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(user: &str, pass: &str) -> Credentials {
        Credentials {
            user: user.into(),
            pass: pass.into(),
        }
    }

    fn custom_config() -> Config {
        Config {
            admin_user: "bob".into(),
            admin_pass: "x1".into(),
            guest_user: "eve".into(),
            guest_pass: "y1".into(),
            ..Config::default()
        }
    }

    #[test]
    fn test_configured_pairs() {
        let config = custom_config();
        assert_eq!(resolve_role(&creds("bob", "x1"), &config), Role::Admin);
        assert_eq!(resolve_role(&creds("eve", "y1"), &config), Role::Guest);
        assert_eq!(
            resolve_role(&creds("bob", "y1"), &config),
            Role::Unauthenticated
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(resolve_role(&creds("admin", "admin"), &config), Role::Admin);
        assert_eq!(resolve_role(&creds("guest", "guest"), &config), Role::Guest);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let config = Config::default();
        assert_eq!(
            resolve_role(&creds("Admin", "admin"), &config),
            Role::Unauthenticated
        );
        assert_eq!(
            resolve_role(&creds("admin", "ADMIN"), &config),
            Role::Unauthenticated
        );
    }

    #[test]
    fn test_overlapping_pairs_resolve_to_admin() {
        let config = Config {
            guest_user: "admin".into(),
            guest_pass: "admin".into(),
            ..Config::default()
        };
        assert_eq!(resolve_role(&creds("admin", "admin"), &config), Role::Admin);
    }
}
