use base64::{Engine as _, engine::general_purpose::STANDARD};

/// A user/password pair as presented by the client. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

/// Decode an `Authorization: Basic <base64>` value.
///
/// Returns `None` for a missing header and for anything malformed (wrong
/// scheme, bad base64, non-UTF-8 payload, no colon). Callers treat both the
/// same way: challenge the client again.
pub fn extract_basic(header: Option<&str>) -> Option<Credentials> {
    let header = header?.trim();
    let (scheme, payload) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(payload.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    // Only the first colon separates; passwords may contain more.
    let (user, pass) = decoded.split_once(':')?;
    Some(Credentials {
        user: user.to_string(),
        pass: pass.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_extract_valid_pair() {
        let creds = extract_basic(Some(&basic("admin:secret"))).unwrap();
        assert_eq!(creds.user, "admin");
        assert_eq!(creds.pass, "secret");
    }

    #[test]
    fn test_password_keeps_extra_colons() {
        let creds = extract_basic(Some(&basic("bob:a:b:c"))).unwrap();
        assert_eq!(creds.user, "bob");
        assert_eq!(creds.pass, "a:b:c");
    }

    #[test]
    fn test_empty_password_allowed() {
        let creds = extract_basic(Some(&basic("bob:"))).unwrap();
        assert_eq!(creds.pass, "");
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_basic(None), None);
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(extract_basic(Some("Basic")), None);
        assert_eq!(extract_basic(Some("Basic !!!not-base64!!!")), None);
        assert_eq!(extract_basic(Some(&basic("no-colon-here"))), None);
        assert_eq!(extract_basic(Some("Bearer abc.def")), None);
        let not_utf8 = format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':', b'x']));
        assert_eq!(extract_basic(Some(&not_utf8)), None);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let header = format!("basic {}", STANDARD.encode("guest:guest"));
        assert!(extract_basic(Some(&header)).is_some());
    }
}
