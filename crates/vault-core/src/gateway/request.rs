use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

pub const UPLOAD_PREFIX: &str = "/upload/";
pub const FILES_PREFIX: &str = "/files/";

/// Everything except the characters `encodeURIComponent` leaves alone.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Logical category of a request path. Derived from the path alone; the
/// role never changes which class a request falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    Upload,
    File,
    Collection,
    Other,
}

impl ResourceClass {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceClass::Upload => "upload",
            ResourceClass::File => "file",
            ResourceClass::Collection => "collection",
            ResourceClass::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedRequest {
    pub class: ResourceClass,
    /// Decoded object key for `Upload` and `File`, `None` otherwise.
    pub key: Option<String>,
}

/// Classify a raw (still percent-encoded) request path.
///
/// A prefixed path whose key is empty or does not decode to UTF-8 is
/// `Other`, so it ends up unmatched.
pub fn classify(path: &str) -> RoutedRequest {
    if path == "/" {
        return RoutedRequest {
            class: ResourceClass::Collection,
            key: None,
        };
    }

    let keyed = [
        (UPLOAD_PREFIX, ResourceClass::Upload),
        (FILES_PREFIX, ResourceClass::File),
    ];
    for (prefix, class) in keyed {
        if let Some(raw) = path.strip_prefix(prefix) {
            return match decode_key(raw) {
                Some(key) => RoutedRequest {
                    class,
                    key: Some(key),
                },
                None => other(),
            };
        }
    }

    other()
}

fn other() -> RoutedRequest {
    RoutedRequest {
        class: ResourceClass::Other,
        key: None,
    }
}

/// Percent-decode a raw path segment exactly once.
pub fn decode_key(raw: &str) -> Option<String> {
    let key = percent_decode_str(raw).decode_utf8().ok()?.into_owned();
    if key.is_empty() {
        return None;
    }
    Some(key)
}

/// Percent-encode a key for use in a `/files/` or `/upload/` URL.
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_root() {
        assert_eq!(classify("/").class, ResourceClass::Collection);
    }

    #[test]
    fn test_classify_upload() {
        let routed = classify("/upload/report.pdf");
        assert_eq!(routed.class, ResourceClass::Upload);
        assert_eq!(routed.key.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn test_classify_file_decodes_once() {
        let routed = classify("/files/my%20report.pdf");
        assert_eq!(routed.class, ResourceClass::File);
        assert_eq!(routed.key.as_deref(), Some("my report.pdf"));

        // %2520 is a literal "%20" after one pass
        let routed = classify("/files/a%2520b.pdf");
        assert_eq!(routed.key.as_deref(), Some("a%20b.pdf"));
    }

    #[test]
    fn test_traversal_key_is_literal() {
        let routed = classify("/files/%2E%2E%2Fsecret");
        assert_eq!(routed.class, ResourceClass::File);
        assert_eq!(routed.key.as_deref(), Some("../secret"));
    }

    #[test]
    fn test_slashes_stay_in_key() {
        let routed = classify("/files/a/b.pdf");
        assert_eq!(routed.key.as_deref(), Some("a/b.pdf"));
    }

    #[test]
    fn test_unrecognized_paths() {
        assert_eq!(classify("/upload/").class, ResourceClass::Other);
        assert_eq!(classify("/files/").class, ResourceClass::Other);
        assert_eq!(classify("/files").class, ResourceClass::Other);
        assert_eq!(classify("/index.html").class, ResourceClass::Other);
        assert_eq!(classify("/files/%FF%FE").class, ResourceClass::Other);
    }

    #[test]
    fn test_encode_key_matches_uri_component() {
        assert_eq!(encode_key("my report (v2).pdf"), "my%20report%20(v2).pdf");
        assert_eq!(encode_key("../secret"), "..%2Fsecret");
        assert_eq!(encode_key("résumé.pdf"), "r%C3%A9sum%C3%A9.pdf");
    }

    #[test]
    fn test_encoded_key_decodes_back() {
        let key = "a b/c?d#e%f.pdf";
        assert_eq!(decode_key(&encode_key(key)).as_deref(), Some(key));
    }
}
