//! Base URL validation.
//!
//! # Design Decisions
//! - A candidate is valid only if it parses as an absolute URL with scheme
//!   exactly `http` or `https`
//! - Invalid candidates are reported as `None`, never as an error

use url::Url;

/// Parse `candidate` as a routable base URL.
pub fn valid_base_url(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate).ok()?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Some(url),
        _ => None,
    }
}

/// Returns true if `candidate` would be accepted as a base URL.
pub fn is_valid_base_url(candidate: &str) -> bool {
    valid_base_url(candidate).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(is_valid_base_url("http://example.com"));
        assert!(is_valid_base_url("https://example.com/"));
        assert!(is_valid_base_url("https://api.example.com:8443/v3"));
        assert!(is_valid_base_url("http://127.0.0.1:8080/posts/1?x=1#top"));
    }

    #[test]
    fn test_rejects_everything_else() {
        assert!(!is_valid_base_url(""));
        assert!(!is_valid_base_url("/posts/1"));
        assert!(!is_valid_base_url("posts/1"));
        assert!(!is_valid_base_url("ftp://example.com"));
        assert!(!is_valid_base_url("file:///etc/hosts"));
        assert!(!is_valid_base_url("mailto:someone@example.com"));
        assert!(!is_valid_base_url("http://"));
        assert!(!is_valid_base_url("not a url"));
    }

    #[test]
    fn test_returns_parsed_url() {
        let url = valid_base_url("https://example.com:9000/v1").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.port(), Some(9000));
        assert_eq!(url.path(), "/v1");
    }
}
