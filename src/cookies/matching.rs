//! Domain and path matching.
//!
//! Matching is deliberately simpler than RFC 6265bis: there is no public suffix
//! lookup, and paths are compared case-insensitively after percent-decoding.

use percent_encoding::percent_decode_str;

/// Returns true if `host` is contained in `domain`: equal to it, or, when
/// `subdomains` is set, ending in `"." + domain`. Case-insensitive.
pub fn domain_matches(domain: &str, host: &str, subdomains: bool) -> bool {
    let domain = domain.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    if host == domain {
        return true;
    }

    subdomains
        && host.len() > domain.len()
        && host.ends_with(&domain)
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
}

/// Returns true if `request_path` lies at or below `cookie_path`.
///
/// Both sides are percent-decoded and lower-cased, and a single trailing `/` is
/// dropped, before checking that `request_path + "/"` starts with `cookie_path + "/"`.
pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    let cookie_path = normalize_path(cookie_path);
    let request_path = normalize_path(request_path);

    format!("{}/", request_path).starts_with(&format!("{}/", cookie_path))
}

fn normalize_path(path: &str) -> String {
    let mut path = percent_decode_str(path).decode_utf8_lossy().to_lowercase();
    if path.ends_with('/') {
        path.pop();
    }
    path
}

/// Get all jar keys to check for a given host, most specific first.
///
/// For `a.b.example.com` this yields `a.b.example.com`, `b.example.com` and
/// `example.com`. The bare top-level label is never a candidate unless it is the
/// whole host (e.g. `localhost`).
pub fn candidate_domains(host: &str) -> Vec<String> {
    let host = host.to_ascii_lowercase();
    let mut domains = vec![host.clone()];

    let parts: Vec<&str> = host.split('.').collect();
    for i in 1..parts.len().saturating_sub(1) {
        domains.push(parts[i..].join("."));
    }

    domains
}

/// Case-insensitive ASCII prefix test for the reserved `__Secure-`/`__Host-` names.
pub fn has_case_insensitive_prefix(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_exact() {
        assert!(domain_matches("example.com", "example.com", false));
        assert!(domain_matches("example.com", "EXAMPLE.com", false));
        assert!(!domain_matches("example.com", "sub.example.com", false));
    }

    #[test]
    fn test_domain_subdomains() {
        assert!(domain_matches("example.com", "sub.example.com", true));
        assert!(domain_matches("example.com", "a.b.example.com", true));
        assert!(!domain_matches("example.com", "badexample.com", true));
        assert!(!domain_matches("sub.example.com", "example.com", true));
    }

    #[test]
    fn test_path_root_matches_everything() {
        assert!(path_matches("/", "/"));
        assert!(path_matches("/", "/foo/bar"));
        assert!(path_matches("/", ""));
    }

    #[test]
    fn test_path_prefix_on_segment_boundary() {
        assert!(path_matches("/foo", "/foo"));
        assert!(path_matches("/foo", "/foo/"));
        assert!(path_matches("/foo/", "/foo/bar"));
        assert!(path_matches("/foo", "/foo/bar"));
        assert!(!path_matches("/foo", "/foobar"));
        assert!(!path_matches("/foo/bar", "/foo"));
    }

    #[test]
    fn test_path_case_and_percent_folding() {
        assert!(path_matches("/Lul/", "/lul/page"));
        assert!(path_matches("/a b", "/a%20b/c"));
        assert!(path_matches("/%C3%A4", "/%C3%84/x"));
    }

    #[test]
    fn test_candidate_domains() {
        assert_eq!(
            candidate_domains("a.b.c.com"),
            vec!["a.b.c.com", "b.c.com", "c.com"]
        );
        assert_eq!(candidate_domains("bar.foo"), vec!["bar.foo"]);
        assert_eq!(candidate_domains("localhost"), vec!["localhost"]);
    }

    #[test]
    fn test_prefix_check() {
        assert!(has_case_insensitive_prefix("__Secure-id", "__Secure-"));
        assert!(has_case_insensitive_prefix("__secure-id", "__Secure-"));
        assert!(!has_case_insensitive_prefix("__Sec", "__Secure-"));
        assert!(!has_case_insensitive_prefix("ä_Secure-id", "__Secure-"));
    }
}
