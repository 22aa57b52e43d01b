//! Web-URL check for shared text.
//!
//! Accepts `http`/`https` URLs that spell out `scheme://host`, with optional
//! port, path, query and fragment. Anything containing whitespace or control
//! characters is rejected outright, before parsing.

use url::{Host, Url};

/// Returns true if `input` is a web URL the downloader can fetch.
///
/// `None` and the empty string are never URLs.
pub fn is_web_url(input: Option<&str>) -> bool {
    let s = match input {
        Some(s) if !s.is_empty() => s,
        _ => return false,
    };
    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let parsed = match Url::parse(s) {
        Ok(u) => u,
        Err(_) => return false,
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    // The parser tolerates `http:host`, `http:///host` and backslashes for
    // special schemes; require exactly `://` followed by the authority.
    let explicit_authority = s
        .get(parsed.scheme().len()..)
        .and_then(|rest| rest.strip_prefix("://"))
        .is_some_and(|authority| !authority.starts_with(['/', '\\']));
    if !explicit_authority || parsed.port() == Some(0) {
        return false;
    }
    match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => is_host_name(domain),
        None => false,
    }
}

/// Dot-separated labels of alphanumerics and `-`, no label empty or starting or
/// ending with `-`. One trailing dot (fully qualified form) is allowed.
fn is_host_name(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
