//! # Signing-Certificate Host Check
//!
//! Must run before the certificate is fetched: a matching host is the only
//! thing that ties the certificate to the provider.

use url::Url;

/// Host component of `url`, or `None` when it does not parse or has no host.
pub fn domain_from_url(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// Exact host equality against the allow-listed domain.
pub fn check_domain(url: &str, allowed_domain: &str) -> bool {
    match domain_from_url(url) {
        Some(host) => host == allowed_domain,
        None => false,
    }
}

/// Whether `url` parses and uses the `https` scheme.
pub fn uses_https(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| parsed.scheme() == "https")
}
