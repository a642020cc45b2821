//! Canonical domain key derivation.

use url::Url;

use crate::CoreError;

/// Derive the canonical domain key for a URL: the host component,
/// lowercased, with a leading `www.` stripped.
///
/// The same key identifies a site in the handler registry and in the
/// mapping store, so the normalization here must stay stable.
///
/// # Errors
///
/// Returns [`CoreError::InvalidUrl`] if the URL cannot be parsed, or
/// [`CoreError::MissingHost`] for URLs without a host component (e.g.
/// `mailto:`).
pub fn resolve_domain(raw: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(raw).map_err(|e| CoreError::InvalidUrl(e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| CoreError::MissingHost(raw.to_string()))?;
    let host = host.to_ascii_lowercase();
    Ok(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_www_and_lowercases() {
        assert_eq!(
            resolve_domain("https://www.Example.com/x").unwrap(),
            "example.com"
        );
        assert_eq!(
            resolve_domain("https://example.com/y").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn keeps_non_www_subdomains() {
        assert_eq!(
            resolve_domain("https://rent.realestate.com.au/search").unwrap(),
            "rent.realestate.com.au"
        );
    }

    #[test]
    fn path_and_query_do_not_affect_the_key() {
        assert_eq!(
            resolve_domain("https://www.domain.com.au/sale/sydney?page=2").unwrap(),
            "domain.com.au"
        );
    }

    #[test]
    fn rejects_unparsable_url() {
        assert!(matches!(
            resolve_domain("not a url"),
            Err(CoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn rejects_relative_url() {
        assert!(matches!(
            resolve_domain("/buy/sydney"),
            Err(CoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn rejects_url_without_host() {
        assert!(matches!(
            resolve_domain("mailto:someone@example.com"),
            Err(CoreError::MissingHost(_))
        ));
    }
}
