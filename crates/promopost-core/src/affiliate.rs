//! Affiliate link construction for marketplace product URLs.
//!
//! Instead of appending a tag to whatever URL the operator pasted (tracking
//! parameters, session ids, search refs), the link is rebuilt from scratch
//! around the product identifier, so the only query parameter left is the
//! affiliate tag.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the 10-character product identifier in a `/dp/<ID>` path
/// segment. The trailing group anchors the identifier so longer segments
/// do not half-match.
static PRODUCT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/dp/([A-Z0-9]{10})(?:[/?#]|$)").expect("valid product id regex")
});

const DOMESTIC_HOST: &str = "amazon.com.br";
const DOMESTIC_DOMAIN: &str = "www.amazon.com.br";
const INTERNATIONAL_DOMAIN: &str = "www.amazon.com";

/// Extracts the product identifier from a `/dp/<ID>` segment of `url`.
#[must_use]
pub fn extract_product_id(url: &str) -> Option<&str> {
    PRODUCT_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rebuilds `url` as a canonical affiliate link carrying `tag`.
///
/// The domestic storefront is kept when the URL mentions it; anything else
/// maps to the international storefront. URLs without a recognizable
/// product identifier are returned unchanged, so downstream formatting
/// still has a link to show.
#[must_use]
pub fn format_affiliate_link(url: &str, tag: &str) -> String {
    let Some(product_id) = extract_product_id(url) else {
        return url.to_string();
    };

    let domain = if url.contains(DOMESTIC_HOST) {
        DOMESTIC_DOMAIN
    } else {
        INTERNATIONAL_DOMAIN
    };

    format!("https://{domain}/dp/{product_id}?tag={tag}")
}
