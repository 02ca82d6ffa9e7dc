//! URL and route helpers

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in query values: everything but RFC 3986 unreserved
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Detail route of a post
///
/// # Examples
/// ```ignore
/// post_url("posts", "minimal-apis") // -> "/posts/minimal-apis"
/// ```
pub fn post_url(route: &str, slug: &str) -> String {
    let route = route.trim_matches('/');
    if route.is_empty() {
        format!("/{}", slug)
    } else {
        format!("/{}/{}", route, slug)
    }
}

/// Listing route with category and page query parameters
///
/// # Examples
/// ```ignore
/// listing_url("/blog", Some("Design Patterns"), 2) // -> "/blog?category=Design%20Patterns&page=2"
/// ```
pub fn listing_url(listing_path: &str, category: Option<&str>, page: usize) -> String {
    let path = format!("/{}", listing_path.trim_matches('/'));
    let mut params = Vec::new();

    if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
        params.push(format!("category={}", encode_query_value(category)));
    }
    params.push(format!("page={}", page));

    format!("{}?{}", path, params.join("&"))
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com/", "/posts/a") // -> "https://example.com/posts/a"
/// ```
pub fn full_url_for(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Encode a query string value
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
