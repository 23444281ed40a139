//! Parser for the upstream `Link` pagination header.
//!
//! The header value is a comma-separated list of `<url>; rel="name"`
//! entries. Parsing produces a relation → URL map; pagination only ever
//! consults the `next` relation and uses its URL verbatim, since it already
//! encodes the page cursor.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, LINK};

/// Parse a `Link` header value into a map from relation name to URL.
///
/// Entries that are not wrapped in angle brackets or carry no `rel`
/// parameter are skipped. A `rel` value with missing quotes is tolerated.
pub fn parse_link_header(value: &str) -> HashMap<String, String> {
    let mut rels = HashMap::new();

    for entry in value.split(',') {
        let mut parts = entry.trim().split(';');
        let Some(url_part) = parts.next() else {
            continue;
        };
        let url_part = url_part.trim();
        let Some(url) = url_part
            .strip_prefix('<')
            .and_then(|u| u.strip_suffix('>'))
        else {
            continue;
        };

        for param in parts {
            if let Some(rel) = param.trim().strip_prefix("rel=") {
                rels.insert(rel.trim_matches('"').to_string(), url.to_string());
            }
        }
    }

    rels
}

/// URL of the next page, if the response advertises one.
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(LINK)?.to_str().ok()?;
    parse_link_header(value).remove("next")
}
