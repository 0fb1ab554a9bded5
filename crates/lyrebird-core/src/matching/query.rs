//! Query string parsing and expected-parameter matching.

use crate::types::request::QueryParams;
use std::collections::HashMap;

/// Parse query string into ordered key/value pairs with URL decoding.
///
/// Repeated keys are kept as separate pairs in their original order.
pub fn parse_query_string(query_str: &str) -> QueryParams {
    let query_str = query_str.strip_prefix('?').unwrap_or(query_str);
    let mut result = QueryParams::default();

    for pair in query_str.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        result.append(decode_component(key), decode_component(value));
    }

    result
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    let decoded = urlencoding::decode(&raw).map(|d| d.into_owned()).ok();
    decoded.unwrap_or(raw)
}

/// Check every expected key against the first value the request carries for it.
///
/// Keys absent from `expected` are unconstrained. A missing key or a different value is a
/// mismatch; values are compared as exact strings.
pub fn params_match(expected: &HashMap<String, String>, actual: &QueryParams) -> bool {
    expected
        .iter()
        .all(|(key, value)| actual.get(key) == Some(value.as_str()))
}
