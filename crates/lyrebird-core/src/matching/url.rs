//! URL pattern matching with path parameters.
//!
//! Patterns are paths with optional `{name}` or `:name` placeholders, each matching one path
//! segment, and `*` matching any remainder. Query strings are ignored on both sides. An absolute
//! pattern only matches absolute URLs with the same origin; relative URLs match on path alone.

use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlMatchResult {
    pub matched: bool,
    pub params: HashMap<String, String>,
}

pub fn url_matches(pattern: &str, url: &str) -> UrlMatchResult {
    if let (Some(expected), Some(actual)) = (origin(pattern), origin(url)) {
        if !expected.eq_ignore_ascii_case(actual) {
            return UrlMatchResult::default();
        }
    }

    let pattern = normalize_url(pattern);
    let url = normalize_url(url);

    let Some((regex, param_names)) = pattern_to_regex(&pattern) else {
        return UrlMatchResult::default();
    };

    let Some(caps) = regex.captures(&url) else {
        return UrlMatchResult::default();
    };

    let params = param_names
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| caps.get(i + 1).map(|m| (name, m.as_str().to_owned())))
        .collect();

    UrlMatchResult {
        matched: true,
        params,
    }
}

/// Path portion of a request URL: origin, query and fragment dropped.
pub fn request_path(url: &str) -> &str {
    let without_origin = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
        }
        None => url,
    };
    without_origin
        .split(['?', '#'])
        .next()
        .unwrap_or(without_origin)
}

/// Scheme and authority of an absolute URL, e.g. `https://api.example.com:8080`.
fn origin(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")? + 3;
    let host_len = url[scheme_end..]
        .find(['/', '?', '#'])
        .unwrap_or(url.len() - scheme_end);
    Some(&url[..scheme_end + host_len])
}

fn normalize_url(url: &str) -> String {
    let trimmed = request_path(url).trim_end_matches('/');
    if trimmed.is_empty() {
        "/".into()
    } else if trimmed.starts_with('/') || trimmed.starts_with('*') {
        trimmed.into()
    } else {
        format!("/{trimmed}")
    }
}

fn pattern_to_regex(pattern: &str) -> Option<(Regex, Vec<String>)> {
    let mut param_names = Vec::new();
    let mut regex_str = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                param_names.push(name);
                regex_str.push_str("([^/]+)");
            }
            ':' if regex_str.ends_with('/') => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next == '/' {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                param_names.push(name);
                regex_str.push_str("([^/]+)");
            }
            '*' => regex_str.push_str(".*"),
            '.' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' | '|' | '\\' | '}' => {
                regex_str.push('\\');
                regex_str.push(c);
            }
            _ => regex_str.push(c),
        }
    }

    let regex = Regex::new(&format!("^{regex_str}/?$")).ok()?;
    Some((regex, param_names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/users", "/api/users", true, &[])]
    #[case("/api/users", "/api/users/", true, &[])]
    #[case("/api/users/{id}", "/api/users/123", true, &[("id", "123")])]
    #[case("/api/users/:id", "/api/users/abc-123", true, &[("id", "abc-123")])]
    #[case("/api/users/{a}/posts/:b", "/api/users/1/posts/2", true, &[("a", "1"), ("b", "2")])]
    #[case("/api/users", "/api/posts", false, &[])]
    #[case("/api/users/{id}", "/api/users", false, &[])]
    #[case("/api/users/{id}", "/api/users/123/extra", false, &[])]
    #[case("/", "/", true, &[])]
    #[case("/users", "/users?admin=true", true, &[])]
    #[case("/users", "http://localhost:3000/users?admin=true", true, &[])]
    #[case("https://api.example.com/users", "/users", true, &[])]
    #[case("https://api.example.com/users", "https://api.example.com/users?x=1", true, &[])]
    #[case("https://api.example.com/users", "https://API.example.com/users", true, &[])]
    #[case("https://api.example.com/users", "http://other.host/users", false, &[])]
    #[case("https://api.example.com/users", "http://api.example.com/users", false, &[])]
    #[case("https://api.example.com:8443/users", "https://api.example.com/users", false, &[])]
    #[case("users", "/users", true, &[])]
    #[case("/api/*", "/api/users/1", true, &[])]
    #[case("/api/*", "/other", false, &[])]
    #[case("/api/users.json", "/api/users.json", true, &[])]
    #[case("/api/users.json", "/api/usersXjson", false, &[])]
    fn test_url_matches(
        #[case] pattern: &str,
        #[case] url: &str,
        #[case] expected: bool,
        #[case] params: &[(&str, &str)],
    ) {
        let result = url_matches(pattern, url);
        assert_eq!(result.matched, expected);
        for (k, v) in params {
            assert_eq!(result.params.get(*k), Some(&(*v).to_owned()));
        }
    }

    #[rstest]
    #[case("/users", "/users")]
    #[case("/users?admin=true", "/users")]
    #[case("/users#top", "/users")]
    #[case("http://localhost/users?x=1", "/users")]
    #[case("http://localhost", "/")]
    fn test_request_path(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(request_path(url), expected);
    }

    #[rstest]
    #[case("/users", None)]
    #[case("http://localhost", Some("http://localhost"))]
    #[case("http://localhost:3000/users?x=1", Some("http://localhost:3000"))]
    #[case("https://api.example.com?x=1", Some("https://api.example.com"))]
    fn test_origin(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(origin(url), expected);
    }
}
