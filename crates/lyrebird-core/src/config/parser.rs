//! Definition file parsing (YAML/JSON/JSONC).

use crate::config::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Definition file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get file type from path extension
pub fn get_file_type(path: impl AsRef<Path>) -> ConfigFileType {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

/// Strip `//` and `/* */` comments from JSONC content, leaving string literals intact.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                // Line comment: drop up to, not including, the line break
                while chars.next_if(|&n| n != '\n' && n != '\r').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let stripped = strip_json_comments(content);
    serde_json::from_str(&stripped).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse content based on the file type of `path`
pub fn parse_config<T: DeserializeOwned>(
    content: &str,
    path: impl AsRef<Path>,
) -> Result<T, ConfigError> {
    let path = path.as_ref();
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(
            path.display().to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::definition::DefinitionConfig;
    use rstest::rstest;

    #[rstest]
    #[case("mocks.yaml", ConfigFileType::Yaml)]
    #[case("mocks.YAML", ConfigFileType::Yaml)]
    #[case("mocks.yml", ConfigFileType::Yaml)]
    #[case("mocks.json", ConfigFileType::Json)]
    #[case("mocks.JSON", ConfigFileType::Json)]
    #[case("mocks.jsonc", ConfigFileType::Jsonc)]
    #[case("dir.d/mocks.jsonc", ConfigFileType::Jsonc)]
    #[case("mocks.txt", ConfigFileType::Unknown)]
    #[case("mocks", ConfigFileType::Unknown)]
    #[case("", ConfigFileType::Unknown)]
    fn test_get_file_type(#[case] path: &str, #[case] expected: ConfigFileType) {
        assert_eq!(get_file_type(path), expected);
    }

    #[rstest]
    #[case(r#"{"key": "value"}"#, r#"{"key": "value"}"#)]
    #[case(r#"{"key": "value"} // comment"#, r#"{"key": "value"} "#)]
    #[case(r#"{"key": "value"} /* block */"#, r#"{"key": "value"} "#)]
    #[case("{\"a\": 1} // c\n{\"b\": 2}", "{\"a\": 1} \n{\"b\": 2}")]
    #[case("{\"a\": /* inline */ 1}", "{\"a\":  1}")]
    #[case("/* multi\nline */{}", "{}")]
    #[case(r#"{"url": "http://localhost/users"}"#, r#"{"url": "http://localhost/users"}"#)]
    #[case(r#"{"key": "value // not a comment"}"#, r#"{"key": "value // not a comment"}"#)]
    #[case(r#"{"key": "quote \" /* still string */"}"#, r#"{"key": "quote \" /* still string */"}"#)]
    #[case(r#"{"key": "ends with \\"} // c"#, r#"{"key": "ends with \\"} "#)]
    fn test_strip_json_comments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_json_comments(input), expected);
    }

    #[rstest]
    fn test_parse_json_invalid() {
        let result: Result<serde_json::Value, _> = parse_json("invalid json");
        assert!(matches!(result.unwrap_err(), ConfigError::Json(_)));
    }

    #[rstest]
    fn test_parse_yaml_invalid() {
        let result: Result<serde_json::Value, _> = parse_yaml("invalid: yaml: [");
        assert!(matches!(result.unwrap_err(), ConfigError::Yaml(_)));
    }

    #[rstest]
    fn test_parse_config_json() {
        let content = r#"[{"name": "getUsers", "url": "/users"}]"#;
        let result: Vec<DefinitionConfig> = parse_config(content, "mocks.json").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].url, "/users");
    }

    #[rstest]
    fn test_parse_config_jsonc() {
        let content = r#"[
            // list users
            {"name": "getUsers", "url": "/users", "status": 200} /* trailing */
        ]"#;
        let result: Vec<DefinitionConfig> = parse_config(content, "mocks.jsonc").unwrap();
        assert_eq!(result[0].status, Some(200));
    }

    #[rstest]
    fn test_parse_config_yaml() {
        let content = "- name: register\n  method: POST\n  url: /register\n";
        let result: Vec<DefinitionConfig> = parse_config(content, "mocks.yml").unwrap();
        assert_eq!(result[0].name.as_deref(), Some("register"));
    }

    #[rstest]
    #[case("mocks.txt")]
    #[case("mocks.unknown")]
    #[case("")]
    fn test_parse_config_unknown_file_type(#[case] path: &str) {
        let result: Result<serde_json::Value, _> = parse_config("[]", path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::UnknownFileType(_)
        ));
    }
}
