//! Loading OpenAPI documents from files and URLs.

use crate::document::Document;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Errors that can occur while loading a document.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadError {
    /// IO error reading a local file.
    #[error("Failed to read spec {location}: {source}")]
    #[diagnostic(code(openapi_lint::load::io))]
    Io {
        /// File path.
        location: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// HTTP error fetching a remote document.
    #[error("Failed to fetch spec {location}: {source}")]
    #[diagnostic(code(openapi_lint::load::http))]
    Http {
        /// Requested URL.
        location: String,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },

    /// The content is not valid JSON/YAML, or does not fit the model.
    #[error("Failed to parse spec {location}: {message}")]
    #[diagnostic(code(openapi_lint::load::parse))]
    Parse {
        /// File path or URL.
        location: String,
        /// Parser message.
        message: String,
    },

    /// Structural validation found problems.
    #[error("Spec {location} is not a valid OpenAPI 3 document:\n{}", format_issues(.issues))]
    #[diagnostic(
        code(openapi_lint::load::invalid),
        help("load with validation disabled to lint the document anyway")
    )]
    Invalid {
        /// File path or URL.
        location: String,
        /// One message per problem.
        issues: Vec<String>,
    },
}

fn format_issues(issues: &[String]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Loads a document from a file path or an `http(s)://` URL.
///
/// Locations ending in `.json` are parsed as JSON, everything else as YAML.
/// With `validate` set, a structural check runs before returning.
///
/// # Errors
///
/// Returns an error if the document cannot be read, parsed, or (when
/// requested) fails validation.
pub fn load_spec(location: &str, validate: bool) -> Result<Document, LoadError> {
    debug!("Loading spec: {location}");

    let content = if is_url(location) {
        fetch(location)?
    } else {
        std::fs::read_to_string(location).map_err(|e| LoadError::Io {
            location: location.to_string(),
            source: e,
        })?
    };

    let document = parse(location, &content)?;

    if validate {
        let issues = validate_document(&document);
        if !issues.is_empty() {
            return Err(LoadError::Invalid {
                location: location.to_string(),
                issues,
            });
        }
    }

    Ok(document)
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn fetch(url: &str) -> Result<String, LoadError> {
    let to_err = |e| LoadError::Http {
        location: url.to_string(),
        source: e,
    };
    reqwest::blocking::get(url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(reqwest::blocking::Response::text)
        .map_err(to_err)
}

fn parse(location: &str, content: &str) -> Result<Document, LoadError> {
    let to_err = |message: String| LoadError::Parse {
        location: location.to_string(),
        message,
    };

    let path = location.split(['?', '#']).next().unwrap_or(location);
    let raw: Value = if path.ends_with(".json") {
        serde_json::from_str(content).map_err(|e| to_err(e.to_string()))?
    } else {
        // YAML keys such as `200:` are integers; going through serde_yaml's
        // own value turns them into JSON string keys.
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| to_err(e.to_string()))?;
        serde_json::to_value(yaml).map_err(|e| to_err(e.to_string()))?
    };

    Document::from_value(raw).map_err(|e| to_err(e.to_string()))
}

/// Light structural validation of an OpenAPI 3 document.
fn validate_document(document: &Document) -> Vec<String> {
    let spec = document.spec();
    let mut issues = Vec::new();

    if spec.openapi.is_empty() {
        issues.push("openapi: missing version".to_string());
    } else if !spec.openapi.starts_with("3.") {
        issues.push(format!(
            "openapi: unsupported version `{}`, expected 3.x",
            spec.openapi
        ));
    }
    if spec.info.title.is_empty() {
        issues.push("info.title: missing".to_string());
    }
    if spec.info.version.is_empty() {
        issues.push("info.version: missing".to_string());
    }

    let mut operation_ids: BTreeMap<&str, usize> = BTreeMap::new();
    for (path, item) in document.paths() {
        if !path.starts_with('/') {
            issues.push(format!("paths.{path}: must start with `/`"));
        }
        for (_, op) in item.operations() {
            if let Some(id) = op.operation_id.as_deref().filter(|id| !id.is_empty()) {
                *operation_ids.entry(id).or_default() += 1;
            }
        }
    }
    for (id, count) in operation_ids {
        if count > 1 {
            issues.push(format!(
                "operationId `{id}` is used by {count} operations"
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const PETSTORE: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        200:
          description: ok
"#;

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn loads_yaml_with_integer_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "petstore.yaml", PETSTORE);
        let doc = load_spec(&path, true).unwrap();
        assert_eq!(doc.spec().info.title, "Petstore");
        assert!(doc.raw().pointer("/paths/~1pets/get/responses/200").is_some());
    }

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "petstore.json",
            r#"{"openapi": "3.1.0", "info": {"title": "t", "version": "1"}, "paths": {}}"#,
        );
        assert!(load_spec(&path, true).is_ok());
    }

    #[test]
    fn validation_reports_every_issue() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "bad.yaml",
            r#"
openapi: "2.0"
paths:
  pets:
    get: {operationId: dup}
  /other:
    get: {operationId: dup}
"#,
        );
        let Err(LoadError::Invalid { issues, .. }) = load_spec(&path, true) else {
            panic!("expected validation failure");
        };
        assert_eq!(issues.len(), 5, "{issues:#?}");
        assert!(issues.iter().any(|i| i.contains("unsupported version")));
        assert!(issues.iter().any(|i| i.contains("paths.pets")));
        assert!(issues.iter().any(|i| i.contains("`dup` is used by 2")));

        assert!(load_spec(&path, false).is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_spec("/nonexistent/spec.yaml", false),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn malformed_content_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "broken.json", "{ not json");
        assert!(matches!(load_spec(&path, false), Err(LoadError::Parse { .. })));
    }
}
