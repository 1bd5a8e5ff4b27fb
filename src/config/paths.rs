//! Path file parsing.
//!
//! A path file is a sequence of `{path, url}` records:
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```
//!
//! or the same records as a JSON array. Records are validated before they
//! become a lookup source; a file that fails to parse or validate never
//! contributes a source.

use std::path::Path;

use crate::config::loader::{read_file, ConfigError};
use crate::config::schema::LayerKind;
use crate::config::validation::validate_entries;
use crate::routing::PathEntry;

/// Serialization format of a path file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFileFormat {
    Yaml,
    Json,
}

impl PathFileFormat {
    /// Format read by a file-backed layer kind.
    pub fn for_layer(kind: LayerKind) -> Option<Self> {
        match kind {
            LayerKind::Yaml => Some(Self::Yaml),
            LayerKind::Json => Some(Self::Json),
            LayerKind::Map | LayerKind::Store => None,
        }
    }
}

/// Parse path records from `content`. `origin` only labels errors.
pub fn parse_path_entries(
    content: &str,
    format: PathFileFormat,
    origin: &Path,
) -> Result<Vec<PathEntry>, ConfigError> {
    match format {
        // An empty or null YAML document is an empty list; empty JSON is an error.
        PathFileFormat::Yaml if content.trim().is_empty() => Ok(Vec::new()),
        PathFileFormat::Yaml => serde_yaml::from_str::<Option<Vec<PathEntry>>>(content)
            .map(Option::unwrap_or_default)
            .map_err(|source| ConfigError::Yaml {
                path: origin.to_path_buf(),
                source,
            }),
        PathFileFormat::Json => serde_json::from_str(content).map_err(|source| ConfigError::Json {
            path: origin.to_path_buf(),
            source,
        }),
    }
}

/// Read, parse and validate a path file.
pub fn load_path_file(path: &Path, format: PathFileFormat) -> Result<Vec<PathEntry>, ConfigError> {
    let content = read_file(path)?;
    let entries = parse_path_entries(&content, format, path)?;
    validate_entries(&entries).map_err(ConfigError::Validation)?;

    tracing::debug!(
        path = %path.display(),
        format = ?format,
        entries = entries.len(),
        "Path file loaded"
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = "
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";

    #[test]
    fn test_parse_yaml() {
        let entries = parse_path_entries(YAML, PathFileFormat::Yaml, Path::new("paths.yml")).unwrap();
        assert_eq!(
            entries,
            vec![
                PathEntry::new("/urlshort", "https://github.com/gophercises/urlshort"),
                PathEntry::new(
                    "/urlshort-final",
                    "https://github.com/gophercises/urlshort/tree/solution"
                ),
            ]
        );
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[{"path": "/json", "url": "https://www.json.org"}]"#;
        let entries = parse_path_entries(json, PathFileFormat::Json, Path::new("paths.json")).unwrap();
        assert_eq!(entries, vec![PathEntry::new("/json", "https://www.json.org")]);
    }

    #[test]
    fn test_empty_documents() {
        let origin = Path::new("empty");
        assert!(parse_path_entries("", PathFileFormat::Yaml, origin).unwrap().is_empty());
        assert!(parse_path_entries("~\n", PathFileFormat::Yaml, origin).unwrap().is_empty());
        assert!(parse_path_entries("null", PathFileFormat::Yaml, origin).unwrap().is_empty());
        assert!(parse_path_entries("[]", PathFileFormat::Json, origin).unwrap().is_empty());
        assert!(matches!(
            parse_path_entries("", PathFileFormat::Json, origin),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_malformed_input() {
        let origin = Path::new("bad");
        assert!(matches!(
            parse_path_entries("- path: [unclosed", PathFileFormat::Yaml, origin),
            Err(ConfigError::Yaml { .. })
        ));
        assert!(matches!(
            parse_path_entries(r#"{"path": "/a"}"#, PathFileFormat::Json, origin),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_load_path_file_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- path: no-slash\n  url: https://example.com").unwrap();

        let err = load_path_file(file.path(), PathFileFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_format_for_layer() {
        assert_eq!(PathFileFormat::for_layer(LayerKind::Yaml), Some(PathFileFormat::Yaml));
        assert_eq!(PathFileFormat::for_layer(LayerKind::Json), Some(PathFileFormat::Json));
        assert_eq!(PathFileFormat::for_layer(LayerKind::Store), None);
    }
}
