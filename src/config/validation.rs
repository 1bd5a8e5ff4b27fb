//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check path entries: paths start with `/`, targets are absolute URLs
//! - Check layers carry what their kind needs
//! - Validate value ranges (timeouts > 0, addresses are `host:port`)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{AppConfig, LayerKind};
use crate::routing::PathEntry;

/// A single semantic problem found in configuration or a path file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("path {0:?} must start with '/'")]
    InvalidPath(String),

    #[error("target {url:?} for path {path:?} is not an absolute URL: {reason}")]
    InvalidTarget {
        path: String,
        url: String,
        reason: String,
    },

    #[error("layer #{index} ({kind}) requires a file")]
    MissingFile { index: usize, kind: LayerKind },

    #[error("layer #{index} ({kind}) does not take {field}")]
    UnexpectedField {
        index: usize,
        kind: LayerKind,
        field: &'static str,
    },

    #[error("store bucket name must not be empty")]
    EmptyBucket,

    #[error("invalid {field} address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a whole configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_host_port(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    for (index, layer) in config.layers.iter().enumerate() {
        match layer.kind {
            LayerKind::Yaml | LayerKind::Json => {
                if layer.file.is_none() {
                    errors.push(ValidationError::MissingFile {
                        index,
                        kind: layer.kind,
                    });
                }
                if !layer.entries.is_empty() {
                    errors.push(ValidationError::UnexpectedField {
                        index,
                        kind: layer.kind,
                        field: "entries",
                    });
                }
            }
            LayerKind::Map | LayerKind::Store => {
                if layer.file.is_some() {
                    errors.push(ValidationError::UnexpectedField {
                        index,
                        kind: layer.kind,
                        field: "file",
                    });
                }
                if layer.kind == LayerKind::Store && !layer.entries.is_empty() {
                    errors.push(ValidationError::UnexpectedField {
                        index,
                        kind: layer.kind,
                        field: "entries",
                    });
                }
                collect_entry_errors(&layer.entries, &mut errors);
            }
        }
    }

    if config.store.bucket.is_empty() {
        errors.push(ValidationError::EmptyBucket);
    }
    if config.store.open_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("store.open_timeout_ms"));
    }
    collect_entry_errors(&config.store.seed, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Bind addresses may name a host; resolution happens when binding.
fn is_host_port(value: &str) -> bool {
    if value.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match value.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && !host.contains(':') && port.parse::<u16>().is_ok(),
        None => false,
    }
}

/// Validate path entries read from a path file.
pub fn validate_entries(entries: &[PathEntry]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    collect_entry_errors(entries, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_entry_errors(entries: &[PathEntry], errors: &mut Vec<ValidationError>) {
    for entry in entries {
        if !entry.path.starts_with('/') {
            errors.push(ValidationError::InvalidPath(entry.path.clone()));
        }
        // url::Url only parses absolute URLs; relative input is an error.
        if let Err(e) = url::Url::parse(&entry.target) {
            errors.push(ValidationError::InvalidTarget {
                path: entry.path.clone(),
                url: entry.target.clone(),
                reason: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LayerConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.store.bucket.clear();
        config.layers = vec![
            LayerConfig::map(vec![PathEntry::new("nope", "also-nope")]),
            LayerConfig {
                file: None,
                ..LayerConfig::file(LayerKind::Yaml, "x.yml")
            },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6, "{errors:?}");
        assert!(errors.contains(&ValidationError::EmptyBucket));
        assert!(errors.contains(&ValidationError::InvalidPath("nope".into())));
        assert!(errors.contains(&ValidationError::MissingFile {
            index: 1,
            kind: LayerKind::Yaml
        }));
    }

    #[test]
    fn test_bind_address_accepts_host_names() {
        let mut config = AppConfig::default();
        for ok in ["localhost:8080", "[::1]:8080", "127.0.0.1:0"] {
            config.listener.bind_address = ok.into();
            assert_eq!(validate_config(&config), Ok(()), "{ok}");
        }
        for bad in ["localhost", ":8080", "localhost:http", "::1:8080"] {
            config.listener.bind_address = bad.into();
            assert!(validate_config(&config).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_validate_entries() {
        let ok = vec![PathEntry::new("/a", "https://example.com/a")];
        assert!(validate_entries(&ok).is_ok());

        let bad = vec![
            PathEntry::new("/a", "/relative"),
            PathEntry::new("b", "https://example.com"),
        ];
        let errors = validate_entries(&bad).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::InvalidTarget { .. }));
        assert_eq!(errors[1].to_string(), "path \"b\" must start with '/'");
    }
}
