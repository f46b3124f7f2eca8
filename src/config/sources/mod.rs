//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides the file-based source (YAML, JSON, TOML gated by feature
//! flags), [`from_path`] to pick a format by extension, and the
//! [`parse_config_str`] helper for format-specific deserialization.

pub mod file_source;

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::model::Config;
use crate::error::DocgateError;
use file_source::FileSource;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Build a [`FileSource`] for `path`, choosing the format from its extension.
pub fn from_path(path: &Path) -> Result<FileSource, DocgateError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let path = path.to_path_buf();

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(FileSource::new(path, "yaml", |content| {
            serde_yml::from_str::<Config>(content).map_err(|e| Box::new(e) as BoxError)
        })),

        #[cfg(feature = "json")]
        "json" => Ok(FileSource::new(path, "json", |content| {
            serde_json::from_str::<Config>(content).map_err(|e| Box::new(e) as BoxError)
        })),

        #[cfg(feature = "toml")]
        "toml" => Ok(FileSource::new(path, "toml", |content| {
            toml::from_str::<Config>(content).map_err(|e| Box::new(e) as BoxError)
        })),

        other => Err(DocgateError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, DocgateError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| DocgateError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| DocgateError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| DocgateError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(DocgateError::UnsupportedFormat(other.to_string())),
    }
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_is_stable_hex() {
        assert_eq!(
            sha256_hex(b"docgate"),
            sha256_hex(b"docgate"),
        );
        assert_eq!(sha256_hex(b"").len(), 64);
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn unknown_source_extension_is_unsupported() {
        let err = from_path(Path::new("docgate.ini")).err().unwrap();
        assert!(matches!(err, DocgateError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_source_is_named_after_format() {
        use crate::config::ConfigSource;
        let source = from_path(Path::new("docgate.yml")).unwrap();
        assert_eq!(source.name(), "yaml");
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = parse_config_str("ini", "", "docgate.ini").unwrap_err();
        assert!(matches!(err, DocgateError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_parse_error_names_path() {
        let err = parse_config_str("yaml", "viewer: [", "broken.yaml").unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }
}
