//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Config`] for structural
//! errors such as an empty document list, duplicate or blank document
//! names, unusable document URLs, a malformed DOM selector, and a layout
//! whose preset is missing. Returns a list of [`ValidationError`] values
//! with per-field suggestions.

use std::collections::HashSet;

use url::Url;

use super::model::{Config, Preset};
use crate::error::ValidationError;

/// Layout that only exists when the standalone preset is loaded.
pub const STANDALONE_LAYOUT: &str = "StandaloneLayout";

/// Validate a document or asset URL: a relative path, or an absolute
/// http(s) URL. Returns `Ok(())` or a human-readable error.
pub fn validate_document_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("url cannot be empty".into());
    }
    if url.chars().any(char::is_whitespace) {
        return Err(format!("'{url}' contains whitespace"));
    }
    if url.contains("://") {
        return validate_http_url(url);
    }
    Ok(())
}

/// Validate an absolute http(s) URL. Returns `Ok(())` or a human-readable error.
pub fn validate_http_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme == "http" || scheme == "https" {
                Ok(())
            } else {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

/// Validate a DOM anchor selector. Returns `Ok(())` or a human-readable error.
pub fn validate_dom_id(dom_id: &str) -> Result<(), String> {
    let Some(id) = dom_id.strip_prefix('#') else {
        return Err(format!("'{dom_id}' must be an id selector starting with '#'"));
    };
    if id.is_empty() || id.chars().any(|c| c.is_whitespace() || c == '#') {
        return Err(format!("'{dom_id}' is not a valid id selector"));
    }
    Ok(())
}

fn error(location: &str, field: &str, message: String) -> ValidationError {
    ValidationError {
        location: location.into(),
        field: field.into(),
        message,
        suggestion: None,
    }
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let viewer = &config.viewer;

    if config.docs_dir.as_os_str().is_empty() {
        errors.push(error("(root)", "docs_dir", "docs_dir cannot be empty".into()));
    }

    if let Err(msg) = validate_dom_id(&viewer.dom_id) {
        let mut e = error("viewer", "dom_id", msg);
        if !viewer.dom_id.is_empty() && !viewer.dom_id.starts_with('#') {
            e.suggestion = Some(format!("did you mean '#{}'?", viewer.dom_id));
        }
        errors.push(e);
    }

    if viewer.layout.trim().is_empty() {
        errors.push(error("viewer", "layout", "layout cannot be empty".into()));
    } else if viewer.layout == STANDALONE_LAYOUT && !viewer.presets.contains(&Preset::Standalone)
    {
        let mut e = error(
            "viewer",
            "presets",
            format!("layout '{STANDALONE_LAYOUT}' requires the 'standalone' preset"),
        );
        e.suggestion = Some("add 'standalone' to viewer.presets".into());
        errors.push(e);
    }

    let mut seen_presets = HashSet::new();
    for preset in &viewer.presets {
        if !seen_presets.insert(preset) {
            errors.push(error(
                "viewer",
                "presets",
                format!("duplicate preset {preset:?}"),
            ));
        }
    }

    let mut seen_plugins = HashSet::new();
    for plugin in &viewer.plugins {
        if !seen_plugins.insert(plugin) {
            errors.push(error(
                "viewer",
                "plugins",
                format!("duplicate plugin {plugin:?}"),
            ));
        }
    }

    if let Err(msg) = validate_document_url(&viewer.assets_url) {
        errors.push(error("viewer", "assets_url", msg));
    }

    if viewer.documents.is_empty() {
        errors.push(error(
            "viewer",
            "documents",
            "at least one document must be defined".into(),
        ));
        return Err(errors);
    }

    let mut seen_names = HashSet::new();

    for (i, doc) in viewer.documents.iter().enumerate() {
        let doc_id = if doc.name.trim().is_empty() {
            format!("documents[{i}]")
        } else {
            doc.name.clone()
        };

        if doc.name.trim().is_empty() {
            errors.push(error(&doc_id, "name", "name cannot be empty".into()));
        } else if !seen_names.insert(doc.name.as_str()) {
            errors.push(error(&doc_id, "name", "duplicate document name".into()));
        }

        if let Err(msg) = validate_document_url(&doc.url) {
            errors.push(error(&doc_id, "url", msg));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &Config) -> String {
    let viewer = &config.viewer;
    let mut lines = vec![format!(
        "  {} documents, layout {}\n",
        config.total_documents(),
        viewer.layout
    )];

    for doc in &viewer.documents {
        lines.push(format!("  {}  -> {}", doc.name, doc.url));
    }
    lines.push(format!("\n  docs dir: {}", config.docs_dir.display()));
    lines.push(format!("  assets:   {}", viewer.assets_url));

    format!("{} is valid\n{}", path, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{ApiDocument, Config};

    fn doc(name: &str, url: &str) -> ApiDocument {
        ApiDocument {
            name: name.into(),
            url: url.into(),
        }
    }

    #[test]
    fn default_config_passes() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn empty_documents_fails() {
        let mut config = Config::default();
        config.viewer.documents.clear();
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("at least one document"));
    }

    #[test]
    fn duplicate_names_fail() {
        let mut config = Config::default();
        config.viewer.documents = vec![doc("Orders API", "./a.json"), doc("Orders API", "./b.json")];
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("duplicate document name")));
    }

    #[test]
    fn blank_name_uses_index_location() {
        let mut config = Config::default();
        config.viewer.documents = vec![doc(" ", "./a.json")];
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors[0].location, "documents[0]");
    }

    #[test]
    fn bad_document_urls_fail() {
        let mut config = Config::default();
        config.viewer.documents = vec![
            doc("Empty", ""),
            doc("Spaces", "./my docs.json"),
            doc("Ftp", "ftp://example.com/a.json"),
        ];
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.iter().filter(|e| e.field == "url").count(), 3);
    }

    #[test]
    fn absolute_document_url_passes() {
        let mut config = Config::default();
        config.viewer.documents = vec![doc("Remote", "https://example.com/openapi.json")];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn dom_id_without_hash_suggests_fix() {
        let mut config = Config::default();
        config.viewer.dom_id = "swagger-ui".into();
        let errors = validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.suggestion.as_deref() == Some("did you mean '#swagger-ui'?")));
    }

    #[test]
    fn standalone_layout_requires_preset() {
        let mut config = Config::default();
        config.viewer.presets = vec![Preset::Apis];
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "presets"));

        config.viewer.layout = "BaseLayout".into();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn duplicate_preset_fails() {
        let mut config = Config::default();
        config.viewer.presets = vec![Preset::Apis, Preset::Standalone, Preset::Apis];
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("duplicate preset")));
    }

    #[test]
    fn assets_url_may_be_local() {
        let mut config = Config::default();
        config.viewer.assets_url = ".".into();
        assert!(validate(&config).is_ok());

        config.viewer.assets_url = "file:///opt/swagger".into();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "assets_url"));
    }

    #[test]
    fn report_lists_documents() {
        let report = format_validation_report("docgate.yaml", &Config::default());
        assert!(report.starts_with("docgate.yaml is valid"));
        assert!(report.contains("Orders API  -> ./orders.swagger.json"));
        assert!(report.contains("Admin API  -> ./admin.swagger.json"));
    }
}
