//! `docgate validate`: check a configuration file for errors.
//!
//! Builds a [`ValidationReport`] for the file and prints it as text or
//! JSON. A valid report describes what the viewer would show (documents,
//! layout, asset location); an invalid one lists every error found.

use std::path::Path;

use serde::Serialize;

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::model::{ApiDocument, Config};
use crate::config::sources::parse_config_str;
use crate::config::validation;
use crate::error::{DocgateError, ValidationError};

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Serialize)]
pub struct ViewerSummary {
    pub docs_dir: String,
    pub layout: String,
    pub assets_url: String,
    pub documents: Vec<ApiDocument>,
}

#[derive(Debug, Serialize)]
pub struct ErrorEntry {
    pub location: String,
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&ValidationError> for ErrorEntry {
    fn from(e: &ValidationError) -> Self {
        Self {
            location: e.location.clone(),
            field: e.field.clone(),
            message: e.message.clone(),
            suggestion: e.suggestion.clone(),
        }
    }
}

impl ViewerSummary {
    fn of(config: &Config) -> Self {
        Self {
            docs_dir: config.docs_dir.display().to_string(),
            layout: config.viewer.layout.clone(),
            assets_url: config.viewer.assets_url.clone(),
            documents: config.viewer.documents.clone(),
        }
    }
}

/// Result of running [`validation::validate`] on a parsed config.
pub type Outcome = Result<(), Vec<ValidationError>>;

/// Parse and validate `path`. Parse failures are errors; validation
/// failures come back in the [`Outcome`].
pub fn check(path: &Path) -> Result<(Config, Outcome), DocgateError> {
    if !path.exists() {
        return Err(DocgateError::ConfigFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = parse_config_str(ext, &content, &path.display().to_string())?;
    let outcome = validation::validate(&config);
    Ok((config, outcome))
}

#[must_use]
pub fn build_report(path: &Path, config: &Config, outcome: &Outcome) -> ValidationReport {
    let file = path.display().to_string();
    match outcome {
        Ok(()) => ValidationReport {
            valid: true,
            file,
            viewer: Some(ViewerSummary::of(config)),
            errors: Vec::new(),
        },
        Err(errors) => ValidationReport {
            valid: false,
            file,
            viewer: None,
            errors: errors.iter().map(ErrorEntry::from).collect(),
        },
    }
}

pub fn execute(args: &ValidateArgs) -> Result<(), DocgateError> {
    let (config, outcome) = check(&args.config)?;
    let report = build_report(&args.config, &config, &outcome);

    match args.format {
        ValidateFormat::Json => match serde_json::to_string(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("cannot encode report: {e}"),
        },
        ValidateFormat::Text if report.valid => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&report.file, &config)
            );
        }
        ValidateFormat::Text => {
            eprintln!("\u{2717} {} has {} errors\n", report.file, report.errors.len());
        }
    }

    outcome.map_err(|errors| DocgateError::ConfigValidation { errors })
}
