//! Serde data structures for the docgate configuration file.
//!
//! Contains [`Config`] (the root), [`ViewerConfig`], [`ApiDocument`],
//! [`Preset`] and [`Plugin`]. All types derive `Serialize` and
//! `Deserialize` with `deny_unknown_fields` for strict parsing, and
//! default-valued fields are left out when serializing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("./docs")
}

fn default_dom_id() -> String {
    "#swagger-ui".to_string()
}

fn default_layout() -> String {
    "StandaloneLayout".to_string()
}

fn default_assets_url() -> String {
    "https://unpkg.com/swagger-ui-dist@5".to_string()
}

fn default_title() -> String {
    "API Documentation".to_string()
}

fn default_presets() -> Vec<Preset> {
    vec![Preset::Apis, Preset::Standalone]
}

fn default_plugins() -> Vec<Plugin> {
    vec![Plugin::DownloadUrl]
}

fn default_documents() -> Vec<ApiDocument> {
    vec![
        ApiDocument {
            name: "Orders API".into(),
            url: "./orders.swagger.json".into(),
        },
        ApiDocument {
            name: "Admin API".into(),
            url: "./admin.swagger.json".into(),
        },
    ]
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_default_docs_dir(v: &Path) -> bool {
    v == default_docs_dir()
}

fn is_default_dom_id(v: &str) -> bool {
    v == default_dom_id()
}

fn is_default_layout(v: &str) -> bool {
    v == default_layout()
}

fn is_default_assets_url(v: &str) -> bool {
    v == default_assets_url()
}

fn is_default_title(v: &str) -> bool {
    v == default_title()
}

fn is_default_presets(v: &[Preset]) -> bool {
    v == default_presets().as_slice()
}

fn is_default_plugins(v: &[Plugin]) -> bool {
    v == default_plugins().as_slice()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_docs_dir", skip_serializing_if = "is_default_docs_dir")]
    pub docs_dir: PathBuf,

    #[serde(default)]
    pub viewer: ViewerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            viewer: ViewerConfig::default(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn total_documents(&self) -> usize {
        self.viewer.documents.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    #[serde(default = "default_title", skip_serializing_if = "is_default_title")]
    pub title: String,

    #[serde(default = "default_dom_id", skip_serializing_if = "is_default_dom_id")]
    pub dom_id: String,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub deep_linking: bool,

    #[serde(default = "default_layout", skip_serializing_if = "is_default_layout")]
    pub layout: String,

    #[serde(
        default = "default_presets",
        skip_serializing_if = "is_default_presets"
    )]
    pub presets: Vec<Preset>,

    #[serde(
        default = "default_plugins",
        skip_serializing_if = "is_default_plugins"
    )]
    pub plugins: Vec<Plugin>,

    #[serde(
        default = "default_assets_url",
        skip_serializing_if = "is_default_assets_url"
    )]
    pub assets_url: String,

    #[serde(default = "default_documents")]
    pub documents: Vec<ApiDocument>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            dom_id: default_dom_id(),
            deep_linking: default_true(),
            layout: default_layout(),
            presets: default_presets(),
            plugins: default_plugins(),
            assets_url: default_assets_url(),
            documents: default_documents(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiDocument {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Apis,
    Standalone,
}

impl Preset {
    /// JavaScript expression the viewer expects for this preset.
    #[must_use]
    pub const fn js_expr(self) -> &'static str {
        match self {
            Self::Apis => "SwaggerUIBundle.presets.apis",
            Self::Standalone => "SwaggerUIStandalonePreset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Plugin {
    DownloadUrl,
}

impl Plugin {
    #[must_use]
    pub const fn js_expr(self) -> &'static str {
        match self {
            Self::DownloadUrl => "SwaggerUIBundle.plugins.DownloadUrl",
        }
    }
}
