//! `docgate init`: generate a starter configuration file.
//!
//! Creates a YAML, JSON, or TOML config file with either a minimal or a
//! fully documented template.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::DocgateError;

pub fn execute(args: &InitArgs) -> Result<(), DocgateError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("docgate.{}", args.format.extension())));

    if output.exists() {
        return Err(DocgateError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format, args.full))?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub const fn template(format: &ConfigFormat, full: bool) -> &'static str {
    match (format, full) {
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    }
}

const YAML_MINIMAL: &str = r#"# docgate config

viewer:
  documents:
    - name: "Orders API"
      url: "./orders.swagger.json"
    - name: "Admin API"
      url: "./admin.swagger.json"
"#;

const YAML_FULL: &str = r##"# docgate config
#
# All values shown are defaults. Uncomment and modify as needed.
#
# Requests whose path or query contains "/v1/" are redirected by the
# viewer to http://<page-host>:8080, keeping path and query intact.

# Directory the API description documents are served from
# docs_dir: "./docs"

viewer:
  # title: "API Documentation"      # Page title
  # dom_id: "#swagger-ui"           # Element the viewer mounts into
  # deep_linking: true              # Link to individual operations
  # layout: "StandaloneLayout"      # Requires the "standalone" preset
  # presets: ["apis", "standalone"]
  # plugins: ["download_url"]
  # assets_url: "https://unpkg.com/swagger-ui-dist@5"   # Viewer CSS/JS bundle location

  # Documents listed in the viewer's selector, in order
  documents:
    - name: "Orders API"
      url: "./orders.swagger.json"
    - name: "Admin API"
      url: "./admin.swagger.json"
"##;

const JSON_MINIMAL: &str = r#"{
  "viewer": {
    "documents": [
      { "name": "Orders API", "url": "./orders.swagger.json" },
      { "name": "Admin API", "url": "./admin.swagger.json" }
    ]
  }
}
"#;

const JSON_FULL: &str = r##"{
  "docs_dir": "./docs",
  "viewer": {
    "title": "API Documentation",
    "dom_id": "#swagger-ui",
    "deep_linking": true,
    "layout": "StandaloneLayout",
    "presets": ["apis", "standalone"],
    "plugins": ["download_url"],
    "assets_url": "https://unpkg.com/swagger-ui-dist@5",
    "documents": [
      { "name": "Orders API", "url": "./orders.swagger.json" },
      { "name": "Admin API", "url": "./admin.swagger.json" }
    ]
  }
}
"##;

const TOML_MINIMAL: &str = r#"# docgate config

[[viewer.documents]]
name = "Orders API"
url = "./orders.swagger.json"

[[viewer.documents]]
name = "Admin API"
url = "./admin.swagger.json"
"#;

const TOML_FULL: &str = r##"# docgate config
#
# All values shown are defaults. Uncomment and modify as needed.
#
# Requests whose path or query contains "/v1/" are redirected by the
# viewer to http://<page-host>:8080, keeping path and query intact.

# docs_dir = "./docs"

[viewer]
# title = "API Documentation"
# dom_id = "#swagger-ui"
# deep_linking = true
# layout = "StandaloneLayout"
# presets = ["apis", "standalone"]
# plugins = ["download_url"]
# assets_url = "https://unpkg.com/swagger-ui-dist@5"

[[viewer.documents]]
name = "Orders API"
url = "./orders.swagger.json"

[[viewer.documents]]
name = "Admin API"
url = "./admin.swagger.json"
"##;
