//! Renders `swagger-initializer.js`, the viewer bootstrap script.
//!
//! The script defines a named interceptor, `rewriteRequest`, that posts
//! each outgoing request to `./rewrite` and applies the returned URL, and
//! a `createViewer` function that builds the viewer from the configured
//! documents. The viewer instance stays local to the page load handler.

use std::fmt::Write;

use crate::config::model::ViewerConfig;

/// Path of the rewrite endpoint, relative to the page.
pub const REWRITE_ENDPOINT: &str = "./rewrite";

const INTERCEPTOR: &str = r#"function rewriteRequest(request) {
  return fetch(REWRITE_ENDPOINT, {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ url: request.url, method: request.method })
  })
    .then(function (response) {
      if (response.ok) {
        return response.json();
      }
      return response.text().then(function (text) {
        var reason = text || response.statusText;
        try {
          reason = JSON.parse(text).error || reason;
        } catch (ignored) {}
        throw new Error("request rewrite failed (" + response.status + "): " + reason);
      });
    })
    .then(function (rewritten) {
      request.url = rewritten.url;
      return request;
    });
}
"#;

/// JSON-encode a string for embedding in the script.
fn js_string(value: &str) -> String {
    // Serializing a &str cannot fail
    serde_json::to_string(value).unwrap_or_default()
}

#[must_use]
pub fn render_initializer(viewer: &ViewerConfig) -> String {
    let mut js = String::new();

    // write! to String is infallible
    let _ = writeln!(js, "// Generated by docgate. Edit the config file instead.\n");
    let _ = writeln!(js, "const REWRITE_ENDPOINT = {};\n", js_string(REWRITE_ENDPOINT));
    js.push_str(INTERCEPTOR);
    js.push('\n');

    js.push_str("function createViewer() {\n  return SwaggerUIBundle({\n    urls: [\n");
    for (i, doc) in viewer.documents.iter().enumerate() {
        let sep = if i + 1 < viewer.documents.len() { "," } else { "" };
        let _ = writeln!(
            js,
            "      {{ name: {}, url: {} }}{sep}",
            js_string(&doc.name),
            js_string(&doc.url)
        );
    }
    js.push_str("    ],\n");

    let _ = writeln!(js, "    dom_id: {},", js_string(&viewer.dom_id));
    let _ = writeln!(js, "    deepLinking: {},", viewer.deep_linking);

    let presets: Vec<&str> = viewer.presets.iter().map(|p| p.js_expr()).collect();
    let _ = writeln!(js, "    presets: [{}],", presets.join(", "));

    let plugins: Vec<&str> = viewer.plugins.iter().map(|p| p.js_expr()).collect();
    let _ = writeln!(js, "    plugins: [{}],", plugins.join(", "));

    let _ = writeln!(js, "    layout: {},", js_string(&viewer.layout));
    js.push_str("    requestInterceptor: rewriteRequest\n  });\n}\n\n");

    js.push_str("window.onload = function () {\n  createViewer();\n};\n");
    js
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{ApiDocument, Preset};

    #[test]
    fn default_script_lists_both_documents() {
        let js = render_initializer(&ViewerConfig::default());
        assert!(js.contains(r#"{ name: "Orders API", url: "./orders.swagger.json" },"#));
        assert!(js.contains(r#"{ name: "Admin API", url: "./admin.swagger.json" }"#));
        assert!(js.contains(r##"dom_id: "#swagger-ui","##));
        assert!(js.contains("deepLinking: true,"));
        assert!(js.contains(
            "presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],"
        ));
        assert!(js.contains("plugins: [SwaggerUIBundle.plugins.DownloadUrl],"));
        assert!(js.contains(r#"layout: "StandaloneLayout","#));
    }

    #[test]
    fn interceptor_is_passed_by_name() {
        let js = render_initializer(&ViewerConfig::default());
        assert!(js.contains("function rewriteRequest(request)"));
        assert!(js.contains("requestInterceptor: rewriteRequest\n"));
        assert!(js.contains(r#"const REWRITE_ENDPOINT = "./rewrite";"#));
    }

    #[test]
    fn interceptor_checks_status_before_parsing() {
        let js = render_initializer(&ViewerConfig::default());
        let ok_check = js.find("if (response.ok)").unwrap();
        let parse = js.find("return response.json();").unwrap();
        assert!(ok_check < parse);
        // 413 and 400 answers from the body limit and extractor are plain text.
        assert!(js.contains("response.text()"));
        assert!(js.contains("JSON.parse(text).error"));
        assert!(js.contains("response.status"));
    }

    #[test]
    fn no_global_viewer_slot() {
        let js = render_initializer(&ViewerConfig::default());
        assert!(!js.contains("window.ui"));
    }

    #[test]
    fn quotes_in_names_are_escaped() {
        let viewer = ViewerConfig {
            documents: vec![ApiDocument {
                name: r#"The "Orders" API"#.into(),
                url: "./orders.json".into(),
            }],
            presets: vec![Preset::Apis],
            layout: "BaseLayout".into(),
            ..ViewerConfig::default()
        };
        let js = render_initializer(&viewer);
        assert!(js.contains(r#"{ name: "The \"Orders\" API", url: "./orders.json" }"#));
        assert!(js.contains("presets: [SwaggerUIBundle.presets.apis],"));
    }
}
