//! Renders the `index.html` host page.

use crate::config::model::{Preset, ViewerConfig};

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[must_use]
pub fn render_index(viewer: &ViewerConfig) -> String {
    let assets = escape_html(viewer.assets_url.trim_end_matches('/'));
    let title = escape_html(&viewer.title);
    let anchor = escape_html(viewer.dom_id.trim_start_matches('#'));

    let standalone = if viewer.presets.contains(&Preset::Standalone) {
        format!(
            "    <script src=\"{assets}/swagger-ui-standalone-preset.js\" charset=\"UTF-8\"></script>\n"
        )
    } else {
        String::new()
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         \x20 <head>\n\
         \x20   <meta charset=\"UTF-8\">\n\
         \x20   <title>{title}</title>\n\
         \x20   <link rel=\"stylesheet\" type=\"text/css\" href=\"{assets}/swagger-ui.css\" />\n\
         \x20 </head>\n\
         \x20 <body>\n\
         \x20   <div id=\"{anchor}\"></div>\n\
         \x20   <script src=\"{assets}/swagger-ui-bundle.js\" charset=\"UTF-8\"></script>\n\
         {standalone}\
         \x20   <script src=\"./swagger-initializer.js\" charset=\"UTF-8\"></script>\n\
         \x20 </body>\n\
         </html>\n"
    )
}
