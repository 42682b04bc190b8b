//! Self-contained HTML page for an animated figure.
//!
//! The page pulls the charting library from a CDN and hands it the figure descriptor
//! verbatim; nothing is drawn on the Rust side.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::figure::model::Figure;
use crate::foundation::error::ReplayResult;
use crate::render::sink::{FigureRenderer, write_creating_dirs};

/// Default charting library bundle.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Writes an HTML page that plays the figure in a browser.
#[derive(Clone, Debug)]
pub struct HtmlPageRenderer {
    path: PathBuf,
    script_src: String,
    div_id: String,
}

impl HtmlPageRenderer {
    /// Page at `path` loading the charting library from [`PLOTLY_CDN`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            script_src: PLOTLY_CDN.to_string(),
            div_id: "embedreplay".to_string(),
        }
    }

    /// Load the charting library from `src` instead.
    pub fn script_src(mut self, src: impl Into<String>) -> Self {
        self.script_src = src.into();
        self
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the page text for `fig`.
    pub fn page(&self, fig: &Figure) -> ReplayResult<String> {
        // `</` inside the inline script would close the tag early.
        let json = serde_json::to_string(fig)?.replace("</", "<\\/");
        let title = escape_html(&fig.layout.title.text);

        let mut html = String::with_capacity(json.len() + 1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{title}</title>");
        let _ = writeln!(html, "<script src=\"{}\"></script>", escape_html(&self.script_src));
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(html, "<div id=\"{}\"></div>", self.div_id);
        let _ = write!(
            html,
            r#"<script>
const figure = {json};
Plotly.newPlot("{id}", {{
  data: figure.data,
  layout: figure.layout,
  config: figure.config,
  frames: figure.frames
}});
</script>
"#,
            id = self.div_id
        );
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

impl FigureRenderer for HtmlPageRenderer {
    fn render(&mut self, fig: &Figure) -> anyhow::Result<()> {
        let html = self.page(fig).context("build html page")?;
        write_creating_dirs(&self.path, html.as_bytes())?;
        tracing::info!(path = %self.path.display(), frames = fig.frames.len(), "wrote html page");
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
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

#[cfg(test)]
#[path = "../../tests/unit/render/html.rs"]
mod tests;
