use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::figure::model::Figure;

/// Consumer of assembled figures.
///
/// The library never draws anything itself; a renderer decides where the descriptor goes.
pub trait FigureRenderer {
    /// Consume one figure.
    fn render(&mut self, fig: &Figure) -> anyhow::Result<()>;
}

/// In-memory renderer for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryRenderer {
    /// Figures in the order they were rendered.
    pub figures: Vec<Figure>,
}

impl InMemoryRenderer {
    /// Empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently rendered figure.
    pub fn last(&self) -> Option<&Figure> {
        self.figures.last()
    }
}

impl FigureRenderer for InMemoryRenderer {
    fn render(&mut self, fig: &Figure) -> anyhow::Result<()> {
        self.figures.push(fig.clone());
        Ok(())
    }
}

/// Writes the figure descriptor as JSON.
#[derive(Clone, Debug)]
pub struct JsonFileRenderer {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileRenderer {
    /// Pretty-printed JSON at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Toggle pretty printing.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FigureRenderer for JsonFileRenderer {
    fn render(&mut self, fig: &Figure) -> anyhow::Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(fig)
        } else {
            serde_json::to_string(fig)
        }
        .context("serialize figure json")?;
        write_creating_dirs(&self.path, json.as_bytes())?;
        tracing::info!(path = %self.path.display(), bytes = json.len(), "wrote figure json");
        Ok(())
    }
}

pub(crate) fn write_creating_dirs(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
