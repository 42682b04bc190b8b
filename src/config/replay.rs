use std::path::Path;

use crate::{
    capture::policy::CapturePolicy,
    figure::assembler::FigureSettings,
    foundation::error::{ReplayError, ReplayResult},
    reducer::params::ReducerParams,
};

/// Settings of one replay run, loadable from a JSON file.
///
/// Every section is optional; missing fields fall back to the reference settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Capture cadence and stop thresholds.
    pub capture: CapturePolicy,
    /// Reducer hyperparameters and output dimensionality.
    pub reducer: ReducerParams,
    /// Figure title, size, ranges and playback.
    pub figure: FigureSettings,
}

impl ReplayConfig {
    /// Parse and validate JSON config text.
    pub fn from_json(s: &str) -> ReplayResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            ReplayError::Other(anyhow::Error::new(e).context(format!("read {}", path.display())))
        })?;
        Self::from_json(&s)
    }

    /// Check every section.
    pub fn validate(&self) -> ReplayResult<()> {
        self.capture.validate()?;
        self.reducer.validate()?;
        self.figure.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/replay.rs"]
mod tests;
