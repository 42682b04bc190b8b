use crate::foundation::core::Iteration;
use crate::foundation::error::{ReplayError, ReplayResult};

/// Per-iteration answer returned to the optimizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Keep iterating.
    Continue,
    /// Stop after this iteration.
    Stop,
}

impl Signal {
    /// `true` for [`Signal::Stop`].
    pub fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Optional thresholds that end a run before the optimizer's own budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StopCondition {
    /// Stop once this iteration has been processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iteration: Option<u64>,
    /// Stop once the reported loss drops below this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_below: Option<f64>,
}

impl StopCondition {
    /// Whether the step `(iteration, loss)` ends the run.
    pub fn should_stop(&self, iteration: Iteration, loss: f64) -> bool {
        self.max_iteration.is_some_and(|m| iteration.0 >= m)
            || self.loss_below.is_some_and(|t| loss < t)
    }

    /// Validate thresholds.
    pub fn validate(&self) -> ReplayResult<()> {
        if let Some(t) = self.loss_below
            && !t.is_finite()
        {
            return Err(ReplayError::validation("stop loss_below must be finite"));
        }
        Ok(())
    }
}

/// Capture cadence and stop thresholds for one run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CapturePolicy {
    /// Capture every `cadence`-th iteration (`iteration % cadence == 0`).
    #[serde(default = "default_cadence")]
    pub cadence: u64,
    /// Optional early-stop thresholds.
    #[serde(default)]
    pub stop: StopCondition,
}

fn default_cadence() -> u64 {
    10
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self {
            cadence: default_cadence(),
            stop: StopCondition::default(),
        }
    }
}

impl CapturePolicy {
    /// Policy capturing every `cadence`-th iteration, no stop thresholds.
    pub fn every(cadence: u64) -> Self {
        Self {
            cadence,
            ..Self::default()
        }
    }

    /// Validate cadence and thresholds.
    pub fn validate(&self) -> ReplayResult<()> {
        if self.cadence == 0 {
            return Err(ReplayError::validation("capture cadence must be > 0"));
        }
        self.stop.validate()
    }

    /// Whether `iteration` falls on the cadence.
    pub fn on_cadence(&self, iteration: Iteration) -> bool {
        iteration.0 % self.cadence == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/policy.rs"]
mod tests;
