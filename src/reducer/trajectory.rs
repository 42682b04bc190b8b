use std::path::Path;

use anyhow::{bail, ensure};

use crate::{
    capture::policy::Signal,
    foundation::core::{CoordView, Dim, Iteration, MatrixView},
    foundation::error::{ReplayError, ReplayResult},
    frame::snapshot::Snapshot,
    reducer::params::ReducerParams,
    reducer::seam::DimensionalityReducer,
};

#[derive(serde::Deserialize)]
struct TrajectoryFile {
    dim: Dim,
    steps: Vec<StepRecord>,
}

#[derive(serde::Deserialize)]
struct StepRecord {
    iteration: u64,
    loss: f64,
    coords: Vec<Vec<f64>>,
}

#[derive(Clone, Debug, PartialEq)]
struct Step {
    iteration: Iteration,
    loss: f64,
    coords: Vec<f64>,
}

/// Replays a recorded optimizer trajectory through the progress callback.
///
/// No optimization happens: each recorded step is copied into one working buffer and handed
/// to the callback, the way a live optimizer exposes its embedding.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryReducer {
    dim: Dim,
    points: usize,
    steps: Vec<Step>,
}

impl TrajectoryReducer {
    /// Parse a recorded trajectory.
    ///
    /// ```json
    /// {"dim": 2, "steps": [{"iteration": 0, "loss": 1.0, "coords": [[0.0, 1.0], [2.0, 3.0]]}]}
    /// ```
    pub fn from_json(s: &str) -> ReplayResult<Self> {
        let file: TrajectoryFile = serde_json::from_str(s)?;
        let Some(first) = file.steps.first() else {
            return Err(ReplayError::validation("trajectory has no steps"));
        };
        let points = first.coords.len();
        let width = file.dim.axes();

        let mut steps = Vec::with_capacity(file.steps.len());
        for rec in file.steps {
            if rec.coords.len() != points {
                return Err(ReplayError::shape(format!(
                    "step {} has {} points, expected {points}",
                    rec.iteration,
                    rec.coords.len()
                )));
            }
            let mut coords = Vec::with_capacity(points * width);
            for (row, c) in rec.coords.iter().enumerate() {
                if c.len() != width {
                    return Err(ReplayError::shape(format!(
                        "step {} row {row} has {} coordinates, trajectory is {width}D",
                        rec.iteration,
                        c.len()
                    )));
                }
                coords.extend_from_slice(c);
            }
            steps.push(Step {
                iteration: Iteration(rec.iteration),
                loss: rec.loss,
                coords,
            });
        }
        Ok(Self {
            dim: file.dim,
            points,
            steps,
        })
    }

    /// Read a recorded trajectory from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            ReplayError::Other(anyhow::Error::new(e).context(format!("read {}", path.display())))
        })?;
        Self::from_json(&s)
    }

    /// Recorded dimensionality.
    pub fn dim(&self) -> Dim {
        self.dim
    }

    /// Points per step.
    pub fn points(&self) -> usize {
        self.points
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl DimensionalityReducer for TrajectoryReducer {
    #[tracing::instrument(skip_all, fields(steps = self.steps.len(), points = self.points))]
    fn embed(
        &mut self,
        input: MatrixView<'_>,
        params: &ReducerParams,
        on_step: &mut dyn FnMut(Snapshot<'_>) -> Signal,
    ) -> anyhow::Result<()> {
        ensure!(
            input.rows() == self.points,
            "input has {} rows, trajectory records {} points",
            input.rows(),
            self.points
        );
        if params.dim != self.dim {
            bail!(
                "requested a {}D embedding, trajectory is {}D",
                params.dim.axes(),
                self.dim.axes()
            );
        }

        let mut work = vec![0.0; self.points * self.dim.axes()];
        for step in &self.steps {
            work.copy_from_slice(&step.coords);
            let snap = Snapshot {
                iteration: step.iteration,
                loss: step.loss,
                coords: CoordView::new(&work, self.points, self.dim)?,
            };
            if on_step(snap).is_stop() {
                tracing::debug!(iteration = step.iteration.0, "replay stopped by callback");
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reducer/trajectory.rs"]
mod tests;
