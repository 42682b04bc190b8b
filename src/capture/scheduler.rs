use crate::{
    capture::policy::{CapturePolicy, Signal},
    foundation::core::{Dim, Iteration, LabelSet},
    foundation::error::{ReplayError, ReplayResult},
    frame::builder::{Frame, FrameBuilder},
    frame::snapshot::{OwnedSnapshot, Snapshot},
    style::palette::ColorMap,
};

/// Lifecycle of one capture run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RunState {
    /// No progress callback processed yet.
    NotStarted,
    /// Receiving progress callbacks.
    Running,
    /// The optimizer exhausted its budget.
    Completed,
    /// A stop condition ended the run.
    StoppedEarly,
    /// A fatal error ended the run; frames are only reachable by salvage.
    Aborted,
}

impl RunState {
    /// `true` for states a figure may be assembled from.
    pub fn is_assemblable(self) -> bool {
        matches!(self, Self::Completed | Self::StoppedEarly)
    }

    /// `true` once no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::StoppedEarly | Self::Aborted)
    }
}

/// Loss reported at one iteration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LossPoint {
    /// Iteration index.
    pub iteration: Iteration,
    /// Reported loss.
    pub loss: f64,
}

/// Drives frame capture from the optimizer's per-iteration progress callback.
///
/// Boundary policy: the first step and the last step of the run are always captured, on
/// cadence or not. Off-cadence steps are copied into a reused scratch snapshot so the last
/// one can still become a frame once the run completes.
#[derive(Debug)]
pub struct SnapshotScheduler {
    policy: CapturePolicy,
    builder: FrameBuilder,
    point_labels: Vec<i64>,
    state: RunState,
    frames: Vec<Frame>,
    losses: Vec<LossPoint>,
    last_seen: Option<Iteration>,
    scratch: Option<OwnedSnapshot>,
}

impl SnapshotScheduler {
    /// Scheduler for points labelled by `point_labels`.
    ///
    /// Labels are checked against the builder's label set up front.
    pub fn new(
        builder: FrameBuilder,
        point_labels: Vec<i64>,
        policy: CapturePolicy,
    ) -> ReplayResult<Self> {
        policy.validate()?;
        if point_labels.is_empty() {
            return Err(ReplayError::shape("run must have at least one point"));
        }
        if let Some((row, &label)) = point_labels
            .iter()
            .enumerate()
            .find(|(_, l)| builder.labels().position(**l).is_none())
        {
            return Err(ReplayError::UnknownLabel { label, row });
        }
        Ok(Self {
            policy,
            builder,
            point_labels,
            state: RunState::NotStarted,
            frames: Vec::new(),
            losses: Vec::new(),
            last_seen: None,
            scratch: None,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Frames captured so far, in iteration order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Capture policy in effect.
    pub fn policy(&self) -> &CapturePolicy {
        &self.policy
    }

    /// `NotStarted → Running`.
    pub fn begin(&mut self) -> ReplayResult<()> {
        if self.state != RunState::NotStarted {
            return Err(ReplayError::validation(format!(
                "cannot begin a run in state {:?}",
                self.state
            )));
        }
        self.state = RunState::Running;
        tracing::debug!(
            cadence = self.policy.cadence,
            points = self.point_labels.len(),
            "capture run started"
        );
        Ok(())
    }

    /// Handle one optimizer step.
    ///
    /// Any error is fatal: the scheduler moves to [`RunState::Aborted`] and the error is returned
    /// for the caller to propagate.
    pub fn on_progress(&mut self, snap: Snapshot<'_>) -> ReplayResult<Signal> {
        match self.state {
            RunState::Running => {}
            RunState::StoppedEarly => return Ok(Signal::Stop),
            other => {
                return Err(ReplayError::validation(format!(
                    "progress received in state {other:?}"
                )));
            }
        }

        match self.step(snap) {
            Ok(signal) => Ok(signal),
            Err(e) => {
                self.abort(&e);
                Err(e)
            }
        }
    }

    fn step(&mut self, snap: Snapshot<'_>) -> ReplayResult<Signal> {
        if let Some(prev) = self.last_seen
            && snap.iteration <= prev
        {
            return Err(ReplayError::validation(format!(
                "iteration {} does not follow iteration {prev}",
                snap.iteration
            )));
        }
        if !snap.loss.is_finite() {
            return Err(ReplayError::validation(format!(
                "non-finite loss {} at iteration {}",
                snap.loss, snap.iteration
            )));
        }
        let first = self.last_seen.is_none();
        self.last_seen = Some(snap.iteration);
        self.losses.push(LossPoint {
            iteration: snap.iteration,
            loss: snap.loss,
        });

        let stop = self.policy.stop.should_stop(snap.iteration, snap.loss);
        if first || stop || self.policy.on_cadence(snap.iteration) {
            self.capture(&snap)?;
        } else {
            match self.scratch.as_mut() {
                Some(s) => s.overwrite(&snap),
                None => self.scratch = Some(OwnedSnapshot::copy_of(&snap)),
            }
        }

        if stop {
            self.state = RunState::StoppedEarly;
            tracing::info!(
                iteration = snap.iteration.0,
                loss = snap.loss,
                frames = self.frames.len(),
                "stop condition reached"
            );
            return Ok(Signal::Stop);
        }
        Ok(Signal::Continue)
    }

    fn capture(&mut self, snap: &Snapshot<'_>) -> ReplayResult<()> {
        let frame = self.builder.build(snap, &self.point_labels)?;
        tracing::debug!(
            iteration = snap.iteration.0,
            divergence = snap.loss,
            frames = self.frames.len() + 1,
            "captured frame"
        );
        self.frames.push(frame);
        Ok(())
    }

    /// `Running → Completed`; promotes the last uncaptured step to a frame.
    ///
    /// A no-op once the run stopped early.
    pub fn complete(&mut self) -> ReplayResult<()> {
        match self.state {
            RunState::Running => {}
            RunState::StoppedEarly => return Ok(()),
            other => {
                return Err(ReplayError::validation(format!(
                    "cannot complete a run in state {other:?}"
                )));
            }
        }

        let last_captured = self.frames.last().map(|f| f.iteration);
        if let Some(scratch) = self.scratch.take()
            && last_captured.is_none_or(|c| scratch.iteration() > c)
        {
            let snap = scratch.view()?;
            if let Err(e) = self.capture(&snap) {
                self.abort(&e);
                return Err(e);
            }
        }

        self.state = RunState::Completed;
        tracing::info!(
            frames = self.frames.len(),
            iterations = self.losses.len(),
            "capture run completed"
        );
        Ok(())
    }

    /// Move to [`RunState::Aborted`].
    pub fn abort(&mut self, reason: &ReplayError) {
        if self.state != RunState::Aborted {
            tracing::warn!(error = %reason, frames = self.frames.len(), "capture run aborted");
        }
        self.state = RunState::Aborted;
        self.scratch = None;
    }

    /// Finish into an immutable run record; only valid after Completed or StoppedEarly.
    pub fn into_run(self) -> ReplayResult<CompletedRun> {
        if !self.state.is_assemblable() {
            return Err(ReplayError::validation(format!(
                "run in state {:?} cannot be assembled",
                self.state
            )));
        }
        Ok(CompletedRun {
            state: self.state,
            dim: self.builder.dim(),
            labels: self.builder.labels().clone(),
            colors: self.builder.colors().clone(),
            frames: self.frames,
            losses: self.losses,
        })
    }

    /// Frames captured so far regardless of state.
    ///
    /// Opt-in recovery path for aborted runs; normal assembly goes through [`Self::into_run`].
    pub fn salvage_frames(self) -> Vec<Frame> {
        self.frames
    }
}

/// Frames and history of a run that reached Completed or StoppedEarly.
#[derive(Clone, Debug)]
pub struct CompletedRun {
    state: RunState,
    dim: Dim,
    labels: LabelSet,
    colors: ColorMap,
    frames: Vec<Frame>,
    losses: Vec<LossPoint>,
}

impl CompletedRun {
    /// Terminal state the run ended in.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Output dimensionality.
    pub fn dim(&self) -> Dim {
        self.dim
    }

    /// Declared label set.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Label → color mapping used by every frame.
    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    /// Captured frames in strictly increasing iteration order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Loss of every processed iteration, captured or not.
    pub fn losses(&self) -> &[LossPoint] {
        &self.losses
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/scheduler.rs"]
mod tests;
