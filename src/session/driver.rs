use std::borrow::Cow;

use crate::{
    capture::policy::{CapturePolicy, Signal},
    capture::scheduler::{CompletedRun, SnapshotScheduler},
    config::replay::ReplayConfig,
    figure::assembler::FigureAssembler,
    figure::model::Figure,
    foundation::core::LabelSet,
    foundation::error::{ReplayError, ReplayResult},
    frame::builder::FrameBuilder,
    reducer::dataset::LabeledDataset,
    reducer::params::ReducerParams,
    reducer::seam::{DimensionalityReducer, Identity, Preprocessor},
    render::sink::FigureRenderer,
    style::marker::{StylePolicy, default_style},
    style::palette::ColorMap,
};

/// Result of a successful session: the run record and its figure.
#[derive(Clone, Debug)]
pub struct SessionOutcome {
    /// Captured frames and loss history.
    pub run: CompletedRun,
    /// Assembled figure descriptor.
    pub figure: Figure,
}

/// Drives one embedding run end to end.
///
/// Preprocess, embed with the scheduler as the progress callback, settle the terminal state,
/// assemble, and optionally hand the figure to a renderer. A reducer error aborts the run and
/// no figure is produced.
pub struct ReplaySession {
    params: ReducerParams,
    policy: CapturePolicy,
    assembler: FigureAssembler,
    labels: Option<LabelSet>,
    colors: Option<ColorMap>,
    style: Option<Box<dyn StylePolicy>>,
    preprocessor: Box<dyn Preprocessor>,
}

impl std::fmt::Debug for ReplaySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplaySession")
            .field("params", &self.params)
            .field("policy", &self.policy)
            .field("assembler", &self.assembler)
            .field("labels", &self.labels)
            .field("colors", &self.colors)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl ReplaySession {
    /// Session with default capture and figure settings for `params.dim`.
    pub fn new(params: ReducerParams) -> Self {
        Self {
            params,
            policy: CapturePolicy::default(),
            assembler: FigureAssembler::new(params.dim),
            labels: None,
            colors: None,
            style: None,
            preprocessor: Box::new(Identity),
        }
    }

    /// Session configured from a validated [`ReplayConfig`].
    pub fn from_config(cfg: &ReplayConfig) -> ReplayResult<Self> {
        cfg.validate()?;
        Ok(Self {
            policy: cfg.capture,
            assembler: FigureAssembler::with_settings(cfg.reducer.dim, &cfg.figure)?,
            ..Self::new(cfg.reducer)
        })
    }

    /// Replace the capture policy.
    pub fn capture(mut self, policy: CapturePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the figure assembler.
    pub fn assembler(mut self, assembler: FigureAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Declare the label set instead of deriving it from the dataset.
    pub fn labels(mut self, labels: LabelSet) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Use explicit colors instead of the default palette.
    pub fn colors(mut self, colors: ColorMap) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Inject a marker styling policy.
    pub fn style(mut self, style: Box<dyn StylePolicy>) -> Self {
        self.style = Some(style);
        self
    }

    /// Inject the preprocessing step.
    pub fn preprocessor(mut self, preprocessor: Box<dyn Preprocessor>) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    /// Reducer hyperparameters in effect.
    pub fn params(&self) -> &ReducerParams {
        &self.params
    }

    /// Embed `dataset` with `reducer` and capture its frames.
    #[tracing::instrument(
        skip_all,
        fields(dim = self.params.dim.axes(), points = dataset.labels().len())
    )]
    pub fn capture_run(
        self,
        dataset: &dyn LabeledDataset,
        reducer: &mut dyn DimensionalityReducer,
    ) -> ReplayResult<(CompletedRun, FigureAssembler)> {
        self.params.validate()?;
        let dim = self.params.dim;
        let labels = match self.labels {
            Some(l) => l,
            None => dataset.label_set()?,
        };
        let colors = self
            .colors
            .unwrap_or_else(|| ColorMap::with_default_palette(&labels));
        let style = self.style.unwrap_or_else(|| default_style(dim));
        let builder = FrameBuilder::with_style(dim, labels, colors, style)?;
        let mut scheduler =
            SnapshotScheduler::new(builder, dataset.labels().to_vec(), self.policy)?;

        let features = dataset.features();
        let input = match self.params.pca_components {
            Some(k) if features.cols() > k => self
                .preprocessor
                .project(features, k)
                .map_err(ReplayError::reducer)?,
            _ => Cow::Borrowed(features),
        };
        tracing::debug!(
            rows = input.rows(),
            cols = input.cols(),
            "input ready for embedding"
        );

        scheduler.begin()?;
        let mut callback_err: Option<ReplayError> = None;
        let outcome = reducer.embed(input.view(), &self.params, &mut |snap| {
            match scheduler.on_progress(snap) {
                Ok(signal) => signal,
                Err(e) => {
                    callback_err = Some(e);
                    Signal::Stop
                }
            }
        });

        if let Some(e) = callback_err {
            return Err(e);
        }
        if let Err(e) = outcome {
            let err = ReplayError::reducer(e);
            scheduler.abort(&err);
            return Err(err);
        }
        scheduler.complete()?;
        Ok((scheduler.into_run()?, self.assembler))
    }

    /// Embed, capture and assemble.
    pub fn run(
        self,
        dataset: &dyn LabeledDataset,
        reducer: &mut dyn DimensionalityReducer,
    ) -> ReplayResult<SessionOutcome> {
        let (run, assembler) = self.capture_run(dataset, reducer)?;
        let figure = assembler.assemble(&run)?;
        tracing::info!(
            state = ?run.state(),
            frames = figure.frames.len(),
            points = figure.points_per_frame(),
            "replay session finished"
        );
        Ok(SessionOutcome { run, figure })
    }

    /// [`ReplaySession::run`], then hand the figure to `renderer`.
    pub fn run_and_render(
        self,
        dataset: &dyn LabeledDataset,
        reducer: &mut dyn DimensionalityReducer,
        renderer: &mut dyn FigureRenderer,
    ) -> ReplayResult<SessionOutcome> {
        let outcome = self.run(dataset, reducer)?;
        renderer
            .render(&outcome.figure)
            .map_err(ReplayError::renderer)?;
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
