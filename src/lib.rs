//! embedreplay turns the optimization trajectory of a t-SNE style embedding into an animated,
//! class-grouped 2D/3D figure descriptor.
//!
//! The crate sits between an iterative dimensionality reducer and a browser charting library.
//! It does no numeric optimization and draws nothing itself.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: the reducer reports every iteration to a [`SnapshotScheduler`], which keeps
//!    every `cadence`-th step (plus the first and last) as a [`Frame`].
//! 2. **Partition**: each kept step is split by class label into one [`Series`] per label
//!    ([`LabelPartitioner`]) and styled by a [`FrameBuilder`].
//! 3. **Assemble**: a finished [`CompletedRun`] becomes a [`Figure`] with a base view, a single
//!    play control and per-dimensionality layout ([`FigureAssembler`]).
//! 4. **Render** (optional): a [`FigureRenderer`] writes the descriptor out as JSON or an HTML
//!    page.
//!
//! [`ReplaySession`] drives all four steps for one run.
//!
//! # Guarantees
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deep copies**: frames never alias the reducer's working buffer.
//! - **Deterministic assembly**: assembling the same run twice yields equal figures with equal
//!   [`FigureFingerprint`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod capture;
mod config;
mod figure;
mod foundation;
mod frame;
mod partition;
mod reducer;
mod render;
mod session;
mod style;

pub use capture::policy::{CapturePolicy, Signal, StopCondition};
pub use capture::scheduler::{CompletedRun, LossPoint, RunState, SnapshotScheduler};
pub use config::replay::ReplayConfig;
pub use figure::assembler::{BaseView, FigureAssembler, FigureSettings, PlaybackConfig};
pub use figure::ease::Ease;
pub use figure::fingerprint::FigureFingerprint;
pub use figure::model::{
    AnimateMode, AnimateOptions, AnimationSettings, AxisLayout, Button, ButtonMethod, Figure,
    FigureConfig, FrameTiming, Layout, MenuKind, Scene, Title, TransitionTiming, UpdateMenu,
};
pub use foundation::core::{CoordView, Dim, Iteration, LabelSet, Matrix, MatrixView, Rgba};
pub use foundation::error::{ReplayError, ReplayResult};
pub use frame::builder::{Frame, FrameBuilder, Trace, TraceKind, TraceMode};
pub use frame::snapshot::{OwnedSnapshot, Snapshot};
pub use partition::partitioner::{LabelPartitioner, Partition, Series};
pub use reducer::dataset::{InMemoryDataset, LabeledDataset};
pub use reducer::params::ReducerParams;
pub use reducer::seam::{DimensionalityReducer, Identity, Preprocessor};
pub use reducer::trajectory::TrajectoryReducer;
pub use render::html::{HtmlPageRenderer, PLOTLY_CDN};
pub use render::sink::{FigureRenderer, InMemoryRenderer, JsonFileRenderer};
pub use session::driver::{ReplaySession, SessionOutcome};
pub use style::marker::{
    FlatMarkers, Marker, MarkerLine, OutlinedMarkers, StylePolicy, default_style,
};
pub use style::palette::{ColorMap, DEFAULT_PALETTE};
