use super::*;
use crate::capture::scheduler::RunState;
use crate::capture::policy::StopCondition;
use crate::foundation::core::{CoordView, Dim, Iteration, Matrix, MatrixView};
use crate::frame::snapshot::Snapshot;
use crate::reducer::dataset::InMemoryDataset;
use crate::render::sink::InMemoryRenderer;

/// Emits `steps` iterations where point `i` sits at `(it + i, -(it + i))`.
struct Linear {
    steps: u64,
    fail_at: Option<u64>,
    nan_loss_at: Option<u64>,
    seen_cols: Option<usize>,
}

impl Linear {
    fn new(steps: u64) -> Self {
        Self {
            steps,
            fail_at: None,
            nan_loss_at: None,
            seen_cols: None,
        }
    }
}

impl DimensionalityReducer for Linear {
    fn embed(
        &mut self,
        input: MatrixView<'_>,
        params: &ReducerParams,
        on_step: &mut dyn FnMut(Snapshot<'_>) -> Signal,
    ) -> anyhow::Result<()> {
        self.seen_cols = Some(input.cols());
        let n = input.rows();
        let d = params.dim.axes();
        let mut buf = vec![0.0; n * d];
        for it in 0..self.steps {
            if self.fail_at == Some(it) {
                anyhow::bail!("gradient exploded at {it}");
            }
            for i in 0..n {
                buf[i * d] = (it + i as u64) as f64;
                buf[i * d + 1] = -((it + i as u64) as f64);
            }
            let snap = Snapshot {
                iteration: Iteration(it),
                loss: if self.nan_loss_at == Some(it) {
                    f64::NAN
                } else {
                    1.0 / (it as f64 + 1.0)
                },
                coords: CoordView::new(&buf, n, params.dim)?,
            };
            if on_step(snap).is_stop() {
                break;
            }
        }
        Ok(())
    }
}

/// Reports a coordinate buffer one point short.
struct Truncating;

impl DimensionalityReducer for Truncating {
    fn embed(
        &mut self,
        input: MatrixView<'_>,
        params: &ReducerParams,
        on_step: &mut dyn FnMut(Snapshot<'_>) -> Signal,
    ) -> anyhow::Result<()> {
        let buf = vec![0.0; (input.rows() - 1) * params.dim.axes()];
        on_step(Snapshot {
            iteration: Iteration(0),
            loss: 1.0,
            coords: CoordView::from_flat(&buf, params.dim)?,
        });
        Ok(())
    }
}

/// Keeps the first `components` columns.
struct FirstColumns;

impl Preprocessor for FirstColumns {
    fn project<'a>(
        &self,
        input: &'a Matrix,
        components: usize,
    ) -> anyhow::Result<Cow<'a, Matrix>> {
        let view = input.view();
        let rows: Vec<Vec<f64>> = (0..view.rows())
            .map(|i| view.row(i)[..components].to_vec())
            .collect();
        Ok(Cow::Owned(Matrix::from_rows(&rows)?))
    }
}

struct Rejecting;

impl FigureRenderer for Rejecting {
    fn render(&mut self, _fig: &Figure) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }
}

fn dataset() -> InMemoryDataset {
    InMemoryDataset::labels_only(vec![0, 1, 0, 1]).unwrap()
}

#[test]
fn full_run_captures_31_frames_and_renders() {
    let mut renderer = InMemoryRenderer::new();
    let outcome = ReplaySession::new(ReducerParams::default())
        .run_and_render(&dataset(), &mut Linear::new(301), &mut renderer)
        .unwrap();
    assert_eq!(outcome.run.state(), RunState::Completed);
    assert_eq!(outcome.figure.frames.len(), 31);
    assert_eq!(outcome.figure.frames.last().unwrap().iteration, Iteration(300));
    assert_eq!(outcome.run.losses().len(), 301);
    assert_eq!(renderer.last(), Some(&outcome.figure));
}

#[test]
fn small_run_scenario() {
    let labels = InMemoryDataset::labels_only(vec![0, 1, 0, 1]).unwrap();
    let outcome = ReplaySession::new(ReducerParams::default())
        .run(&labels, &mut Linear::new(21))
        .unwrap();
    let iters: Vec<u64> = outcome.figure.frames.iter().map(|f| f.iteration.0).collect();
    assert_eq!(iters, vec![0, 10, 20]);
    let f10 = &outcome.figure.frames[1];
    assert_eq!(f10.data[0].series.x, vec![10.0, 12.0]);
    assert_eq!(f10.data[1].series.y, vec![-11.0, -13.0]);
}

#[test]
fn stop_condition_ends_session_early() {
    let policy = CapturePolicy {
        cadence: 10,
        stop: StopCondition {
            max_iteration: Some(25),
            loss_below: None,
        },
    };
    let outcome = ReplaySession::new(ReducerParams::default())
        .capture(policy)
        .run(&dataset(), &mut Linear::new(301))
        .unwrap();
    assert_eq!(outcome.run.state(), RunState::StoppedEarly);
    assert_eq!(outcome.run.losses().len(), 26);
    assert_eq!(outcome.figure.frames.len(), 4);
}

#[test]
fn reducer_failure_aborts_without_figure() {
    let mut reducer = Linear::new(301);
    reducer.fail_at = Some(42);
    let err = ReplaySession::new(ReducerParams::default())
        .run(&dataset(), &mut reducer)
        .unwrap_err();
    assert!(matches!(err, ReplayError::ReducerFailure(_)));
    assert!(err.to_string().contains("gradient exploded at 42"));
}

#[test]
fn callback_error_is_surfaced() {
    let err = ReplaySession::new(ReducerParams::default())
        .run(&dataset(), &mut Truncating)
        .unwrap_err();
    assert!(matches!(err, ReplayError::ShapeMismatch(_)));
}

#[test]
fn renderer_failure_is_surfaced() {
    let err = ReplaySession::new(ReducerParams::default())
        .run_and_render(&dataset(), &mut Linear::new(5), &mut Rejecting)
        .unwrap_err();
    assert!(matches!(err, ReplayError::RendererFailure(_)));
}

#[test]
fn wide_input_is_projected_before_embedding() {
    let features = Matrix::new(vec![1.0; 4 * 60], 4, 60).unwrap();
    let ds = InMemoryDataset::new(features, vec![0, 1, 0, 1]).unwrap();
    let mut reducer = Linear::new(3);
    ReplaySession::new(ReducerParams::default())
        .preprocessor(Box::new(FirstColumns))
        .run(&ds, &mut reducer)
        .unwrap();
    assert_eq!(reducer.seen_cols, Some(50));
}

#[test]
fn declared_labels_and_colors_are_used() {
    use crate::foundation::core::Rgba;
    let labels = LabelSet::new([0, 1, 2]).unwrap();
    let colors = ColorMap::new()
        .with(0, Rgba::new(1, 2, 3, 1.0))
        .with(1, Rgba::new(4, 5, 6, 1.0))
        .with(2, Rgba::new(7, 8, 9, 1.0));
    let outcome = ReplaySession::new(ReducerParams::default())
        .labels(labels)
        .colors(colors)
        .run(&dataset(), &mut Linear::new(3))
        .unwrap();
    let base = &outcome.figure.data;
    assert_eq!(base.len(), 3);
    assert!(base[2].series.is_empty());
    assert_eq!(base[1].marker.color, Rgba::new(4, 5, 6, 1.0));
}

#[test]
fn three_dimensional_config_session() {
    let cfg = ReplayConfig::from_json(r#"{"reducer": {"dim": 3}, "capture": {"cadence": 2}}"#)
        .unwrap();
    let outcome = ReplaySession::from_config(&cfg)
        .unwrap()
        .run(&dataset(), &mut Linear::new(5))
        .unwrap();
    assert_eq!(outcome.figure.dim, Dim::Three);
    assert_eq!(outcome.figure.frames.len(), 3);
    assert!(outcome.figure.layout.scene.is_some());
}

#[test]
fn reducer_that_never_reports_yields_no_figure() {
    let err = ReplaySession::new(ReducerParams::default())
        .run(&dataset(), &mut Linear::new(0))
        .unwrap_err();
    assert!(matches!(err, ReplayError::Validation(_)));
}

#[test]
fn non_finite_loss_fails_the_run_instead_of_writing_null() {
    let mut reducer = Linear::new(30);
    reducer.nan_loss_at = Some(2);
    let err = ReplaySession::new(ReducerParams::default())
        .run(&dataset(), &mut reducer)
        .unwrap_err();
    assert!(matches!(err, ReplayError::Validation(_)));
}

#[test]
fn written_figure_reads_back() {
    let outcome = ReplaySession::new(ReducerParams::default())
        .run(&dataset(), &mut Linear::new(30))
        .unwrap();
    let json = outcome.figure.to_json_pretty().unwrap();
    let back = Figure::from_json(&json).unwrap();
    assert_eq!(back.frames.len(), outcome.figure.frames.len());
    assert!(back.frames.iter().all(|f| f.loss.is_finite()));
}
