use crate::{
    figure::ease::Ease,
    foundation::core::{Dim, LabelSet},
    foundation::error::{ReplayError, ReplayResult},
    frame::builder::{Frame, Trace, TraceKind},
    style::palette::ColorMap,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete animated figure descriptor.
///
/// A pure data value: it serializes to the JSON shape browser charting libraries accept for
/// `newPlot` (`data`, `layout`, `config`, `frames`) plus the run metadata needed to re-check it.
/// Rendering is left to a [`crate::FigureRenderer`].
pub struct Figure {
    /// Output dimensionality of every trace.
    pub dim: Dim,
    /// Declared label set; every frame holds one trace per label in this order.
    pub labels: LabelSet,
    /// Label → color mapping shared by every frame.
    pub colors: ColorMap,
    /// Static base view shown before playback starts.
    pub data: Vec<Trace>,
    /// Title, size, axes and the play control.
    pub layout: Layout,
    /// Renderer options.
    pub config: FigureConfig,
    /// Keyframes in strictly increasing iteration order.
    pub frames: Vec<Frame>,
    /// Figure-level animation defaults.
    pub animation: AnimationSettings,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Figure layout.
pub struct Layout {
    /// Plot height in pixels.
    pub height: u32,
    /// Figure title.
    pub title: Title,
    /// Horizontal axis (2D only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    /// Vertical axis (2D only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
    /// 3D scene axes (3D only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    /// Playback controls.
    pub updatemenus: Vec<UpdateMenu>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text title.
pub struct Title {
    /// Title text.
    pub text: String,
}

impl Title {
    /// Title with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One axis: title and optional fixed range.
pub struct AxisLayout {
    /// Axis title.
    pub title: Title,
    /// Fixed `[min, max]` range; autoscaled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// 3D scene axes.
pub struct Scene {
    /// X axis.
    pub xaxis: AxisLayout,
    /// Y axis.
    pub yaxis: AxisLayout,
    /// Z axis.
    pub zaxis: AxisLayout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Update menu flavour.
pub enum MenuKind {
    /// A row of buttons.
    Buttons,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A group of playback buttons.
pub struct UpdateMenu {
    /// Menu flavour.
    #[serde(rename = "type")]
    pub kind: MenuKind,
    /// Highlight the last pressed button.
    pub showactive: bool,
    /// Buttons in display order.
    pub buttons: Vec<Button>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Renderer method a button invokes.
pub enum ButtonMethod {
    /// Step through frames.
    Animate,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A playback trigger.
pub struct Button {
    /// Button caption.
    pub label: String,
    /// Invoked method.
    pub method: ButtonMethod,
    /// Method arguments: frame selection (`null` = all frames in stored order) and options.
    pub args: (Option<Vec<String>>, AnimateOptions),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a new animation interacts with one in progress.
pub enum AnimateMode {
    /// Interrupt and start immediately.
    Immediate,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Options passed with the play trigger.
pub struct AnimateOptions {
    /// Interruption mode.
    pub mode: AnimateMode,
    /// Resume from the current frame instead of restarting.
    #[serde(default)]
    pub fromcurrent: bool,
    /// Per-frame timing.
    pub frame: FrameTiming,
    /// Between-frame transition timing.
    pub transition: TransitionTiming,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-frame timing.
pub struct FrameTiming {
    /// Time each frame is held, in milliseconds.
    pub duration: u32,
    /// Fully redraw each frame.
    pub redraw: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Transition timing.
pub struct TransitionTiming {
    /// Transition length in milliseconds.
    pub duration: u32,
    /// Easing curve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Ease>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Figure-level animation defaults.
pub struct AnimationSettings {
    /// Per-frame timing.
    pub frame: FrameTiming,
    /// Transition timing.
    pub transition: TransitionTiming,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Renderer options.
pub struct FigureConfig {
    /// Resize with the container.
    pub responsive: bool,
}

impl Figure {
    /// Re-check the structural invariants of the descriptor.
    pub fn validate(&self) -> ReplayResult<()> {
        if self.frames.is_empty() {
            return Err(ReplayError::validation("figure must have at least one frame"));
        }
        self.colors.ensure_covers(&self.labels)?;

        match (self.dim, self.scene_or_axes()) {
            (Dim::Two, SceneOrAxes::Axes) | (Dim::Three, SceneOrAxes::Scene) => {}
            _ => {
                return Err(ReplayError::validation(format!(
                    "layout axes do not match a {}D figure",
                    self.dim.axes()
                )));
            }
        }
        for axis in self.axes() {
            if let Some([lo, hi]) = axis.range
                && !(lo.is_finite() && hi.is_finite() && lo < hi)
            {
                return Err(ReplayError::validation(format!(
                    "axis '{}' range must be finite with min < max",
                    axis.title.text
                )));
            }
        }

        self.check_traces(&self.data, "base view")?;
        let mut prev = None;
        for frame in &self.frames {
            if prev.is_some_and(|p| frame.iteration <= p) {
                return Err(ReplayError::validation(format!(
                    "frame '{}' is out of iteration order",
                    frame.name
                )));
            }
            prev = Some(frame.iteration);
            if frame.name != frame.iteration.to_string() {
                return Err(ReplayError::validation(format!(
                    "frame '{}' is not named after iteration {}",
                    frame.name, frame.iteration
                )));
            }
            self.check_traces(&frame.data, &frame.name)?;
        }
        Ok(())
    }

    fn check_traces(&self, traces: &[Trace], what: &str) -> ReplayResult<()> {
        if traces.len() != self.labels.len() {
            return Err(ReplayError::shape(format!(
                "{what}: {} traces for {} labels",
                traces.len(),
                self.labels.len()
            )));
        }
        let kind = TraceKind::for_dim(self.dim);
        for ((trace, label), base) in traces.iter().zip(self.labels.iter()).zip(&self.data) {
            if trace.series.label != label || trace.kind != kind {
                return Err(ReplayError::shape(format!(
                    "{what}: trace '{}' does not match label {label} of a {}D figure",
                    trace.name,
                    self.dim.axes()
                )));
            }
            if trace.series.dim() != self.dim || !trace.series.is_consistent() {
                return Err(ReplayError::shape(format!(
                    "{what}: trace '{}' has inconsistent coordinate columns",
                    trace.name
                )));
            }
            if trace.marker != base.marker {
                return Err(ReplayError::validation(format!(
                    "{what}: styling of label {label} differs from the base view"
                )));
            }
        }
        Ok(())
    }

    fn scene_or_axes(&self) -> SceneOrAxes {
        match (&self.layout.scene, &self.layout.xaxis, &self.layout.yaxis) {
            (Some(_), None, None) => SceneOrAxes::Scene,
            (None, Some(_), Some(_)) => SceneOrAxes::Axes,
            _ => SceneOrAxes::Mixed,
        }
    }

    fn axes(&self) -> Vec<&AxisLayout> {
        let mut out: Vec<&AxisLayout> = Vec::new();
        out.extend(self.layout.xaxis.as_ref());
        out.extend(self.layout.yaxis.as_ref());
        if let Some(scene) = &self.layout.scene {
            out.extend([&scene.xaxis, &scene.yaxis, &scene.zaxis]);
        }
        out
    }

    /// Number of points shown in each frame.
    pub fn points_per_frame(&self) -> usize {
        self.data.iter().map(|t| t.series.len()).sum()
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> ReplayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a figure from JSON.
    pub fn from_json(s: &str) -> ReplayResult<Self> {
        let fig: Self = serde_json::from_str(s)?;
        fig.validate()?;
        Ok(fig)
    }
}

enum SceneOrAxes {
    Scene,
    Axes,
    Mixed,
}

#[cfg(test)]
#[path = "../../tests/unit/figure/model.rs"]
mod tests;
