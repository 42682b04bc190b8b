use crate::{
    capture::scheduler::CompletedRun,
    figure::ease::Ease,
    figure::model::{
        AnimateMode, AnimateOptions, AnimationSettings, AxisLayout, Button, ButtonMethod, Figure,
        FigureConfig, FrameTiming, Layout, MenuKind, Scene, Title, TransitionTiming, UpdateMenu,
    },
    foundation::core::{Dim, LabelSet},
    foundation::error::{ReplayError, ReplayResult},
    frame::builder::{Frame, Trace},
    style::palette::ColorMap,
};

/// Which captured frame seeds the static base view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseView {
    /// The last captured frame (the converged embedding).
    #[default]
    FinalFrame,
    /// The first captured frame (the initial embedding).
    FirstFrame,
}

/// Settings of the single play trigger.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackConfig {
    /// Time each frame is held, in milliseconds.
    pub frame_duration_ms: u32,
    /// Transition between frames, in milliseconds.
    pub transition_duration_ms: u32,
    /// Fully redraw each frame.
    #[serde(default)]
    pub redraw: bool,
    /// Resume from the current frame when pressed again.
    #[serde(default)]
    pub from_current: bool,
    /// Transition easing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Ease>,
}

impl PlaybackConfig {
    /// Defaults for a run of dimensionality `dim`.
    pub fn for_dim(dim: Dim) -> Self {
        match dim {
            Dim::Two => Self {
                frame_duration_ms: 200,
                transition_duration_ms: 200,
                redraw: false,
                from_current: true,
                easing: None,
            },
            Dim::Three => Self {
                frame_duration_ms: 0,
                transition_duration_ms: 0,
                redraw: true,
                from_current: false,
                easing: None,
            },
        }
    }

    fn animate_options(self) -> AnimateOptions {
        AnimateOptions {
            mode: AnimateMode::Immediate,
            fromcurrent: self.from_current,
            frame: FrameTiming {
                duration: self.frame_duration_ms,
                redraw: self.redraw,
            },
            transition: TransitionTiming {
                duration: self.transition_duration_ms,
                easing: self.easing,
            },
        }
    }
}

/// User-facing figure options; unset fields fall back to per-dimensionality defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FigureSettings {
    /// Figure title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Plot height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Fixed `[min, max]` applied to every axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Play trigger settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback: Option<PlaybackConfig>,
    /// Figure-level animation defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSettings>,
    /// Base view selection.
    pub base_view: BaseView,
}

impl FigureSettings {
    /// Validate ranges and heights.
    pub fn validate(&self) -> ReplayResult<()> {
        if self.height == Some(0) {
            return Err(ReplayError::validation("figure height must be > 0"));
        }
        validate_range(self.range)
    }
}

fn validate_range(range: Option<[f64; 2]>) -> ReplayResult<()> {
    if let Some([lo, hi]) = range
        && !(lo.is_finite() && hi.is_finite() && lo < hi)
    {
        return Err(ReplayError::validation(
            "axis range must be finite with min < max",
        ));
    }
    Ok(())
}

/// Builds the figure descriptor from a finished run.
///
/// Assembly performs no rendering and reads no clock or randomness; assembling the same run
/// twice yields equal descriptors.
#[derive(Clone, Debug)]
pub struct FigureAssembler {
    dim: Dim,
    title: String,
    height: u32,
    axis_titles: [String; 3],
    ranges: [Option<[f64; 2]>; 3],
    playback: PlaybackConfig,
    animation: AnimationSettings,
    responsive: bool,
    base_view: BaseView,
}

impl FigureAssembler {
    /// Assembler with the defaults for `dim`.
    pub fn new(dim: Dim) -> Self {
        let (title, height, range, animation) = match dim {
            Dim::Two => (
                "t-SNE",
                500,
                None,
                AnimationSettings {
                    frame: FrameTiming {
                        duration: 100,
                        redraw: true,
                    },
                    transition: TransitionTiming {
                        duration: 50,
                        easing: Some(Ease::Linear),
                    },
                },
            ),
            Dim::Three => (
                "t-SNE 3D",
                800,
                Some([-500.0, 500.0]),
                AnimationSettings {
                    frame: FrameTiming {
                        duration: 0,
                        redraw: true,
                    },
                    transition: TransitionTiming {
                        duration: 0,
                        easing: None,
                    },
                },
            ),
        };
        Self {
            dim,
            title: title.to_string(),
            height,
            axis_titles: ["X".to_string(), "Y".to_string(), "Z".to_string()],
            ranges: [range; 3],
            playback: PlaybackConfig::for_dim(dim),
            animation,
            responsive: true,
            base_view: BaseView::FinalFrame,
        }
    }

    /// Defaults for `dim` overridden by `settings`.
    pub fn with_settings(dim: Dim, settings: &FigureSettings) -> ReplayResult<Self> {
        settings.validate()?;
        let mut a = Self::new(dim);
        if let Some(t) = &settings.title {
            a.title = t.clone();
        }
        if let Some(h) = settings.height {
            a.height = h;
        }
        if settings.range.is_some() {
            a.ranges = [settings.range; 3];
        }
        if let Some(p) = settings.playback {
            a.playback = p;
        }
        if let Some(anim) = settings.animation {
            a.animation = anim;
        }
        a.base_view = settings.base_view;
        Ok(a)
    }

    /// Set the figure title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the plot height in pixels.
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the title of axis `index` (0 = x, 1 = y, 2 = z).
    pub fn axis_title(mut self, index: usize, title: impl Into<String>) -> ReplayResult<Self> {
        let slot = self.axis_titles.get_mut(index).ok_or_else(|| {
            ReplayError::validation(format!("axis index {index} is out of range"))
        })?;
        *slot = title.into();
        Ok(self)
    }

    /// Fix the range of axis `index`; `None` autoscales.
    pub fn axis_range(mut self, index: usize, range: Option<[f64; 2]>) -> ReplayResult<Self> {
        validate_range(range)?;
        let slot = self.ranges.get_mut(index).ok_or_else(|| {
            ReplayError::validation(format!("axis index {index} is out of range"))
        })?;
        *slot = range;
        Ok(self)
    }

    /// Set the play trigger.
    pub fn playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }

    /// Set figure-level animation defaults.
    pub fn animation(mut self, animation: AnimationSettings) -> Self {
        self.animation = animation;
        self
    }

    /// Toggle container-responsive sizing.
    pub fn responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Choose the base view frame.
    pub fn base_view(mut self, base_view: BaseView) -> Self {
        self.base_view = base_view;
        self
    }

    /// Assemble the figure of a finished run.
    #[tracing::instrument(skip_all, fields(frames = run.frames().len(), state = ?run.state()))]
    pub fn assemble(&self, run: &CompletedRun) -> ReplayResult<Figure> {
        if run.dim() != self.dim {
            return Err(ReplayError::shape(format!(
                "run is {}D, assembler is {}D",
                run.dim().axes(),
                self.dim.axes()
            )));
        }
        let base = match self.base_view {
            BaseView::FinalFrame => run.frames().last(),
            BaseView::FirstFrame => run.frames().first(),
        }
        .ok_or_else(|| ReplayError::validation("run captured no frames"))?;

        self.assemble_frames(
            run.labels().clone(),
            run.colors().clone(),
            run.frames().to_vec(),
            base.data.clone(),
        )
    }

    /// Assemble from an explicit frame list and base view.
    pub fn assemble_frames(
        &self,
        labels: LabelSet,
        colors: ColorMap,
        frames: Vec<Frame>,
        base: Vec<Trace>,
    ) -> ReplayResult<Figure> {
        let fig = Figure {
            dim: self.dim,
            labels,
            colors,
            data: base,
            layout: self.layout(),
            config: FigureConfig {
                responsive: self.responsive,
            },
            frames,
            animation: self.animation,
        };
        fig.validate()?;
        tracing::debug!(
            frames = fig.frames.len(),
            points = fig.points_per_frame(),
            "figure assembled"
        );
        Ok(fig)
    }

    fn axis(&self, index: usize) -> AxisLayout {
        AxisLayout {
            title: Title::new(self.axis_titles[index].clone()),
            range: self.ranges[index],
        }
    }

    fn layout(&self) -> Layout {
        let (xaxis, yaxis, scene) = match self.dim {
            Dim::Two => (Some(self.axis(0)), Some(self.axis(1)), None),
            Dim::Three => (
                None,
                None,
                Some(Scene {
                    xaxis: self.axis(0),
                    yaxis: self.axis(1),
                    zaxis: self.axis(2),
                }),
            ),
        };
        Layout {
            height: self.height,
            title: Title::new(self.title.clone()),
            xaxis,
            yaxis,
            scene,
            updatemenus: vec![UpdateMenu {
                kind: MenuKind::Buttons,
                showactive: false,
                buttons: vec![Button {
                    label: "Play".to_string(),
                    method: ButtonMethod::Animate,
                    args: (None, self.playback.animate_options()),
                }],
            }],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/figure/assembler.rs"]
mod tests;
