use crate::{
    foundation::core::{Dim, Iteration, LabelSet},
    foundation::error::{ReplayError, ReplayResult},
    frame::snapshot::Snapshot,
    partition::partitioner::{LabelPartitioner, Partition, Series},
    style::marker::{Marker, StylePolicy, default_style},
    style::palette::ColorMap,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Trace geometry understood by the renderer.
pub enum TraceKind {
    /// Planar scatter.
    #[serde(rename = "scatter")]
    Scatter,
    /// Spatial scatter.
    #[serde(rename = "scatter3d")]
    Scatter3d,
}

impl TraceKind {
    /// Geometry for a run of dimensionality `dim`.
    pub fn for_dim(dim: Dim) -> Self {
        match dim {
            Dim::Two => Self::Scatter,
            Dim::Three => Self::Scatter3d,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How trace points are drawn.
pub enum TraceMode {
    /// Unconnected markers.
    #[default]
    Markers,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One styled series inside a frame or the base view.
pub struct Trace {
    /// Trace geometry.
    #[serde(rename = "type")]
    pub kind: TraceKind,
    /// Legend name (decimal label).
    pub name: String,
    /// Drawing mode.
    #[serde(default)]
    pub mode: TraceMode,
    /// Per-class coordinates.
    #[serde(flatten)]
    pub series: Series,
    /// Resolved marker styling.
    pub marker: Marker,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A named animation keyframe: one styled trace per declared label.
pub struct Frame {
    /// Frame identifier; the decimal iteration number.
    pub name: String,
    /// Optimizer iteration the frame was captured at.
    pub iteration: Iteration,
    /// Loss reported at that iteration.
    pub loss: f64,
    /// One trace per label, in label-set order.
    pub data: Vec<Trace>,
}

/// Turns partitioned snapshots into styled frames.
///
/// Markers are resolved once per label at construction, so every frame built by one builder
/// styles a label identically.
#[derive(Debug)]
pub struct FrameBuilder {
    dim: Dim,
    labels: LabelSet,
    colors: ColorMap,
    style: Box<dyn StylePolicy>,
    markers: Vec<Marker>,
}

impl FrameBuilder {
    /// Builder using the default styling for `dim`.
    pub fn new(dim: Dim, labels: LabelSet, colors: ColorMap) -> ReplayResult<Self> {
        Self::with_style(dim, labels, colors, default_style(dim))
    }

    /// Builder with an injected styling policy.
    pub fn with_style(
        dim: Dim,
        labels: LabelSet,
        colors: ColorMap,
        style: Box<dyn StylePolicy>,
    ) -> ReplayResult<Self> {
        colors.ensure_covers(&labels)?;
        let markers = resolve_markers(&labels, &colors, style.as_ref())?;
        Ok(Self {
            dim,
            labels,
            colors,
            style,
            markers,
        })
    }

    /// Output dimensionality.
    pub fn dim(&self) -> Dim {
        self.dim
    }

    /// Declared label set.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Label → color mapping.
    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    /// Injected styling policy.
    pub fn style(&self) -> &dyn StylePolicy {
        self.style.as_ref()
    }

    /// Partition `snap` by `point_labels` and build its frame.
    #[tracing::instrument(skip_all, fields(iteration = snap.iteration.0))]
    pub fn build(&self, snap: &Snapshot<'_>, point_labels: &[i64]) -> ReplayResult<Frame> {
        if snap.coords.dim() != self.dim {
            return Err(ReplayError::shape(format!(
                "snapshot has {} coordinates per point, run is {}D",
                snap.coords.dim().axes(),
                self.dim.axes()
            )));
        }
        let partition = LabelPartitioner::partition(snap.coords, point_labels, &self.labels)?;
        self.frame_from_partition(snap.iteration, snap.loss, partition)
    }

    /// Build a frame from an already partitioned snapshot.
    pub fn frame_from_partition(
        &self,
        iteration: Iteration,
        loss: f64,
        partition: Partition,
    ) -> ReplayResult<Frame> {
        Ok(Frame {
            name: iteration.to_string(),
            iteration,
            loss,
            data: self.traces(partition)?,
        })
    }

    /// Style a partition into one trace per label.
    pub fn traces(&self, partition: Partition) -> ReplayResult<Vec<Trace>> {
        if partition.dim != self.dim {
            return Err(ReplayError::shape("partition dimensionality differs from run"));
        }
        if partition.series.len() != self.labels.len() {
            return Err(ReplayError::shape(format!(
                "partition has {} series, label set has {}",
                partition.series.len(),
                self.labels.len()
            )));
        }
        let kind = TraceKind::for_dim(self.dim);
        partition
            .into_series()
            .into_iter()
            .zip(self.labels.iter())
            .zip(&self.markers)
            .map(|((series, label), marker)| {
                if series.label != label {
                    return Err(ReplayError::shape(format!(
                        "series for label {} found where label {label} was expected",
                        series.label
                    )));
                }
                Ok(Trace {
                    kind,
                    name: label.to_string(),
                    mode: TraceMode::Markers,
                    series,
                    marker: marker.clone(),
                })
            })
            .collect()
    }
}

fn resolve_markers(
    labels: &LabelSet,
    colors: &ColorMap,
    style: &dyn StylePolicy,
) -> ReplayResult<Vec<Marker>> {
    labels
        .iter()
        .map(|label| {
            colors
                .get(label)
                .map(|c| style.marker(label, c))
                .ok_or_else(|| {
                    ReplayError::validation(format!("color map has no entry for label {label}"))
                })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/frame/builder.rs"]
mod tests;
