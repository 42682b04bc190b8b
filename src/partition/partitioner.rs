use crate::foundation::core::{CoordView, Dim, LabelSet};
use crate::foundation::error::{ReplayError, ReplayResult};

/// All points of one class in one snapshot, in input row order.
///
/// Stored column-wise (`x`, `y`, optional `z`) which is the shape trace arrays take in the
/// figure descriptor. The label travels in the trace `meta` slot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Series {
    /// Class label shared by every point in the series.
    #[serde(rename = "meta")]
    pub label: i64,
    /// First coordinate of every point.
    pub x: Vec<f64>,
    /// Second coordinate of every point.
    pub y: Vec<f64>,
    /// Third coordinate of every point (3D runs only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<f64>>,
}

impl Series {
    /// Empty series for `label` with columns matching `dim`.
    pub fn empty(label: i64, dim: Dim) -> Self {
        Self::with_capacity(label, dim, 0)
    }

    fn with_capacity(label: i64, dim: Dim, cap: usize) -> Self {
        Self {
            label,
            x: Vec::with_capacity(cap),
            y: Vec::with_capacity(cap),
            z: match dim {
                Dim::Two => None,
                Dim::Three => Some(Vec::with_capacity(cap)),
            },
        }
    }

    /// Dimensionality implied by the populated columns.
    pub fn dim(&self) -> Dim {
        if self.z.is_some() {
            Dim::Three
        } else {
            Dim::Two
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` when the class has no points in this snapshot.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn push(&mut self, p: &[f64]) {
        self.x.push(p[0]);
        self.y.push(p[1]);
        if let Some(z) = self.z.as_mut() {
            z.push(p[2]);
        }
    }

    /// Coordinates of point `i`, or `None` past the end or on ragged columns.
    pub fn point(&self, i: usize) -> Option<Vec<f64>> {
        let (x, y) = (*self.x.get(i)?, *self.y.get(i)?);
        match &self.z {
            Some(z) => Some(vec![x, y, *z.get(i)?]),
            None => Some(vec![x, y]),
        }
    }

    /// All points, row-wise.
    pub fn points(&self) -> Vec<Vec<f64>> {
        (0..self.len()).map_while(|i| self.point(i)).collect()
    }

    /// Column lengths agree with each other and with the implied dimensionality.
    pub fn is_consistent(&self) -> bool {
        self.y.len() == self.x.len() && self.z.as_ref().is_none_or(|z| z.len() == self.x.len())
    }
}

/// One snapshot split into exactly one series per declared label, in label-set order.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    /// Dimensionality of every series.
    pub dim: Dim,
    /// One series per label, including empty ones.
    pub series: Vec<Series>,
}

impl Partition {
    /// Total number of points across all series.
    pub fn total_points(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    /// `(label, count)` per series, in label-set order.
    pub fn histogram(&self) -> Vec<(i64, usize)> {
        self.series.iter().map(|s| (s.label, s.len())).collect()
    }

    /// Consume into the series list.
    pub fn into_series(self) -> Vec<Series> {
        self.series
    }
}

/// Stateless splitter from a labeled coordinate snapshot to per-class series.
pub struct LabelPartitioner;

impl LabelPartitioner {
    /// Split `coords` into one series per label of `set`.
    ///
    /// Every coordinate is copied; the result never borrows from `coords`.
    #[tracing::instrument(skip_all, fields(rows = coords.rows(), classes = set.len()))]
    pub fn partition(
        coords: CoordView<'_>,
        labels: &[i64],
        set: &LabelSet,
    ) -> ReplayResult<Partition> {
        if coords.rows() != labels.len() {
            return Err(ReplayError::shape(format!(
                "{} coordinate rows but {} labels",
                coords.rows(),
                labels.len()
            )));
        }

        let slots = resolve_slots(labels, set)?;
        let dim = coords.dim();

        let mut counts = vec![0usize; set.len()];
        for &slot in &slots {
            counts[slot] += 1;
        }
        let mut series: Vec<Series> = set
            .iter()
            .zip(&counts)
            .map(|(label, &n)| Series::with_capacity(label, dim, n))
            .collect();

        for (row, &slot) in slots.iter().enumerate() {
            let p = coords.row(row);
            if p.iter().any(|v| !v.is_finite()) {
                return Err(ReplayError::validation(format!(
                    "non-finite coordinate at row {row}"
                )));
            }
            series[slot].push(p);
        }

        Ok(Partition { dim, series })
    }
}

/// Map each row's label to its series slot; the first label outside `set` fails.
fn resolve_slots(labels: &[i64], set: &LabelSet) -> ReplayResult<Vec<usize>> {
    labels
        .iter()
        .enumerate()
        .map(|(row, &label)| {
            set.position(label)
                .ok_or(ReplayError::UnknownLabel { label, row })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/partition/partitioner.rs"]
mod tests;
