use std::path::Path;

use crate::foundation::core::{LabelSet, Matrix};
use crate::foundation::error::{ReplayError, ReplayResult};

/// Source of the N×D input matrix and its N class labels.
pub trait LabeledDataset {
    /// Input features, one row per point.
    fn features(&self) -> &Matrix;

    /// One class label per feature row.
    fn labels(&self) -> &[i64];

    /// Distinct labels in ascending order.
    fn label_set(&self) -> ReplayResult<LabelSet> {
        LabelSet::observed(self.labels())
    }
}

/// Dataset held entirely in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct InMemoryDataset {
    features: Matrix,
    labels: Vec<i64>,
}

impl InMemoryDataset {
    /// Pair `features` with `labels`; row counts must agree.
    pub fn new(features: Matrix, labels: Vec<i64>) -> ReplayResult<Self> {
        if features.rows() != labels.len() {
            return Err(ReplayError::shape(format!(
                "{} feature rows but {} labels",
                features.rows(),
                labels.len()
            )));
        }
        Ok(Self { features, labels })
    }

    /// Labels only, with a zero-width feature matrix.
    ///
    /// Used when the embedding comes from a recorded trajectory rather than the features.
    pub fn labels_only(labels: Vec<i64>) -> ReplayResult<Self> {
        let features = Matrix::new(Vec::new(), labels.len(), 0)?;
        Self::new(features, labels)
    }

    /// Parse a JSON integer array of labels.
    pub fn labels_from_json(s: &str) -> ReplayResult<Vec<i64>> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a JSON integer array of labels from `path`.
    pub fn labels_from_path(path: impl AsRef<Path>) -> ReplayResult<Vec<i64>> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            ReplayError::Other(anyhow::Error::new(e).context(format!("read {}", path.display())))
        })?;
        Self::labels_from_json(&s)
    }
}

impl LabeledDataset for InMemoryDataset {
    fn features(&self) -> &Matrix {
        &self.features
    }

    fn labels(&self) -> &[i64] {
        &self.labels
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reducer/dataset.rs"]
mod tests;
