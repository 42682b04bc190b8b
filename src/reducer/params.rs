use crate::foundation::core::Dim;
use crate::foundation::error::{ReplayError, ReplayResult};

/// Hyperparameters handed to a [`crate::DimensionalityReducer`].
///
/// Fields missing on deserialization take the reference settings of the given `dim`, so
/// `{"dim": 3}` alone yields [`ReducerParams::for_dim`]`(Dim::Three)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawReducerParams")]
pub struct ReducerParams {
    /// Output dimensionality.
    pub dim: Dim,
    /// Effective neighbourhood size.
    pub perplexity: f64,
    /// Gradient step size.
    pub learning_rate: f64,
    /// Iteration budget.
    pub max_iterations: u64,
    /// Components kept by the linear preprocessing step; `None` disables it.
    pub pca_components: Option<usize>,
}

impl ReducerParams {
    /// Reference settings for `dim`.
    pub fn for_dim(dim: Dim) -> Self {
        match dim {
            Dim::Two => Self {
                dim,
                perplexity: 300.0,
                learning_rate: 300.0,
                max_iterations: 300,
                pca_components: Some(50),
            },
            Dim::Three => Self {
                dim,
                perplexity: 500.0,
                learning_rate: 500.0,
                max_iterations: 300,
                pca_components: Some(100),
            },
        }
    }

    /// Reject non-finite or non-positive hyperparameters.
    pub fn validate(&self) -> ReplayResult<()> {
        for (name, v) in [
            ("perplexity", self.perplexity),
            ("learning_rate", self.learning_rate),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReplayError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if self.max_iterations == 0 {
            return Err(ReplayError::validation("max_iterations must be > 0"));
        }
        if self.pca_components == Some(0) {
            return Err(ReplayError::validation("pca_components must be > 0"));
        }
        Ok(())
    }
}

impl Default for ReducerParams {
    fn default() -> Self {
        Self::for_dim(Dim::Two)
    }
}

#[derive(serde::Deserialize)]
struct RawReducerParams {
    #[serde(default)]
    dim: Option<Dim>,
    #[serde(default)]
    perplexity: Option<f64>,
    #[serde(default)]
    learning_rate: Option<f64>,
    #[serde(default)]
    max_iterations: Option<u64>,
    // Outer `None`: absent. `Some(None)`: explicit null, preprocessing off.
    #[serde(default, deserialize_with = "present")]
    pca_components: Option<Option<usize>>,
}

fn present<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    T::deserialize(de).map(Some)
}

impl From<RawReducerParams> for ReducerParams {
    fn from(raw: RawReducerParams) -> Self {
        let base = Self::for_dim(raw.dim.unwrap_or(Dim::Two));
        Self {
            dim: base.dim,
            perplexity: raw.perplexity.unwrap_or(base.perplexity),
            learning_rate: raw.learning_rate.unwrap_or(base.learning_rate),
            max_iterations: raw.max_iterations.unwrap_or(base.max_iterations),
            pca_components: raw.pca_components.unwrap_or(base.pca_components),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reducer/params.rs"]
mod tests;
