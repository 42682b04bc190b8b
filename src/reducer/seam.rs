use std::borrow::Cow;

use crate::{
    capture::policy::Signal,
    foundation::core::{Matrix, MatrixView},
    frame::snapshot::Snapshot,
    reducer::params::ReducerParams,
};

/// Iterative nonlinear embedding (t-SNE style).
///
/// Implementations call `on_step` once per iteration, in increasing iteration order, with the
/// current N×D embedding. Returning [`Signal::Stop`] asks the optimizer to end after that
/// iteration. The borrowed coordinates may be overwritten as soon as `on_step` returns.
pub trait DimensionalityReducer {
    /// Run the optimizer over `input`.
    fn embed(
        &mut self,
        input: MatrixView<'_>,
        params: &ReducerParams,
        on_step: &mut dyn FnMut(Snapshot<'_>) -> Signal,
    ) -> anyhow::Result<()>;
}

/// Linear projection applied to the input before embedding (e.g. PCA).
pub trait Preprocessor {
    /// Project `input` down to at most `components` columns.
    fn project<'a>(&self, input: &'a Matrix, components: usize)
    -> anyhow::Result<Cow<'a, Matrix>>;
}

/// Pass-through preprocessing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl Preprocessor for Identity {
    fn project<'a>(
        &self,
        input: &'a Matrix,
        _components: usize,
    ) -> anyhow::Result<Cow<'a, Matrix>> {
        Ok(Cow::Borrowed(input))
    }
}
