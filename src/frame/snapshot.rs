use crate::foundation::core::{CoordView, Dim, Iteration};
use crate::foundation::error::ReplayResult;

/// One optimizer step as seen by the progress callback.
///
/// Borrows the optimizer's working buffer; valid only for the duration of the callback.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    /// Iteration index.
    pub iteration: Iteration,
    /// Loss (divergence) reported for this iteration.
    pub loss: f64,
    /// Current N×D embedding.
    pub coords: CoordView<'a>,
}

/// Owned copy of a [`Snapshot`], reused across iterations to avoid reallocating.
#[derive(Clone, Debug)]
pub struct OwnedSnapshot {
    iteration: Iteration,
    loss: f64,
    rows: usize,
    dim: Dim,
    data: Vec<f64>,
}

impl OwnedSnapshot {
    /// Deep copy of `snap`.
    pub fn copy_of(snap: &Snapshot<'_>) -> Self {
        Self {
            iteration: snap.iteration,
            loss: snap.loss,
            rows: snap.coords.rows(),
            dim: snap.coords.dim(),
            data: snap.coords.as_slice().to_vec(),
        }
    }

    /// Overwrite with a deep copy of `snap`, keeping the allocation.
    pub fn overwrite(&mut self, snap: &Snapshot<'_>) {
        self.iteration = snap.iteration;
        self.loss = snap.loss;
        self.rows = snap.coords.rows();
        self.dim = snap.coords.dim();
        self.data.clear();
        self.data.extend_from_slice(snap.coords.as_slice());
    }

    /// Iteration of the copied step.
    pub fn iteration(&self) -> Iteration {
        self.iteration
    }

    /// Borrow back as a [`Snapshot`].
    pub fn view(&self) -> ReplayResult<Snapshot<'_>> {
        Ok(Snapshot {
            iteration: self.iteration,
            loss: self.loss,
            coords: CoordView::new(&self.data, self.rows, self.dim)?,
        })
    }
}
