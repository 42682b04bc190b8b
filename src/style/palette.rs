use std::collections::BTreeMap;

use crate::foundation::core::{LabelSet, Rgba};
use crate::foundation::error::{ReplayError, ReplayResult};

/// Ten-entry palette assigned by label position when the caller supplies no colors.
pub const DEFAULT_PALETTE: [(u8, u8, u8); 10] = [
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 0, 255),
    (0, 255, 255),
    (128, 0, 128),
    (255, 165, 0),
    (75, 0, 130),
    (0, 0, 0),
];

/// Explicit label → color mapping, fixed for a whole run.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorMap {
    colors: BTreeMap<i64, Rgba>,
}

impl ColorMap {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign [`DEFAULT_PALETTE`] by position in `set`, cycling past ten classes.
    pub fn with_default_palette(set: &LabelSet) -> Self {
        let colors = set
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let (r, g, b) = DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()];
                (label, Rgba::new(r, g, b, 1.0))
            })
            .collect();
        Self { colors }
    }

    /// Set (or replace) the color for `label`.
    pub fn insert(&mut self, label: i64, color: Rgba) -> &mut Self {
        self.colors.insert(label, color);
        self
    }

    /// Builder-style [`ColorMap::insert`].
    pub fn with(mut self, label: i64, color: Rgba) -> Self {
        self.colors.insert(label, color);
        self
    }

    /// Color assigned to `label`.
    pub fn get(&self, label: i64) -> Option<Rgba> {
        self.colors.get(&label).copied()
    }

    /// Fail unless every label of `set` has a color.
    pub fn ensure_covers(&self, set: &LabelSet) -> ReplayResult<()> {
        match set.iter().find(|l| !self.colors.contains_key(l)) {
            Some(missing) => Err(ReplayError::validation(format!(
                "color map has no entry for label {missing}"
            ))),
            None => Ok(()),
        }
    }

    /// Number of mapped labels.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// `true` when no label is mapped.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/palette.rs"]
mod tests;
