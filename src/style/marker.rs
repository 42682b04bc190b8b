use crate::foundation::core::{Dim, Rgba};

/// Resolved marker styling for one series.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Marker {
    /// Fill color.
    pub color: Rgba,
    /// Marker size in pixels, when fixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Marker outline, when drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

/// Marker outline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarkerLine {
    /// Outline color.
    pub color: Rgba,
    /// Outline width in pixels.
    pub width: f64,
}

/// Data-independent styling applied to every series of every frame in a run.
///
/// Implementations must be pure in `(label, color)`: frames are styled one at a time and the
/// figure relies on identical output for identical input.
pub trait StylePolicy: std::fmt::Debug {
    /// Marker for the series of `label`, whose base color is `color`.
    fn marker(&self, label: i64, color: Rgba) -> Marker;
}

/// Color-only markers (2D default).
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatMarkers;

impl StylePolicy for FlatMarkers {
    fn marker(&self, _label: i64, color: Rgba) -> Marker {
        Marker {
            color,
            size: None,
            line: None,
        }
    }
}

/// Translucent fill with an opaque outline (3D default).
#[derive(Clone, Copy, Debug)]
pub struct OutlinedMarkers {
    /// Alpha applied to the fill color.
    pub fill_alpha: f64,
    /// Outline width in pixels.
    pub line_width: f64,
    /// Optional fixed marker size.
    pub size: Option<f64>,
}

impl Default for OutlinedMarkers {
    fn default() -> Self {
        Self {
            fill_alpha: 0.8,
            line_width: 3.0,
            size: None,
        }
    }
}

impl StylePolicy for OutlinedMarkers {
    fn marker(&self, _label: i64, color: Rgba) -> Marker {
        Marker {
            color: color.with_alpha(self.fill_alpha),
            size: self.size,
            line: Some(MarkerLine {
                color: color.with_alpha(1.0),
                width: self.line_width,
            }),
        }
    }
}

/// Styling used when the caller does not inject one.
pub fn default_style(dim: Dim) -> Box<dyn StylePolicy> {
    match dim {
        Dim::Two => Box::new(FlatMarkers),
        Dim::Three => Box::new(OutlinedMarkers::default()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/marker.rs"]
mod tests;
