use std::fmt;

use crate::foundation::error::{ReplayError, ReplayResult};

/// Output dimensionality of an embedding run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Dim {
    /// Planar embedding (`x`, `y`).
    Two,
    /// Spatial embedding (`x`, `y`, `z`).
    Three,
}

impl Dim {
    /// Number of coordinates per point.
    pub fn axes(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Parse a coordinate count into a dimensionality.
    pub fn from_len(n: usize) -> ReplayResult<Self> {
        match n {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(ReplayError::validation(format!(
                "output dimensionality must be 2 or 3, got {other}"
            ))),
        }
    }
}

impl TryFrom<u8> for Dim {
    type Error = ReplayError;

    fn try_from(v: u8) -> ReplayResult<Self> {
        Self::from_len(usize::from(v))
    }
}

impl From<Dim> for u8 {
    fn from(d: Dim) -> Self {
        d.axes() as u8
    }
}

/// Optimizer iteration index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Iteration(pub u64);

impl fmt::Display for Iteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The declared, ordered set of class labels for one run.
///
/// Order is significant: series, colors and legend entries follow it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct LabelSet {
    labels: Vec<i64>,
}

impl LabelSet {
    /// Build a label set; rejects empty and duplicate entries.
    pub fn new(labels: impl IntoIterator<Item = i64>) -> ReplayResult<Self> {
        let labels: Vec<i64> = labels.into_iter().collect();
        if labels.is_empty() {
            return Err(ReplayError::validation("label set must be non-empty"));
        }
        for (i, l) in labels.iter().enumerate() {
            if labels[..i].contains(l) {
                return Err(ReplayError::validation(format!(
                    "label set contains duplicate label {l}"
                )));
            }
        }
        Ok(Self { labels })
    }

    /// Labels `0..n`, the common case for digit-style datasets.
    pub fn range(n: u32) -> ReplayResult<Self> {
        Self::new((0..i64::from(n)).collect::<Vec<_>>())
    }

    /// Sorted, de-duplicated set of the labels observed in `labels`.
    pub fn observed(labels: &[i64]) -> ReplayResult<Self> {
        let mut v = labels.to_vec();
        v.sort_unstable();
        v.dedup();
        Self::new(v)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of `label` within the set.
    pub fn position(&self, label: i64) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    /// Labels in declaration order.
    pub fn as_slice(&self) -> &[i64] {
        &self.labels
    }

    /// Iterate labels in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.labels.iter().copied()
    }
}

impl TryFrom<Vec<i64>> for LabelSet {
    type Error = ReplayError;

    fn try_from(v: Vec<i64>) -> ReplayResult<Self> {
        Self::new(v)
    }
}

impl From<LabelSet> for Vec<i64> {
    fn from(s: LabelSet) -> Self {
        s.labels
    }
}

/// Borrowed row-major matrix of arbitrary width (e.g. the N×784 input features).
#[derive(Clone, Copy, Debug)]
pub struct MatrixView<'a> {
    data: &'a [f64],
    rows: usize,
    cols: usize,
}

impl<'a> MatrixView<'a> {
    /// Wrap a row-major buffer; `data.len()` must equal `rows * cols`.
    pub fn new(data: &'a [f64], rows: usize, cols: usize) -> ReplayResult<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(ReplayError::shape(format!(
                "buffer of {} values cannot hold {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// One row as a slice.
    pub fn row(&self, i: usize) -> &'a [f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Backing buffer.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }
}

/// Owned row-major matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Build from a row-major buffer.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> ReplayResult<Self> {
        MatrixView::new(&data, rows, cols)?;
        Ok(Self { data, rows, cols })
    }

    /// Build from nested rows; every row must have the same width.
    pub fn from_rows(rows: &[Vec<f64>]) -> ReplayResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, r) in rows.iter().enumerate() {
            if r.len() != cols {
                return Err(ReplayError::shape(format!(
                    "row {i} has {} columns, expected {cols}",
                    r.len()
                )));
            }
            data.extend_from_slice(r);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Borrow as a view.
    pub fn view(&self) -> MatrixView<'_> {
        MatrixView {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// Borrowed N×D embedding coordinates as handed over by the optimizer.
///
/// The buffer belongs to the optimizer and may be rewritten on the next iteration; anything
/// retained past the callback must be copied out.
#[derive(Clone, Copy, Debug)]
pub struct CoordView<'a> {
    data: &'a [f64],
    rows: usize,
    dim: Dim,
}

impl<'a> CoordView<'a> {
    /// Wrap a row-major coordinate buffer of `rows` points.
    pub fn new(data: &'a [f64], rows: usize, dim: Dim) -> ReplayResult<Self> {
        MatrixView::new(data, rows, dim.axes())?;
        Ok(Self { data, rows, dim })
    }

    /// Wrap a row-major buffer, inferring the row count from its length.
    pub fn from_flat(data: &'a [f64], dim: Dim) -> ReplayResult<Self> {
        if data.len() % dim.axes() != 0 {
            return Err(ReplayError::shape(format!(
                "buffer of {} values is not a multiple of dimensionality {}",
                data.len(),
                dim.axes()
            )));
        }
        Ok(Self {
            data,
            rows: data.len() / dim.axes(),
            dim,
        })
    }

    /// Number of points.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Dimensionality of every point.
    pub fn dim(&self) -> Dim {
        self.dim
    }

    /// Coordinates of point `i`.
    pub fn row(&self, i: usize) -> &'a [f64] {
        let d = self.dim.axes();
        &self.data[i * d..(i + 1) * d]
    }

    /// Backing buffer.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }
}

/// Straight-alpha RGBA color.
///
/// Serialized in the CSS form `rgba(r, g, b, a)` understood by browser charting libraries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    /// Build a color; alpha is clamped to `[0, 1]`.
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 1.0 };
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse `rgba(..)`, `rgb(..)`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse(s: &str) -> ReplayResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let (body, has_alpha) = if let Some(b) = s.strip_prefix("rgba(") {
            (b, true)
        } else if let Some(b) = s.strip_prefix("rgb(") {
            (b, false)
        } else {
            return Err(ReplayError::validation(format!("unsupported color '{s}'")));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ReplayError::validation(format!("unterminated color '{s}'")))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ReplayError::validation(format!(
                "color '{s}' must have {expected} components"
            )));
        }
        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| ReplayError::validation(format!("bad color channel '{p}'")))
        };
        let a = if has_alpha {
            parts[3]
                .parse::<f64>()
                .map_err(|_| ReplayError::validation(format!("bad alpha '{}'", parts[3])))?
        } else {
            1.0
        };
        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            a,
        ))
    }
}

fn parse_hex(hex: &str) -> ReplayResult<Rgba> {
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(ReplayError::validation(format!(
            "hex color '#{hex}' must be #rrggbb or #rrggbbaa"
        )));
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| ReplayError::validation(format!("bad hex color '#{hex}'")))
    };
    let a = if hex.len() == 8 {
        f64::from(byte(6)?) / 255.0
    } else {
        1.0
    };
    Ok(Rgba::new(byte(0)?, byte(2)?, byte(4)?, a))
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl serde::Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
