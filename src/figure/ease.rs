/// Transition easing curve applied by the renderer between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Constant speed.
    #[serde(rename = "linear")]
    Linear,
    /// Quadratic ease-in.
    #[serde(rename = "quad-in")]
    InQuad,
    /// Quadratic ease-out.
    #[serde(rename = "quad-out")]
    OutQuad,
    /// Quadratic ease-in-out.
    #[serde(rename = "quad-in-out")]
    InOutQuad,
    /// Cubic ease-in.
    #[serde(rename = "cubic-in")]
    InCubic,
    /// Cubic ease-out.
    #[serde(rename = "cubic-out")]
    OutCubic,
    /// Cubic ease-in-out.
    #[serde(rename = "cubic-in-out")]
    InOutCubic,
}

impl Ease {
    /// Parse the renderer's easing name (`"cubic-in-out"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
    }
}
