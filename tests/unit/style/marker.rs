use super::*;

#[test]
fn flat_markers_carry_color_only() {
    let m = FlatMarkers.marker(0, Rgba::new(255, 0, 0, 1.0));
    assert_eq!(m.color, Rgba::new(255, 0, 0, 1.0));
    assert!(m.size.is_none());
    assert!(m.line.is_none());
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json, serde_json::json!({ "color": "rgba(255, 0, 0, 1)" }));
}

#[test]
fn outlined_markers_split_fill_and_line_alpha() {
    let m = OutlinedMarkers::default().marker(3, Rgba::new(75, 0, 130, 1.0));
    assert_eq!(m.color, Rgba::new(75, 0, 130, 0.8));
    let line = m.line.unwrap();
    assert_eq!(line.color, Rgba::new(75, 0, 130, 1.0));
    assert_eq!(line.width, 3.0);
}

#[test]
fn default_style_depends_on_dim_only() {
    let c = Rgba::new(0, 255, 255, 1.0);
    assert!(default_style(Dim::Two).marker(1, c).line.is_none());
    assert!(default_style(Dim::Three).marker(1, c).line.is_some());
}
