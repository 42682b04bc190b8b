use super::*;

#[test]
fn default_palette_follows_label_position() {
    let set = LabelSet::new([7, 3]).unwrap();
    let map = ColorMap::with_default_palette(&set);
    assert_eq!(map.get(7), Some(Rgba::new(255, 0, 0, 1.0)));
    assert_eq!(map.get(3), Some(Rgba::new(0, 255, 0, 1.0)));
    assert_eq!(map.get(0), None);
}

#[test]
fn default_palette_cycles_past_ten_classes() {
    let set = LabelSet::range(12).unwrap();
    let map = ColorMap::with_default_palette(&set);
    assert_eq!(map.get(10), map.get(0));
    assert_eq!(map.get(11), map.get(1));
    assert_eq!(map.len(), 12);
}

#[test]
fn ensure_covers_names_missing_label() {
    let set = LabelSet::new([0, 1, 2]).unwrap();
    let map = ColorMap::new()
        .with(0, Rgba::new(1, 2, 3, 1.0))
        .with(2, Rgba::new(1, 2, 3, 1.0));
    let err = map.ensure_covers(&set).unwrap_err();
    assert!(err.to_string().contains("label 1"));
}

#[test]
fn serializes_as_label_keyed_object() {
    let map = ColorMap::new().with(4, Rgba::new(0, 0, 255, 0.5));
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json, serde_json::json!({ "4": "rgba(0, 0, 255, 0.5)" }));
    let back: ColorMap = serde_json::from_value(json).unwrap();
    assert_eq!(back, map);
}
