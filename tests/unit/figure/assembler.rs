use super::*;
use crate::capture::policy::CapturePolicy;
use crate::capture::scheduler::SnapshotScheduler;
use crate::foundation::core::{CoordView, Iteration};
use crate::frame::snapshot::Snapshot;

fn run(dim: Dim, iters: std::ops::RangeInclusive<u64>) -> CompletedRun {
    let labels = LabelSet::new([0, 1, 2]).unwrap();
    let colors = ColorMap::with_default_palette(&labels);
    let builder = crate::frame::builder::FrameBuilder::new(dim, labels, colors).unwrap();
    let point_labels = vec![0, 1, 2, 0, 1];
    let mut s = SnapshotScheduler::new(builder, point_labels, CapturePolicy::default()).unwrap();
    s.begin().unwrap();
    let n = 5 * dim.axes();
    let mut buf = vec![0.0; n];
    for it in iters {
        for (i, v) in buf.iter_mut().enumerate() {
            *v = (it as f64) * 0.5 - i as f64;
        }
        s.on_progress(Snapshot {
            iteration: Iteration(it),
            loss: 1.0 / (it as f64 + 1.0),
            coords: CoordView::from_flat(&buf, dim).unwrap(),
        })
        .unwrap();
    }
    s.complete().unwrap();
    s.into_run().unwrap()
}

#[test]
fn assembling_twice_yields_identical_figures() {
    let r = run(Dim::Two, 0..=300);
    let a = FigureAssembler::new(Dim::Two);
    let f1 = a.assemble(&r).unwrap();
    let f2 = a.assemble(&r).unwrap();
    assert_eq!(f1, f2);
    assert_eq!(f1.fingerprint().unwrap(), f2.fingerprint().unwrap());
    assert_eq!(f1.to_json_pretty().unwrap(), f2.to_json_pretty().unwrap());
    assert_eq!(f1.frames.len(), 31);
}

#[test]
fn base_view_defaults_to_final_frame() {
    let r = run(Dim::Two, 0..=42);
    let fig = FigureAssembler::new(Dim::Two).assemble(&r).unwrap();
    let last = fig.frames.last().unwrap();
    assert_eq!(last.iteration, Iteration(42));
    assert_eq!(fig.data, last.data);

    let fig = FigureAssembler::new(Dim::Two)
        .base_view(BaseView::FirstFrame)
        .assemble(&r)
        .unwrap();
    assert_eq!(fig.data, fig.frames[0].data);
}

#[test]
fn label_colors_are_stable_across_frames() {
    let r = run(Dim::Two, 0..=100);
    let fig = FigureAssembler::new(Dim::Two).assemble(&r).unwrap();
    for frame in &fig.frames {
        for (trace, base) in frame.data.iter().zip(&fig.data) {
            assert_eq!(trace.marker, base.marker);
            assert_eq!(trace.name, base.name);
        }
    }
    for (trace, label) in fig.data.iter().zip(fig.labels.iter()) {
        assert_eq!(Some(trace.marker.color), fig.colors.get(label));
    }
}

#[test]
fn two_dimensional_layout_and_play_button() {
    let r = run(Dim::Two, 0..=20);
    let fig = FigureAssembler::new(Dim::Two).assemble(&r).unwrap();
    let v = serde_json::to_value(&fig).unwrap();

    assert_eq!(v["layout"]["height"], 500);
    assert_eq!(v["layout"]["title"]["text"], "t-SNE");
    assert_eq!(v["layout"]["xaxis"]["title"]["text"], "X");
    assert!(v["layout"].get("scene").is_none());
    assert_eq!(v["data"][0]["type"], "scatter");
    assert_eq!(v["data"][0]["mode"], "markers");
    assert!(v["data"][0].get("z").is_none());

    let menus = v["layout"]["updatemenus"].as_array().unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0]["type"], "buttons");
    let buttons = menus[0]["buttons"].as_array().unwrap();
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0]["label"], "Play");
    assert_eq!(buttons[0]["method"], "animate");
    assert!(buttons[0]["args"][0].is_null());
    let opts = &buttons[0]["args"][1];
    assert_eq!(opts["frame"]["duration"], 200);
    assert_eq!(opts["frame"]["redraw"], false);
    assert_eq!(opts["transition"]["duration"], 200);
    assert_eq!(opts["fromcurrent"], true);
    assert_eq!(opts["mode"], "immediate");

    assert_eq!(v["animation"]["frame"]["duration"], 100);
    assert_eq!(v["animation"]["transition"]["easing"], "linear");
}

#[test]
fn three_dimensional_layout_uses_scene_ranges() {
    let r = run(Dim::Three, 0..=20);
    let fig = FigureAssembler::new(Dim::Three).assemble(&r).unwrap();
    let v = serde_json::to_value(&fig).unwrap();

    assert_eq!(v["layout"]["height"], 800);
    assert!(v["layout"].get("xaxis").is_none());
    for axis in ["xaxis", "yaxis", "zaxis"] {
        assert_eq!(v["layout"]["scene"][axis]["range"], serde_json::json!([-500.0, 500.0]));
    }
    assert_eq!(v["data"][0]["type"], "scatter3d");
    assert!(v["data"][0]["z"].is_array());
    let opts = &v["layout"]["updatemenus"][0]["buttons"][0]["args"][1];
    assert_eq!(opts["frame"]["duration"], 0);
    assert_eq!(opts["frame"]["redraw"], true);
    assert_eq!(opts["transition"]["duration"], 0);
    assert_eq!(v["animation"]["frame"]["redraw"], true);
    assert_eq!(v["data"][0]["marker"]["line"]["width"], 3.0);
}

#[test]
fn settings_override_defaults() {
    let settings = FigureSettings {
        title: Some("digits".to_string()),
        height: Some(640),
        range: Some([-50.0, 50.0]),
        ..FigureSettings::default()
    };
    let r = run(Dim::Two, 0..=10);
    let fig = FigureAssembler::with_settings(Dim::Two, &settings)
        .unwrap()
        .assemble(&r)
        .unwrap();
    assert_eq!(fig.layout.title.text, "digits");
    assert_eq!(fig.layout.height, 640);
    assert_eq!(fig.layout.xaxis.as_ref().unwrap().range, Some([-50.0, 50.0]));
}

#[test]
fn invalid_settings_are_rejected() {
    let bad_range = FigureSettings {
        range: Some([1.0, -1.0]),
        ..FigureSettings::default()
    };
    assert!(FigureAssembler::with_settings(Dim::Two, &bad_range).is_err());
    let zero_height = FigureSettings {
        height: Some(0),
        ..FigureSettings::default()
    };
    assert!(FigureAssembler::with_settings(Dim::Two, &zero_height).is_err());
    assert!(FigureAssembler::new(Dim::Two).axis_title(3, "W").is_err());
}

#[test]
fn dimensionality_mismatch_is_rejected() {
    let r = run(Dim::Two, 0..=10);
    let err = FigureAssembler::new(Dim::Three).assemble(&r).unwrap_err();
    assert!(matches!(err, ReplayError::ShapeMismatch(_)));
}

#[test]
fn empty_frame_list_is_rejected() {
    let labels = LabelSet::new([0]).unwrap();
    let colors = ColorMap::with_default_palette(&labels);
    let err = FigureAssembler::new(Dim::Two)
        .assemble_frames(labels, colors, Vec::new(), Vec::new())
        .unwrap_err();
    assert!(matches!(err, ReplayError::Validation(_)));
}
