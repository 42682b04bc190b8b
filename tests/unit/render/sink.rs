use super::*;
use crate::figure::assembler::FigureAssembler;
use crate::foundation::core::{CoordView, Dim, Iteration, LabelSet};
use crate::frame::builder::FrameBuilder;
use crate::frame::snapshot::Snapshot;
use crate::style::palette::ColorMap;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "embedreplay_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn figure() -> Figure {
    let labels = LabelSet::new([0, 1]).unwrap();
    let colors = ColorMap::with_default_palette(&labels);
    let b = FrameBuilder::new(Dim::Two, labels.clone(), colors.clone()).unwrap();
    let data = [0.0, 1.0, 2.0, 3.0];
    let frame = b
        .build(
            &Snapshot {
                iteration: Iteration(0),
                loss: 1.0,
                coords: CoordView::from_flat(&data, Dim::Two).unwrap(),
            },
            &[0, 1],
        )
        .unwrap();
    let base = frame.data.clone();
    FigureAssembler::new(Dim::Two)
        .assemble_frames(labels, colors, vec![frame], base)
        .unwrap()
}

#[test]
fn in_memory_renderer_keeps_figures_in_order() {
    let mut r = InMemoryRenderer::new();
    let fig = figure();
    r.render(&fig).unwrap();
    r.render(&fig).unwrap();
    assert_eq!(r.figures.len(), 2);
    assert_eq!(r.last(), Some(&fig));
}

#[test]
fn json_renderer_writes_a_loadable_figure() {
    let dir = temp_dir("json_renderer");
    let path = dir.join("nested").join("fig.json");
    let fig = figure();
    JsonFileRenderer::new(&path).pretty(false).render(&fig).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\n'));
    assert_eq!(Figure::from_json(&text).unwrap(), fig);
    let _ = std::fs::remove_dir_all(&dir);
}
