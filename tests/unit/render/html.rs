use super::*;
use crate::figure::assembler::FigureAssembler;
use crate::foundation::core::{CoordView, Dim, Iteration, LabelSet};
use crate::frame::builder::FrameBuilder;
use crate::frame::snapshot::Snapshot;
use crate::style::palette::ColorMap;

fn figure(title: &str) -> Figure {
    let labels = LabelSet::new([4]).unwrap();
    let colors = ColorMap::with_default_palette(&labels);
    let b = FrameBuilder::new(Dim::Three, labels.clone(), colors.clone()).unwrap();
    let data = [1.0, 2.0, 3.0];
    let frame = b
        .build(
            &Snapshot {
                iteration: Iteration(10),
                loss: 0.5,
                coords: CoordView::from_flat(&data, Dim::Three).unwrap(),
            },
            &[4],
        )
        .unwrap();
    let base = frame.data.clone();
    FigureAssembler::new(Dim::Three)
        .title(title)
        .assemble_frames(labels, colors, vec![frame], base)
        .unwrap()
}

#[test]
fn page_loads_library_and_plots_descriptor() {
    let page = HtmlPageRenderer::new("unused.html")
        .page(&figure("t-SNE 3D"))
        .unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(PLOTLY_CDN));
    assert!(page.contains("Plotly.newPlot(\"embedreplay\""));
    assert!(page.contains("\"scatter3d\""));
    assert!(page.contains("<title>t-SNE 3D</title>"));
}

#[test]
fn title_cannot_break_out_of_markup() {
    let page = HtmlPageRenderer::new("unused.html")
        .script_src("plotly.js")
        .page(&figure("</script><b>x</b>"))
        .unwrap();
    assert!(page.contains("<title>&lt;/script&gt;&lt;b&gt;x&lt;/b&gt;</title>"));
    assert_eq!(page.matches("</script>").count(), 2);
    assert!(page.contains("<script src=\"plotly.js\"></script>"));
}
