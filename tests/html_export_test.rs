//! HTML 导出的集成测试

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use reportgen_rust::{
    generate_html_report, FigureSpec, PlaceholderPayload, Plottable, Section, TableSpec,
    UserOptions,
};

/// 1x1 透明 PNG
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

struct RecordingPlot {
    saved_to: Mutex<Option<PathBuf>>,
}

impl RecordingPlot {
    fn new() -> Self {
        Self {
            saved_to: Mutex::new(None),
        }
    }
}

impl Plottable for RecordingPlot {
    fn save_png(&self, path: &Path) -> io::Result<()> {
        fs::write(path, TINY_PNG)?;
        *self.saved_to.lock().unwrap() = Some(path.to_path_buf());
        Ok(())
    }
}

fn export(sections: &[Section], options: &UserOptions) -> String {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.html");
    generate_html_report(&output, "测试报告", sections, options).unwrap();
    fs::read_to_string(&output).unwrap()
}

#[test]
fn heading_and_paragraph_appear_in_order_after_cover() {
    let sections = vec![Section::new().title("第一章").paragraph("第一段。")];
    let html = export(&sections, &UserOptions::default());

    let h1 = html.find("<h1>测试报告</h1>").unwrap();
    let h2 = html.find("<h2>第一章</h2>").unwrap();
    let p = html.find("<p>第一段。</p>").unwrap();
    assert!(h1 < h2 && h2 < p);
}

#[test]
fn text_placeholder_is_substituted() {
    let mut options = UserOptions::default();
    options.placeholders.insert(
        "Note".to_string(),
        PlaceholderPayload::Text("hello".to_string()),
    );
    let sections = vec![Section::new().paragraph("备注：{{Note}}")];
    let html = export(&sections, &options);

    assert!(html.contains("备注：hello"));
    assert!(!html.contains("{{Note}}"));
}

#[test]
fn table_renders_with_bold_header_markup() {
    let sections = vec![Section::new().table(
        TableSpec::new(vec![
            vec!["甲".to_string(), "1".to_string()],
            vec!["乙".to_string(), "2".to_string()],
        ])
        .header(vec!["名称".to_string(), "数量".to_string()]),
    )];
    let html = export(&sections, &UserOptions::default());

    assert!(html.contains("<th>名称</th><th>数量</th>"));
    assert!(html.contains("<td>甲</td><td>1</td>"));
    assert!(html.contains("<td>乙</td><td>2</td>"));
}

#[test]
fn figures_with_the_same_row_share_a_row() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    fs::write(&a, TINY_PNG).unwrap();
    fs::write(&b, TINY_PNG).unwrap();

    let sections = vec![Section::new()
        .figure(FigureSpec::from_path(&a).row_index(1).caption("左图"))
        .figure(FigureSpec::from_path(&b).row_index(1).caption("右图"))];
    let html = export(&sections, &UserOptions::default());

    assert_eq!(html.matches("<div class=\"figure-row\">").count(), 1);
    assert_eq!(html.matches("<figure>").count(), 2);
    assert!(html.contains("<figcaption>左图</figcaption>"));
    assert!(html.contains("<figcaption>右图</figcaption>"));
}

#[test]
fn embedded_figures_become_data_uris() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("chart.png");
    fs::write(&image, TINY_PNG).unwrap();

    let options = UserOptions {
        embed_images: Some(true),
        ..UserOptions::default()
    };
    let sections = vec![Section::new().figure(FigureSpec::from_path(&image))];
    let html = export(&sections, &options);

    assert!(html.contains("data:image/png;base64,"));
    assert!(!html.contains("chart.png"));
}

#[test]
fn per_figure_embed_overrides_the_global_switch() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("chart.png");
    fs::write(&image, TINY_PNG).unwrap();

    let sections = vec![Section::new().figure(FigureSpec::from_path(&image).embed(true))];
    let html = export(&sections, &UserOptions::default());

    assert!(html.contains("data:image/png;base64,"));
}

#[test]
fn non_embedded_figures_reference_the_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("chart.png");
    fs::write(&image, TINY_PNG).unwrap();

    let sections = vec![Section::new().figure(FigureSpec::from_path(&image))];
    let html = export(&sections, &UserOptions::default());

    assert!(html.contains("chart.png"));
    assert!(!html.contains("data:image"));
}

#[test]
fn plot_figures_are_embedded_and_temps_cleaned_up() {
    let plot = Arc::new(RecordingPlot::new());
    let options = UserOptions {
        embed_images: Some(true),
        ..UserOptions::default()
    };
    let sections = vec![Section::new().figure(FigureSpec::from_plot(plot.clone()))];
    let html = export(&sections, &options);

    assert!(html.contains("data:image/png;base64,"));
    let saved_to = plot.saved_to.lock().unwrap().clone();
    let temp_path = saved_to.expect("绘图句柄应被调用落盘");
    assert!(!temp_path.exists(), "临时 PNG 应在导出完成前删除");
}

#[test]
fn unknown_placeholder_is_left_in_the_output() {
    let sections = vec![Section::new().paragraph("{{Missing}}")];
    let html = export(&sections, &UserOptions::default());
    assert!(html.contains("{{Missing}}"));
}
