pub mod api;
pub mod error;
pub mod html;
pub mod layout;
pub mod models;
pub mod render;
pub mod utils;
pub mod word;

pub use models::{
    FigureSource,
    FigureSpec,
    FontSpec,
    Margins,
    PlaceholderPayload,
    Plottable,
    ReportOptions,
    Section,
    TableSpec,
    UserFont,
    UserMargins,
    UserOptions,
};

pub use error::{ReportError, ReportResult};

pub use word::generate_word_report;

pub use html::generate_html_report;

pub use api::{export_html_report, export_word_report, ExportResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let sections = vec![Section::new().title("概述").paragraph("示例段落")];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        generate_html_report(&path, "示例报告", &sections, &UserOptions::default()).unwrap();
        assert!(path.exists());
    }
}
