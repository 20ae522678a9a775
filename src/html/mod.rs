pub mod html_maker;
pub mod placeholder;

pub use html_maker::{generate_html_report, HtmlMaker};
