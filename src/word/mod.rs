pub mod adapter;
pub mod placeholder;
pub mod report_maker;

pub use report_maker::{generate_word_report, WordMaker};
