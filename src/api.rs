//! 对外导出接口
//!
//! 面向嵌入方的薄封装：把内部的 Result 错误转成
//! 可序列化的 [`ExportResult`]，便于跨边界传递。

use std::path::Path;

use serde::Serialize;

use crate::html::generate_html_report;
use crate::models::{Section, UserOptions};
use crate::word::generate_word_report;

/// 导出结果
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub success: bool,
    pub message: String,
    pub file_path: Option<String>,
}

impl ExportResult {
    /// 序列化为 JSON 字符串
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// 导出 Word 报告
pub fn export_word_report(
    output_path: String,
    title: String,
    sections: Vec<Section>,
    options: Option<UserOptions>,
) -> ExportResult {
    let user = options.unwrap_or_default();

    match generate_word_report(Path::new(&output_path), &title, &sections, &user) {
        Ok(_) => ExportResult {
            success: true,
            message: "Word报告导出成功".to_string(),
            file_path: Some(output_path),
        },
        Err(e) => ExportResult {
            success: false,
            message: format!("导出失败: {}", e),
            file_path: None,
        },
    }
}

/// 导出 HTML 报告
pub fn export_html_report(
    output_path: String,
    title: String,
    sections: Vec<Section>,
    options: Option<UserOptions>,
) -> ExportResult {
    let user = options.unwrap_or_default();

    match generate_html_report(Path::new(&output_path), &title, &sections, &user) {
        Ok(_) => ExportResult {
            success: true,
            message: "HTML报告导出成功".to_string(),
            file_path: Some(output_path),
        },
        Err(e) => ExportResult {
            success: false,
            message: format!("导出失败: {}", e),
            file_path: None,
        },
    }
}
