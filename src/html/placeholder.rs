//! HTML 文档的占位符替换
//!
//! HTML 是纯文本，直接在完整文档字符串上做整体替换；
//! 每个占位符先渲染成 HTML 片段，再一次性替换所有出现。

use std::collections::HashMap;

use crate::error::ReportResult;
use crate::layout::{group_figure_rows, layout_table, resolve_figures};
use crate::models::{PlaceholderPayload, ReportOptions};
use crate::utils::{escape_html, placeholder_token};

use super::html_maker::{render_figure_rows_html, render_table_html};

/// 对完整 HTML 文档执行全部占位符替换
///
/// 映射的遍历顺序不作保证；载荷渲染出的片段不再被二次扫描
pub fn replace_in_html(
    html: &mut String,
    placeholders: &HashMap<String, PlaceholderPayload>,
    options: &ReportOptions,
) -> ReportResult<()> {
    for (name, payload) in placeholders {
        let token = placeholder_token(name);
        if !html.contains(&token) {
            continue;
        }
        let rendered = render_payload_html(payload, options)?;
        *html = html.replace(&token, &rendered);
    }
    Ok(())
}

/// 把占位符载荷渲染为 HTML 片段
///
/// 空表格与空图片列表退化为空串，占位符被整体抹去
fn render_payload_html(payload: &PlaceholderPayload, options: &ReportOptions) -> ReportResult<String> {
    match payload {
        PlaceholderPayload::Text(text) => Ok(escape_html(text)),
        PlaceholderPayload::Table(spec) => Ok(match layout_table(spec, options) {
            Some(grid) => render_table_html(&grid),
            None => String::new(),
        }),
        PlaceholderPayload::Figures(specs) => {
            if specs.is_empty() {
                return Ok(String::new());
            }
            let (resolved, _temps) = resolve_figures(specs)?;
            let rows = group_figure_rows(&resolved);
            // 内嵌图片的字节在渲染时读入，临时文件随守卫析构删除
            render_figure_rows_html(&rows, options)
        }
    }
}
