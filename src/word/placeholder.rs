//! Word 正文的占位符替换
//!
//! 在中间表示的块列表上做游标式检索：游标记录（块、运行、字节偏移），
//! 每次替换后推进到被替换范围之后，同名占位符再继续向后找。
//! 替换产生的文本不会被重新扫描，载荷里含有占位符自身也不会死循环。

use std::collections::HashMap;

use crate::error::ReportResult;
use crate::layout::{group_figure_rows, layout_table, resolve_figures};
use crate::models::{PlaceholderPayload, ReportOptions};
use crate::utils::placeholder_token;

use super::adapter::{BodyChild, Run, TextRun};
use super::report_maker::{figure_rows_to_body, grid_to_table};

/// 扫描位置：块下标、运行下标、运行文本内的字节偏移
#[derive(Debug, Clone, Copy)]
struct Cursor {
    block: usize,
    run: usize,
    offset: usize,
}

impl Cursor {
    fn start() -> Self {
        Cursor {
            block: 0,
            run: 0,
            offset: 0,
        }
    }
}

/// 对正文执行全部占位符替换
///
/// 映射的遍历顺序不作保证，调用方不应依赖多个占位符之间的处理次序
pub fn replace_placeholders(
    body: &mut Vec<BodyChild>,
    placeholders: &HashMap<String, PlaceholderPayload>,
    options: &ReportOptions,
) -> ReportResult<()> {
    for (name, payload) in placeholders {
        replace_one(body, name, payload, options)?;
    }
    Ok(())
}

/// 替换单个占位符的所有出现
fn replace_one(
    body: &mut Vec<BodyChild>,
    name: &str,
    payload: &PlaceholderPayload,
    options: &ReportOptions,
) -> ReportResult<()> {
    let token = placeholder_token(name);
    let mut cursor = Cursor::start();

    while let Some(found) = find_forward(body, &token, cursor) {
        cursor = match payload {
            PlaceholderPayload::Text(text) => replace_text(body, found, token.len(), text),
            PlaceholderPayload::Table(spec) => match layout_table(spec, options) {
                Some(grid) => {
                    let table = BodyChild::Table(grid_to_table(&grid, options));
                    splice_blocks(body, found, token.len(), vec![table])
                }
                // 无数据行的表格载荷退化为删除占位符
                None => replace_text(body, found, token.len(), ""),
            },
            PlaceholderPayload::Figures(specs) => {
                if specs.is_empty() {
                    replace_text(body, found, token.len(), "")
                } else {
                    let (resolved, _temps) = resolve_figures(specs)?;
                    let rows = group_figure_rows(&resolved);
                    // 图片字节在此读入内存，临时文件随守卫析构删除
                    let blocks = figure_rows_to_body(&rows, options)?;
                    splice_blocks(body, found, token.len(), blocks)
                }
            }
        };
    }

    Ok(())
}

/// 从游标位置起向后查找占位符
///
/// 只扫描顶层段落的文本运行，表格单元格内的文本不参与替换
fn find_forward(body: &[BodyChild], token: &str, from: Cursor) -> Option<Cursor> {
    for block_idx in from.block..body.len() {
        let paragraph = match &body[block_idx] {
            BodyChild::Paragraph(p) => p,
            _ => continue,
        };
        let start_run = if block_idx == from.block { from.run } else { 0 };

        for run_idx in start_run..paragraph.runs.len() {
            let text_run = match &paragraph.runs[run_idx] {
                Run::Text(t) => t,
                Run::Image(_) => continue,
            };
            let offset = if block_idx == from.block && run_idx == from.run {
                from.offset
            } else {
                0
            };
            if offset > text_run.text.len() {
                continue;
            }
            if let Some(pos) = text_run.text[offset..].find(token) {
                return Some(Cursor {
                    block: block_idx,
                    run: run_idx,
                    offset: offset + pos,
                });
            }
        }
    }
    None
}

/// 文本替换：原地改写运行文本，游标推进到替换文本之后
fn replace_text(body: &mut [BodyChild], at: Cursor, token_len: usize, replacement: &str) -> Cursor {
    if let BodyChild::Paragraph(paragraph) = &mut body[at.block] {
        if let Run::Text(text_run) = &mut paragraph.runs[at.run] {
            text_run
                .text
                .replace_range(at.offset..at.offset + token_len, replacement);
        }
    }
    Cursor {
        block: at.block,
        run: at.run,
        offset: at.offset + replacement.len(),
    }
}

/// 块级替换：把占位符所在段落拆成前后两半，中间插入替换块
///
/// 前后半段没有可见内容时不保留；游标落在插入块之后
fn splice_blocks(
    body: &mut Vec<BodyChild>,
    at: Cursor,
    token_len: usize,
    inserted: Vec<BodyChild>,
) -> Cursor {
    let paragraph = match &body[at.block] {
        BodyChild::Paragraph(p) => p.clone(),
        // find_forward 只会返回段落位置，保险起见原样跳过
        _ => {
            return Cursor {
                block: at.block + 1,
                run: 0,
                offset: 0,
            }
        }
    };

    let mut pre = paragraph.clone_shell();
    pre.runs.extend_from_slice(&paragraph.runs[..at.run]);
    let mut post = paragraph.clone_shell();

    if let Run::Text(text_run) = &paragraph.runs[at.run] {
        if at.offset > 0 {
            pre.runs.push(Run::Text(TextRun::new(
                &text_run.text[..at.offset],
                text_run.props.clone(),
            )));
        }
        let rest = &text_run.text[at.offset + token_len..];
        if !rest.is_empty() {
            post.runs
                .push(Run::Text(TextRun::new(rest, text_run.props.clone())));
        }
    }
    post.runs.extend_from_slice(&paragraph.runs[at.run + 1..]);

    let mut replacement: Vec<BodyChild> = Vec::new();
    if pre.has_content() {
        replacement.push(BodyChild::Paragraph(pre));
    }
    let resume = at.block + replacement.len() + inserted.len();
    replacement.extend(inserted);
    if post.has_content() {
        replacement.push(BodyChild::Paragraph(post));
    }

    body.splice(at.block..at.block + 1, replacement);

    Cursor {
        block: resume,
        run: 0,
        offset: 0,
    }
}
