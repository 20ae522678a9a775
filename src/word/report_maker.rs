//! Word 报告生成器
//!
//! 把共享的章节遍历结果写入 [`WordDocument`] 中间表示，
//! 占位符替换完成后一次性保存为 .docx。

use std::fs;
use std::path::Path;

use crate::error::ReportResult;
use crate::layout::{FigureRow, GridDescription};
use crate::models::{ReportOptions, Section, UserOptions};
use crate::render::{render_report, DocumentSink};

use super::adapter::{
    Alignment, BodyChild, Paragraph, ParagraphSpacing, RunProps, WordCell, WordDocument, WordRow,
    WordTable,
};
use super::placeholder::replace_placeholders;

/// Word 后端的文档接收器
pub struct WordMaker<'a> {
    doc: &'a mut WordDocument,
    options: &'a ReportOptions,
}

impl<'a> WordMaker<'a> {
    /// 创建新的 Word 接收器
    pub fn new(doc: &'a mut WordDocument, options: &'a ReportOptions) -> Self {
        Self { doc, options }
    }

    fn heading_props(&self) -> RunProps {
        RunProps::new()
            .font(&self.options.heading_font.name)
            .size(self.options.heading_font.size)
            .bold()
    }

    fn body_props(&self) -> RunProps {
        RunProps::new()
            .font(&self.options.body_font.name)
            .size(self.options.body_font.size)
    }

    fn body_spacing(&self) -> ParagraphSpacing {
        ParagraphSpacing::new()
            .before(self.options.space_before)
            .after(self.options.space_after)
            .line(self.options.line_spacing)
    }
}

impl<'a> DocumentSink for WordMaker<'a> {
    fn begin_cover(&mut self) -> ReportResult<()> {
        Ok(())
    }

    fn cover_title(&mut self, title: &str) -> ReportResult<()> {
        self.doc.body.push(BodyChild::Paragraph(
            Paragraph::text(title, self.heading_props())
                .align(Alignment::Center)
                .spacing(self.body_spacing()),
        ));
        Ok(())
    }

    fn cover_author(&mut self, author: &str) -> ReportResult<()> {
        self.doc.body.push(BodyChild::Paragraph(
            Paragraph::text(&format!("Author: {}", author), self.body_props())
                .align(Alignment::Center),
        ));
        Ok(())
    }

    fn cover_company(&mut self, company: &str) -> ReportResult<()> {
        self.doc.body.push(BodyChild::Paragraph(
            Paragraph::text(&format!("Company: {}", company), self.body_props())
                .align(Alignment::Center),
        ));
        Ok(())
    }

    fn end_cover(&mut self) -> ReportResult<()> {
        self.doc.body.push(BodyChild::PageBreak);
        Ok(())
    }

    fn begin_section(&mut self) -> ReportResult<()> {
        Ok(())
    }

    fn add_heading(&mut self, text: &str) -> ReportResult<()> {
        self.doc.body.push(BodyChild::Paragraph(
            Paragraph::text(text, self.heading_props()).spacing(
                ParagraphSpacing::new()
                    .before(self.options.space_before)
                    .after(self.options.space_after),
            ),
        ));
        Ok(())
    }

    fn add_paragraph(&mut self, text: &str) -> ReportResult<()> {
        self.doc.body.push(BodyChild::Paragraph(
            Paragraph::text(text, self.body_props()).spacing(self.body_spacing()),
        ));
        Ok(())
    }

    fn add_bullet_list(&mut self, items: &[String]) -> ReportResult<()> {
        for item in items {
            self.doc.body.push(BodyChild::Paragraph(
                Paragraph::text(&format!("• {}", item), self.body_props())
                    .spacing(ParagraphSpacing::new().line(self.options.line_spacing)),
            ));
        }
        if !items.is_empty() {
            self.doc.body.push(BodyChild::Paragraph(Paragraph::new()));
        }
        Ok(())
    }

    fn add_table(&mut self, grid: &GridDescription) -> ReportResult<()> {
        self.doc
            .body
            .push(BodyChild::Table(grid_to_table(grid, self.options)));
        // 表格紧贴后续文本会被挤在一起，补一个空段落
        self.doc.body.push(BodyChild::Paragraph(Paragraph::new()));
        Ok(())
    }

    fn add_figure_rows(&mut self, rows: &[FigureRow]) -> ReportResult<()> {
        let blocks = figure_rows_to_body(rows, self.options)?;
        self.doc.body.extend(blocks);
        Ok(())
    }

    fn end_section(&mut self) -> ReportResult<()> {
        // 章节之间用空段落分隔
        self.doc.body.push(BodyChild::Paragraph(Paragraph::new()));
        Ok(())
    }
}

/// 把网格描述转换为 Word 表格
///
/// "Normal Table" 样式渲染为无边框，其余样式一律带边框网格
pub(crate) fn grid_to_table(grid: &GridDescription, options: &ReportOptions) -> WordTable {
    let body_props = RunProps::new()
        .font(&options.body_font.name)
        .size(options.body_font.size);
    let header_props = body_props.clone().bold();

    let mut rows = Vec::with_capacity(grid.row_count);

    if let Some(header) = &grid.header {
        rows.push(WordRow::new(
            header
                .iter()
                .map(|cell| {
                    WordCell::new().add_paragraph(Paragraph::text(cell, header_props.clone()))
                })
                .collect(),
        ));
    }

    for row in &grid.rows {
        rows.push(WordRow::new(
            row.iter()
                .map(|cell| WordCell::new().add_paragraph(Paragraph::text(cell, body_props.clone())))
                .collect(),
        ));
    }

    let bordered = !grid.style.eq_ignore_ascii_case("Normal Table");
    WordTable::new(rows, bordered)
}

/// 把图片行转换为正文块
///
/// 每行一个无边框单行表格，图片并排各占一格；
/// 图注作为居中文本紧跟在图片下方。图片字节在此读入内存。
pub(crate) fn figure_rows_to_body(
    rows: &[FigureRow],
    options: &ReportOptions,
) -> ReportResult<Vec<BodyChild>> {
    let caption_props = RunProps::new()
        .font(&options.body_font.name)
        .size(options.body_font.size);

    let mut blocks = Vec::with_capacity(rows.len());
    for row in rows {
        let mut cells = Vec::with_capacity(row.figures.len());
        for figure in &row.figures {
            let data = fs::read(&figure.path)?;
            let mut cell =
                WordCell::new().add_paragraph(Paragraph::image(data).align(Alignment::Center));
            if let Some(caption) = &figure.caption {
                cell = cell.add_paragraph(
                    Paragraph::text(caption, caption_props.clone()).align(Alignment::Center),
                );
            }
            cells.push(cell);
        }
        blocks.push(BodyChild::Table(WordTable::new(
            vec![WordRow::new(cells)],
            false,
        )));
    }
    Ok(blocks)
}

/// 生成 Word 报告并保存到指定路径
pub fn generate_word_report(
    output_path: &Path,
    title: &str,
    sections: &[Section],
    user: &UserOptions,
) -> ReportResult<()> {
    let options = ReportOptions::resolve(user);

    let mut doc = match &options.template {
        Some(template) => WordDocument::from_template(template)?,
        None => WordDocument::new(),
    };

    let margins = &options.margins;
    doc.set_page_margins(margins.top, margins.right, margins.bottom, margins.left);
    doc.add_property("title", title);
    if !options.author.is_empty() {
        doc.add_property("creator", &options.author);
    }

    {
        let mut maker = WordMaker::new(&mut doc, &options);
        render_report(&mut maker, title, sections, &options)?;
    }

    replace_placeholders(&mut doc.body, &options.placeholders, &options)?;

    if options.add_page_nums || !options.footer_text.is_empty() {
        doc.set_footer(
            &options.footer_text,
            options.add_page_nums,
            RunProps::new()
                .font(&options.body_font.name)
                .size(options.body_font.size),
        );
    }

    doc.save(output_path)?;
    log::info!("【Word导出】报告已保存: {}", output_path.display());
    Ok(())
}
