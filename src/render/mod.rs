//! 文档接收器抽象与共享的章节遍历逻辑
//!
//! 渲染与布局只依赖 [`DocumentSink`] 这个窄接口，不直接接触
//! 具体后端；Word 与 HTML 各提供一个实现。

use crate::error::ReportResult;
use crate::layout::{group_figure_rows, layout_table, resolve_figures, FigureRow, GridDescription};
use crate::models::{ReportOptions, Section};

/// 文档接收器
///
/// 实现方负责把各内容块写入自己的后端表示
pub trait DocumentSink {
    /// 封面块开始
    fn begin_cover(&mut self) -> ReportResult<()>;
    /// 封面主标题
    fn cover_title(&mut self, title: &str) -> ReportResult<()>;
    /// 封面作者行
    fn cover_author(&mut self, author: &str) -> ReportResult<()>;
    /// 封面单位行
    fn cover_company(&mut self, company: &str) -> ReportResult<()>;
    /// 封面块结束（后接分页）
    fn end_cover(&mut self) -> ReportResult<()>;

    /// 章节开始
    fn begin_section(&mut self) -> ReportResult<()>;
    /// 章节标题
    fn add_heading(&mut self, text: &str) -> ReportResult<()>;
    /// 正文段落
    fn add_paragraph(&mut self, text: &str) -> ReportResult<()>;
    /// 项目符号列表
    fn add_bullet_list(&mut self, items: &[String]) -> ReportResult<()>;
    /// 表格网格
    fn add_table(&mut self, grid: &GridDescription) -> ReportResult<()>;
    /// 一批图片行
    fn add_figure_rows(&mut self, rows: &[FigureRow]) -> ReportResult<()>;
    /// 章节结束（视觉分隔）
    fn end_section(&mut self) -> ReportResult<()>;
}

/// 遍历封面与章节列表，把内容写入接收器
///
/// 块顺序固定：标题、段落、项目符号、表格、图片。
/// 临时图片文件在接收器消费完本章节的图片后立即清理。
pub fn render_report<S: DocumentSink>(
    sink: &mut S,
    title: &str,
    sections: &[Section],
    options: &ReportOptions,
) -> ReportResult<()> {
    sink.begin_cover()?;
    sink.cover_title(title)?;
    if !options.author.is_empty() {
        sink.cover_author(&options.author)?;
    }
    if !options.company.is_empty() {
        sink.cover_company(&options.company)?;
    }
    sink.end_cover()?;

    for section in sections {
        sink.begin_section()?;

        if let Some(section_title) = &section.title {
            sink.add_heading(section_title)?;
        }

        for paragraph in &section.paragraphs {
            sink.add_paragraph(paragraph)?;
        }

        if !section.bullets.is_empty() {
            sink.add_bullet_list(&section.bullets)?;
        }

        for table in &section.tables {
            if let Some(grid) = layout_table(table, options) {
                sink.add_table(&grid)?;
            }
        }

        if !section.figures.is_empty() {
            let (resolved, _temps) = resolve_figures(&section.figures)?;
            let rows = group_figure_rows(&resolved);
            sink.add_figure_rows(&rows)?;
            // _temps 在此析构，临时 PNG 随之删除
        }

        sink.end_section()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Section, TableSpec, UserOptions};

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
    }

    impl DocumentSink for RecordingSink {
        fn begin_cover(&mut self) -> ReportResult<()> {
            self.events.push("begin_cover".into());
            Ok(())
        }
        fn cover_title(&mut self, title: &str) -> ReportResult<()> {
            self.events.push(format!("title:{}", title));
            Ok(())
        }
        fn cover_author(&mut self, author: &str) -> ReportResult<()> {
            self.events.push(format!("author:{}", author));
            Ok(())
        }
        fn cover_company(&mut self, company: &str) -> ReportResult<()> {
            self.events.push(format!("company:{}", company));
            Ok(())
        }
        fn end_cover(&mut self) -> ReportResult<()> {
            self.events.push("end_cover".into());
            Ok(())
        }
        fn begin_section(&mut self) -> ReportResult<()> {
            self.events.push("begin_section".into());
            Ok(())
        }
        fn add_heading(&mut self, text: &str) -> ReportResult<()> {
            self.events.push(format!("heading:{}", text));
            Ok(())
        }
        fn add_paragraph(&mut self, text: &str) -> ReportResult<()> {
            self.events.push(format!("para:{}", text));
            Ok(())
        }
        fn add_bullet_list(&mut self, items: &[String]) -> ReportResult<()> {
            self.events.push(format!("bullets:{}", items.len()));
            Ok(())
        }
        fn add_table(&mut self, grid: &GridDescription) -> ReportResult<()> {
            self.events
                .push(format!("table:{}x{}", grid.row_count, grid.col_count));
            Ok(())
        }
        fn add_figure_rows(&mut self, rows: &[FigureRow]) -> ReportResult<()> {
            self.events.push(format!("figures:{}", rows.len()));
            Ok(())
        }
        fn end_section(&mut self) -> ReportResult<()> {
            self.events.push("end_section".into());
            Ok(())
        }
    }

    #[test]
    fn blocks_are_rendered_in_fixed_order() {
        let options = crate::models::ReportOptions::resolve(&UserOptions {
            author: Some("李四".into()),
            ..UserOptions::default()
        });
        let sections = vec![Section::new()
            .title("A")
            .paragraph("p1")
            .bullet("b1")
            .table(TableSpec::new(vec![vec!["1".into(), "2".into()]]))];

        let mut sink = RecordingSink::default();
        render_report(&mut sink, "年度报告", &sections, &options).unwrap();

        assert_eq!(
            sink.events,
            vec![
                "begin_cover",
                "title:年度报告",
                "author:李四",
                "end_cover",
                "begin_section",
                "heading:A",
                "para:p1",
                "bullets:1",
                "table:1x2",
                "end_section",
            ]
        );
    }

    #[test]
    fn empty_section_renders_only_the_break() {
        let options = crate::models::ReportOptions::resolve(&UserOptions::default());
        let sections = vec![Section::new()];
        let mut sink = RecordingSink::default();
        render_report(&mut sink, "空", &sections, &options).unwrap();
        assert_eq!(
            sink.events,
            vec![
                "begin_cover",
                "title:空",
                "end_cover",
                "begin_section",
                "end_section"
            ]
        );
    }

    #[test]
    fn rowless_tables_are_skipped() {
        let options = crate::models::ReportOptions::resolve(&UserOptions::default());
        let sections =
            vec![Section::new().table(TableSpec::new(Vec::new()).header(vec!["a".into()]))];
        let mut sink = RecordingSink::default();
        render_report(&mut sink, "t", &sections, &options).unwrap();
        assert!(!sink.events.iter().any(|e| e.starts_with("table:")));
    }
}
