//! HTML 报告生成器
//!
//! 输出单个自包含的 HTML 文件：样式内联在文档头部，
//! 图片按配置内嵌为 data URI 或引用磁盘路径。

use std::fs;
use std::path::Path;

use crate::error::ReportResult;
use crate::layout::{FigureRow, GridDescription, ResolvedFigure};
use crate::models::{ReportOptions, Section, UserOptions};
use crate::render::{render_report, DocumentSink};
use crate::utils::{escape_html, unresolved_tokens, whole_placeholder_token};

use super::placeholder::replace_in_html;

/// 表格与单元格的统一边框样式
pub(crate) const TABLE_BORDER_STYLE: &str = "1px solid #999";

/// HTML 后端的文档接收器
///
/// 各内容块被追加为 HTML 片段，`finish` 时拼装成完整文档
pub struct HtmlMaker<'a> {
    options: &'a ReportOptions,
    title: String,
    body: Vec<String>,
}

impl<'a> HtmlMaker<'a> {
    /// 创建新的 HTML 接收器
    pub fn new(options: &'a ReportOptions) -> Self {
        Self {
            options,
            title: String::new(),
            body: Vec::new(),
        }
    }

    /// 拼装完整的 HTML 文档
    pub fn finish(&self) -> String {
        let options = self.options;
        let style = format!(
            concat!(
                "body {{ font-family: \"{body_font}\", sans-serif; ",
                "font-size: {body_size}pt; line-height: {line}; ",
                "margin: {top}pt {right}pt {bottom}pt {left}pt; }}\n",
                "h1, h2 {{ font-family: \"{heading_font}\", sans-serif; }}\n",
                "h1 {{ font-size: {h1_size}pt; text-align: center; }}\n",
                "h2 {{ font-size: {heading_size}pt; }}\n",
                "p {{ margin: {before}pt 0 {after}pt 0; }}\n",
                "p.meta {{ text-align: center; }}\n",
                "section.cover {{ page-break-after: always; }}\n",
                "table {{ border-collapse: collapse; border: {border}; ",
                "margin: {before}pt 0 {after}pt 0; }}\n",
                "th, td {{ border: {border}; padding: 4pt 8pt; }}\n",
                "div.figure-row {{ display: flex; gap: 12pt; ",
                "margin: {before}pt 0 {after}pt 0; }}\n",
                "figure {{ margin: 0; text-align: center; }}\n",
                "figcaption {{ font-size: {body_size}pt; }}\n",
            ),
            body_font = options.body_font.name,
            body_size = options.body_font.size,
            line = options.line_spacing,
            top = options.margins.top,
            right = options.margins.right,
            bottom = options.margins.bottom,
            left = options.margins.left,
            heading_font = options.heading_font.name,
            h1_size = options.heading_font.size + 4.0,
            heading_size = options.heading_font.size,
            before = options.space_before,
            after = options.space_after,
            border = TABLE_BORDER_STYLE,
        );

        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html lang=\"zh-CN\">\n",
                "<head>\n",
                "<meta charset=\"utf-8\">\n",
                "<title>{title}</title>\n",
                "<style>\n{style}</style>\n",
                "</head>\n",
                "<body>\n{body}</body>\n",
                "</html>\n",
            ),
            title = escape_html(&self.title),
            style = style,
            body = self.body.concat(),
        )
    }
}

impl<'a> DocumentSink for HtmlMaker<'a> {
    fn begin_cover(&mut self) -> ReportResult<()> {
        self.body.push("<section class=\"cover\">\n".to_string());
        Ok(())
    }

    fn cover_title(&mut self, title: &str) -> ReportResult<()> {
        self.title = title.to_string();
        self.body.push(format!("<h1>{}</h1>\n", escape_html(title)));
        Ok(())
    }

    fn cover_author(&mut self, author: &str) -> ReportResult<()> {
        self.body.push(format!(
            "<p class=\"meta\">作者：{}</p>\n",
            escape_html(author)
        ));
        Ok(())
    }

    fn cover_company(&mut self, company: &str) -> ReportResult<()> {
        self.body.push(format!(
            "<p class=\"meta\">单位：{}</p>\n",
            escape_html(company)
        ));
        Ok(())
    }

    fn end_cover(&mut self) -> ReportResult<()> {
        self.body.push("</section>\n".to_string());
        Ok(())
    }

    fn begin_section(&mut self) -> ReportResult<()> {
        self.body.push("<div class=\"section\">\n".to_string());
        Ok(())
    }

    fn add_heading(&mut self, text: &str) -> ReportResult<()> {
        self.body.push(format!("<h2>{}</h2>\n", escape_html(text)));
        Ok(())
    }

    fn add_paragraph(&mut self, text: &str) -> ReportResult<()> {
        // 整段恰好是一个占位符时不加 <p> 包装，
        // 这样块级载荷（表格、图片）替换进来仍是合法结构
        if whole_placeholder_token(text).is_some() {
            self.body.push(format!("{}\n", text));
        } else {
            self.body.push(format!("<p>{}</p>\n", escape_html(text)));
        }
        Ok(())
    }

    fn add_bullet_list(&mut self, items: &[String]) -> ReportResult<()> {
        let mut list = String::from("<ul>\n");
        for item in items {
            if whole_placeholder_token(item).is_some() {
                list.push_str(&format!("<li>{}</li>\n", item));
            } else {
                list.push_str(&format!("<li>{}</li>\n", escape_html(item)));
            }
        }
        list.push_str("</ul>\n");
        self.body.push(list);
        Ok(())
    }

    fn add_table(&mut self, grid: &GridDescription) -> ReportResult<()> {
        self.body.push(render_table_html(grid));
        Ok(())
    }

    fn add_figure_rows(&mut self, rows: &[FigureRow]) -> ReportResult<()> {
        self.body.push(render_figure_rows_html(rows, self.options)?);
        Ok(())
    }

    fn end_section(&mut self) -> ReportResult<()> {
        self.body.push("</div>\n".to_string());
        Ok(())
    }
}

/// 渲染表格片段，表头加粗（th）
pub(crate) fn render_table_html(grid: &GridDescription) -> String {
    let mut html = String::from("<table>\n");

    if let Some(header) = &grid.header {
        html.push_str("<tr>");
        for cell in header {
            html.push_str(&format!("<th>{}</th>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }

    for row in &grid.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n");
    html
}

/// 渲染一批图片行
///
/// 每行一个 flex 容器，图片并排；图注用 figcaption
pub(crate) fn render_figure_rows_html(
    rows: &[FigureRow],
    options: &ReportOptions,
) -> ReportResult<String> {
    let mut html = String::new();
    for row in rows {
        html.push_str("<div class=\"figure-row\">\n");
        for figure in &row.figures {
            let src = figure_src(figure, options)?;
            html.push_str("<figure>");
            html.push_str(&format!("<img src=\"{}\" alt=\"\">", src));
            if let Some(caption) = &figure.caption {
                html.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
            }
            html.push_str("</figure>\n");
        }
        html.push_str("</div>\n");
    }
    Ok(html)
}

/// 计算图片的 src 属性
///
/// 单图的 embed 开关覆盖全局配置；内嵌时按扩展名判断 MIME，
/// 除 png 外一律按 jpeg 处理
fn figure_src(figure: &ResolvedFigure, options: &ReportOptions) -> ReportResult<String> {
    let embed = figure.embed.unwrap_or(options.embed_images);
    if embed {
        let bytes = fs::read(&figure.path)?;
        let mime = match figure.path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
            _ => "image/jpeg",
        };
        Ok(format!("data:{};base64,{}", mime, base64::encode(&bytes)))
    } else {
        Ok(escape_html(&figure.path.display().to_string()))
    }
}

/// 生成 HTML 报告并保存到指定路径
pub fn generate_html_report(
    output_path: &Path,
    title: &str,
    sections: &[Section],
    user: &UserOptions,
) -> ReportResult<()> {
    let options = ReportOptions::resolve(user);

    let mut maker = HtmlMaker::new(&options);
    render_report(&mut maker, title, sections, &options)?;
    let mut html = maker.finish();

    replace_in_html(&mut html, &options.placeholders, &options)?;

    for name in unresolved_tokens(&html) {
        log::warn!("【HTML导出】占位符未解析: {{{{{}}}}}", name);
    }

    fs::write(output_path, &html)?;
    log::info!("【HTML导出】报告已保存: {}", output_path.display());
    Ok(())
}
