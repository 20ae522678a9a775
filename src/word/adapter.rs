//! docx-rs 适配层
//!
//! 提供一个可编辑的文档中间表示：正文是块（段落/表格/分页符）的列表，
//! 占位符替换引擎在保存前可以对它做游标式的检索与拼接，
//! 最终一次性转换为 docx-rs 文档并写盘。

use std::error::Error as StdError;
use std::fs::File;
use std::path::Path;

use crate::error::{ReportError, ReportResult};

/// 对齐方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    /// 左对齐
    Left,
    /// 居中对齐
    Center,
}

impl Alignment {
    /// 转换为 docx-rs 的 AlignmentType
    pub fn to_docx_alignment(&self) -> docx_rs::AlignmentType {
        match self {
            Alignment::Left => docx_rs::AlignmentType::Left,
            Alignment::Center => docx_rs::AlignmentType::Center,
        }
    }
}

/// 运行属性
#[derive(Debug, Clone, Default)]
pub struct RunProps {
    /// 字体名称
    pub font: Option<String>,
    /// 字号（磅）
    pub size: Option<f32>,
    /// 是否加粗
    pub bold: bool,
}

impl RunProps {
    /// 创建新的运行属性
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置字体
    pub fn font(mut self, font: &str) -> Self {
        self.font = Some(font.to_string());
        self
    }

    /// 设置字号（磅）
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// 设置粗体
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// 文本运行
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    pub props: RunProps,
}

impl TextRun {
    /// 创建新的文本运行
    pub fn new(text: &str, props: RunProps) -> Self {
        Self {
            text: text.to_string(),
            props,
        }
    }

    /// 转换为 docx-rs 的 Run
    pub fn to_docx_run(&self) -> docx_rs::Run {
        let mut run = docx_rs::Run::new().add_text(&self.text);

        if let Some(size) = self.props.size {
            // 适配：docx 的字号单位是半磅
            run = run.size((size * 2.0) as usize);
        }

        if let Some(font) = &self.props.font {
            let run_fonts = docx_rs::RunFonts::new()
                .east_asia(font)
                .ascii(font)
                .hi_ansi(font);
            run = run.fonts(run_fonts);
        }

        if self.props.bold {
            run = run.bold();
        }

        run
    }
}

/// 图片运行
///
/// 图片字节在插入时读入并持有，临时图片文件随后即可删除
#[derive(Debug, Clone)]
pub struct ImageRun {
    pub data: Vec<u8>,
}

impl ImageRun {
    /// 创建新的图片运行
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// 转换为 docx-rs 的 Run
    pub fn to_docx_run(&self) -> docx_rs::Run {
        docx_rs::Run::new().add_image(docx_rs::Pic::new(&self.data))
    }
}

/// 运行类型枚举
#[derive(Debug, Clone)]
pub enum Run {
    Text(TextRun),
    Image(ImageRun),
}

impl Run {
    /// 转换为 docx-rs 的 Run
    pub fn to_docx_run(&self) -> docx_rs::Run {
        match self {
            Run::Text(run) => run.to_docx_run(),
            Run::Image(run) => run.to_docx_run(),
        }
    }
}

/// 段落间距
#[derive(Debug, Clone, Default)]
pub struct ParagraphSpacing {
    /// 段前间距（磅）
    pub before: Option<f32>,
    /// 段后间距（磅）
    pub after: Option<f32>,
    /// 行距倍数
    pub line: Option<f32>,
}

impl ParagraphSpacing {
    /// 创建新的段落间距
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置段前间距（磅）
    pub fn before(mut self, before: f32) -> Self {
        self.before = Some(before);
        self
    }

    /// 设置段后间距（磅）
    pub fn after(mut self, after: f32) -> Self {
        self.after = Some(after);
        self
    }

    /// 设置行距倍数
    pub fn line(mut self, line: f32) -> Self {
        self.line = Some(line);
        self
    }

    /// 转换为 docx-rs 的 LineSpacing
    pub fn to_docx_line_spacing(&self) -> docx_rs::LineSpacing {
        let mut spacing = docx_rs::LineSpacing::new();

        if let Some(before) = self.before {
            spacing = spacing.before(convert_point_to_twip(before) as u32);
        }

        if let Some(after) = self.after {
            spacing = spacing.after(convert_point_to_twip(after) as u32);
        }

        if let Some(line) = self.line {
            // 240 twip 为单倍行距
            spacing = spacing
                .line((line * 240.0) as i32)
                .line_rule(docx_rs::LineSpacingType::Auto);
        }

        spacing
    }
}

/// 段落
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Option<Alignment>,
    pub spacing: Option<ParagraphSpacing>,
}

impl Paragraph {
    /// 创建空段落
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建单运行文本段落
    pub fn text(text: &str, props: RunProps) -> Self {
        Self {
            runs: vec![Run::Text(TextRun::new(text, props))],
            alignment: None,
            spacing: None,
        }
    }

    /// 创建图片段落
    pub fn image(data: Vec<u8>) -> Self {
        Self {
            runs: vec![Run::Image(ImageRun::new(data))],
            alignment: None,
            spacing: None,
        }
    }

    /// 设置对齐方式
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// 设置间距
    pub fn spacing(mut self, spacing: ParagraphSpacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// 复制一个不含运行的空壳，保留对齐与间距
    pub fn clone_shell(&self) -> Self {
        Self {
            runs: Vec::new(),
            alignment: self.alignment,
            spacing: self.spacing.clone(),
        }
    }

    /// 段落是否有可见内容
    pub fn has_content(&self) -> bool {
        self.runs.iter().any(|run| match run {
            Run::Text(text_run) => !text_run.text.is_empty(),
            Run::Image(_) => true,
        })
    }

    /// 转换为 docx-rs 的 Paragraph
    pub fn to_docx_paragraph(&self) -> docx_rs::Paragraph {
        let mut paragraph = docx_rs::Paragraph::new();

        for run in &self.runs {
            paragraph = paragraph.add_run(run.to_docx_run());
        }

        if let Some(alignment) = &self.alignment {
            paragraph = paragraph.align(alignment.to_docx_alignment());
        }

        if let Some(spacing) = &self.spacing {
            paragraph = paragraph.line_spacing(spacing.to_docx_line_spacing());
        }

        paragraph
    }
}

/// 表格单元格
#[derive(Debug, Clone, Default)]
pub struct WordCell {
    pub children: Vec<Paragraph>,
}

impl WordCell {
    /// 创建新的单元格
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加段落
    pub fn add_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.children.push(paragraph);
        self
    }

    /// 转换为 docx-rs 的 TableCell
    pub fn to_docx_table_cell(&self) -> docx_rs::TableCell {
        let mut cell = docx_rs::TableCell::new();
        for paragraph in &self.children {
            cell = cell.add_paragraph(paragraph.to_docx_paragraph());
        }
        cell
    }
}

/// 表格行
#[derive(Debug, Clone, Default)]
pub struct WordRow {
    pub cells: Vec<WordCell>,
}

impl WordRow {
    /// 创建新的表格行
    pub fn new(cells: Vec<WordCell>) -> Self {
        Self { cells }
    }

    /// 转换为 docx-rs 的 TableRow
    pub fn to_docx_table_row(&self) -> docx_rs::TableRow {
        docx_rs::TableRow::new(self.cells.iter().map(|c| c.to_docx_table_cell()).collect())
    }
}

/// 表格
#[derive(Debug, Clone)]
pub struct WordTable {
    pub rows: Vec<WordRow>,
    /// 内容表格带边框，图片行表格无边框
    pub bordered: bool,
}

impl WordTable {
    /// 创建新的表格
    pub fn new(rows: Vec<WordRow>, bordered: bool) -> Self {
        Self { rows, bordered }
    }

    /// 转换为 docx-rs 的 Table
    pub fn to_docx_table(&self) -> docx_rs::Table {
        let rows: Vec<docx_rs::TableRow> =
            self.rows.iter().map(|r| r.to_docx_table_row()).collect();
        if self.bordered {
            docx_rs::Table::new(rows)
        } else {
            docx_rs::Table::without_borders(rows)
        }
    }
}

/// 正文块
#[derive(Debug, Clone)]
pub enum BodyChild {
    Paragraph(Paragraph),
    Table(WordTable),
    PageBreak,
}

/// Word 文档的中间表示
pub struct WordDocument {
    /// 新建或从模板读入的底板文档
    seed: docx_rs::Docx,
    /// 正文块列表，占位符替换引擎直接在其上编辑
    pub body: Vec<BodyChild>,
    footer_text: String,
    add_page_nums: bool,
    footer_props: RunProps,
    /// 页面边距，twip
    page_margin: Option<(i32, i32, i32, i32)>,
    properties: Vec<(String, String)>,
}

impl WordDocument {
    /// 创建空白文档
    pub fn new() -> Self {
        Self {
            seed: docx_rs::Docx::new(),
            body: Vec::new(),
            footer_text: String::new(),
            add_page_nums: false,
            footer_props: RunProps::default(),
            page_margin: None,
            properties: Vec::new(),
        }
    }

    /// 从模板文档创建
    ///
    /// 模板路径不存在视为资源错误，立即中止渲染
    pub fn from_template(path: &Path) -> ReportResult<Self> {
        if !path.exists() {
            return Err(ReportError::Resource(format!(
                "模板文件不存在: {}",
                path.display()
            )));
        }
        let bytes = std::fs::read(path)?;
        let seed = docx_rs::read_docx(&bytes)
            .map_err(|e| ReportError::Resource(format!("模板读取失败: {:?}", e)))?;
        Ok(Self {
            seed,
            body: Vec::new(),
            footer_text: String::new(),
            add_page_nums: false,
            footer_props: RunProps::default(),
            page_margin: None,
            properties: Vec::new(),
        })
    }

    /// 设置页面边距（磅）
    pub fn set_page_margins(&mut self, top: f32, right: f32, bottom: f32, left: f32) {
        self.page_margin = Some((
            convert_point_to_twip(top),
            convert_point_to_twip(right),
            convert_point_to_twip(bottom),
            convert_point_to_twip(left),
        ));
    }

    /// 添加文档自定义属性
    pub fn add_property(&mut self, name: &str, value: &str) {
        self.properties.push((name.to_string(), value.to_string()));
    }

    /// 设置页脚文本与页码开关
    pub fn set_footer(&mut self, footer_text: &str, add_page_nums: bool, props: RunProps) {
        self.footer_text = footer_text.to_string();
        self.add_page_nums = add_page_nums;
        self.footer_props = props;
    }

    /// 组装最终的 docx-rs 文档
    fn to_docx(&self) -> docx_rs::Docx {
        let mut docx = self.seed.clone();

        if let Some((top, right, bottom, left)) = self.page_margin {
            docx = docx.page_margin(
                docx_rs::PageMargin::new()
                    .top(top)
                    .right(right)
                    .bottom(bottom)
                    .left(left),
            );
        }

        for (name, value) in &self.properties {
            docx = docx.custom_property(name, value);
        }

        if !self.footer_text.is_empty() || self.add_page_nums {
            let mut footer = docx_rs::Footer::new();
            if !self.footer_text.is_empty() {
                footer = footer.add_paragraph(
                    Paragraph::text(&self.footer_text, self.footer_props.clone())
                        .to_docx_paragraph(),
                );
            }
            if self.add_page_nums {
                footer = footer.add_paragraph(
                    docx_rs::Paragraph::new()
                        .align(docx_rs::AlignmentType::Center)
                        .add_run(page_number_run(&self.footer_props)),
                );
            }
            docx = docx.footer(footer);
        }

        for child in &self.body {
            match child {
                BodyChild::Paragraph(paragraph) => {
                    docx = docx.add_paragraph(paragraph.to_docx_paragraph());
                }
                BodyChild::Table(table) => {
                    docx = docx.add_table(table.to_docx_table());
                }
                BodyChild::PageBreak => {
                    docx = docx.add_paragraph(
                        docx_rs::Paragraph::new()
                            .add_run(docx_rs::Run::new().add_break(docx_rs::BreakType::Page)),
                    );
                }
            }
        }

        docx
    }

    /// 保存文档
    ///
    /// 整个渲染流程只在最后调用一次
    pub fn save(&self, filepath: &Path) -> ReportResult<()> {
        let file = File::create(filepath)?;
        match self.to_docx().build().pack(file) {
            Ok(_) => Ok(()),
            Err(e) => {
                if let Some(zip_err) = e
                    .source()
                    .and_then(|s| s.downcast_ref::<zip::result::ZipError>())
                {
                    Err(ReportError::InvalidConfig(format!(
                        "ZIP error: {:?}",
                        zip_err
                    )))
                } else {
                    Err(ReportError::Docx(docx_rs::DocxError::ZipError(e)))
                }
            }
        }
    }
}

impl Default for WordDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// 居中页码运行，PAGE 域
fn page_number_run(props: &RunProps) -> docx_rs::Run {
    let mut run = docx_rs::Run::new()
        .add_field_char(docx_rs::FieldCharType::Begin, false)
        .add_instr_text(docx_rs::InstrText::PAGE(docx_rs::InstrPAGE::new()))
        .add_field_char(docx_rs::FieldCharType::End, false);

    if let Some(size) = props.size {
        run = run.size((size * 2.0) as usize);
    }
    if let Some(font) = &props.font {
        let run_fonts = docx_rs::RunFonts::new()
            .east_asia(font)
            .ascii(font)
            .hi_ansi(font);
        run = run.fonts(run_fonts);
    }

    run
}

/// 将英寸转换为 twip
pub fn convert_inches_to_twip(inches: f32) -> i32 {
    (inches * 1440.0) as i32
}

/// 将磅转换为 twip
pub fn convert_point_to_twip(point: f32) -> i32 {
    convert_inches_to_twip(point / 72.0)
}
