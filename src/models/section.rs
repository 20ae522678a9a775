use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 报告中的一个章节
///
/// 块的渲染顺序固定：标题、段落、项目符号、表格、图片
#[derive(Debug, Clone, Default)]
pub struct Section {
    /// 章节标题
    pub title: Option<String>,
    /// 段落文本
    pub paragraphs: Vec<String>,
    /// 项目符号条目
    pub bullets: Vec<String>,
    /// 表格
    pub tables: Vec<TableSpec>,
    /// 图片
    pub figures: Vec<FigureSpec>,
}

impl Section {
    /// 创建空章节
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置标题
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// 追加一个段落
    pub fn paragraph(mut self, text: &str) -> Self {
        self.paragraphs.push(text.to_string());
        self
    }

    /// 追加一个项目符号条目
    pub fn bullet(mut self, text: &str) -> Self {
        self.bullets.push(text.to_string());
        self
    }

    /// 追加一个表格
    pub fn table(mut self, table: TableSpec) -> Self {
        self.tables.push(table);
        self
    }

    /// 追加一个图片
    pub fn figure(mut self, figure: FigureSpec) -> Self {
        self.figures.push(figure);
        self
    }
}

/// 表格定义
///
/// 行矩阵为空时整个表格被跳过；列数取第一行的长度，不校验行长一致
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSpec {
    /// 表头单元格
    pub header: Option<Vec<String>>,
    /// 数据行
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    /// 创建新的表格定义
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { header: None, rows }
    }

    /// 设置表头
    pub fn header(mut self, header: Vec<String>) -> Self {
        self.header = Some(header);
        self
    }
}

/// 可绘制对象
///
/// 非文件来源的图片通过该能力落盘为 PNG
pub trait Plottable {
    /// 将图形保存为 PNG 文件
    fn save_png(&self, path: &Path) -> io::Result<()>;
}

/// 图片来源
///
/// 显式的标签联合，构造时即确定来源，渲染时不再做能力探测
#[derive(Clone)]
pub enum FigureSource {
    /// 磁盘上的图片文件
    FilePath(PathBuf),
    /// 可绘制对象句柄
    Plot(Arc<dyn Plottable>),
}

impl fmt::Debug for FigureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FigureSource::FilePath(path) => f.debug_tuple("FilePath").field(path).finish(),
            FigureSource::Plot(_) => f.write_str("Plot(<handle>)"),
        }
    }
}

/// 图片定义
#[derive(Debug, Clone)]
pub struct FigureSpec {
    /// 图片来源
    pub source: FigureSource,
    /// 图注
    pub caption: Option<String>,
    /// 行号，相同行号的图片并排显示
    pub row_index: Option<u32>,
    /// 是否内嵌为 data URI（仅 HTML 后端，覆盖全局配置）
    pub embed: Option<bool>,
}

impl FigureSpec {
    /// 基于文件路径创建图片定义
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: FigureSource::FilePath(path.into()),
            caption: None,
            row_index: None,
            embed: None,
        }
    }

    /// 基于可绘制对象创建图片定义
    pub fn from_plot(handle: Arc<dyn Plottable>) -> Self {
        Self {
            source: FigureSource::Plot(handle),
            caption: None,
            row_index: None,
            embed: None,
        }
    }

    /// 设置图注
    pub fn caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self
    }

    /// 设置行号
    pub fn row_index(mut self, row_index: u32) -> Self {
        self.row_index = Some(row_index);
        self
    }

    /// 设置内嵌开关
    pub fn embed(mut self, embed: bool) -> Self {
        self.embed = Some(embed);
        self
    }
}

/// 占位符载荷
///
/// 表格载荷没有数据行、图片载荷为空列表时，替换退化为空内容
#[derive(Debug, Clone)]
pub enum PlaceholderPayload {
    /// 纯文本
    Text(String),
    /// 表格
    Table(TableSpec),
    /// 一组图片
    Figures(Vec<FigureSpec>),
}
