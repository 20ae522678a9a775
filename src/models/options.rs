use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::section::PlaceholderPayload;

/// 页面边距（磅）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            top: 72.0,
            bottom: 72.0,
            left: 72.0,
            right: 72.0,
        }
    }
}

/// 字体配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// 字体名称
    pub name: String,
    /// 字号（磅）
    pub size: f32,
}

impl FontSpec {
    /// 创建新的字体配置
    pub fn new(name: &str, size: f32) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

/// 部分页面边距，未给出的字段逐项取默认值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMargins {
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
}

/// 部分字体配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFont {
    pub name: Option<String>,
    pub size: Option<f32>,
}

/// 调用方提供的报告配置，所有字段均可缺省
#[derive(Debug, Clone, Default)]
pub struct UserOptions {
    /// 模板文档路径（仅 Word 后端）
    pub template: Option<PathBuf>,
    /// 作者
    pub author: Option<String>,
    /// 单位
    pub company: Option<String>,
    /// 页脚文本
    pub footer_text: Option<String>,
    /// 是否添加页码
    pub add_page_nums: Option<bool>,
    /// 页面边距
    pub margins: Option<UserMargins>,
    /// 标题字体
    pub heading_font: Option<UserFont>,
    /// 正文字体
    pub body_font: Option<UserFont>,
    /// 行距倍数
    pub line_spacing: Option<f32>,
    /// 段前间距（磅）
    pub space_before: Option<f32>,
    /// 段后间距（磅）
    pub space_after: Option<f32>,
    /// 表格样式名称
    pub table_style: Option<String>,
    /// 是否内嵌图片（仅 HTML 后端）
    pub embed_images: Option<bool>,
    /// 占位符映射
    pub placeholders: HashMap<String, PlaceholderPayload>,
}

/// 解析完成的报告配置
///
/// 不变量：解析之后所有字段都有值，渲染器不再处理缺省
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub template: Option<PathBuf>,
    pub author: String,
    pub company: String,
    pub footer_text: String,
    pub add_page_nums: bool,
    pub margins: Margins,
    pub heading_font: FontSpec,
    pub body_font: FontSpec,
    pub line_spacing: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub table_style: String,
    pub embed_images: bool,
    pub placeholders: HashMap<String, PlaceholderPayload>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            template: None,
            author: String::new(),
            company: String::new(),
            footer_text: String::new(),
            add_page_nums: true,
            margins: Margins::default(),
            heading_font: FontSpec::new("Arial", 16.0),
            body_font: FontSpec::new("Arial", 11.0),
            line_spacing: 1.15,
            space_before: 6.0,
            space_after: 6.0,
            table_style: "Table Grid".to_string(),
            embed_images: false,
            placeholders: HashMap::new(),
        }
    }
}

impl ReportOptions {
    /// 将调用方的部分配置合并到默认配置之上
    ///
    /// 纯合并，没有错误路径；显式给出的 false/0/空串会被保留
    pub fn resolve(user: &UserOptions) -> ReportOptions {
        let defaults = ReportOptions::default();

        let margins = match &user.margins {
            Some(m) => Margins {
                top: m.top.unwrap_or(defaults.margins.top),
                bottom: m.bottom.unwrap_or(defaults.margins.bottom),
                left: m.left.unwrap_or(defaults.margins.left),
                right: m.right.unwrap_or(defaults.margins.right),
            },
            None => defaults.margins.clone(),
        };

        let heading_font = resolve_font(user.heading_font.as_ref(), &defaults.heading_font);
        let body_font = resolve_font(user.body_font.as_ref(), &defaults.body_font);

        ReportOptions {
            template: user.template.clone(),
            author: user.author.clone().unwrap_or(defaults.author),
            company: user.company.clone().unwrap_or(defaults.company),
            footer_text: user.footer_text.clone().unwrap_or(defaults.footer_text),
            add_page_nums: user.add_page_nums.unwrap_or(defaults.add_page_nums),
            margins,
            heading_font,
            body_font,
            line_spacing: user.line_spacing.unwrap_or(defaults.line_spacing),
            space_before: user.space_before.unwrap_or(defaults.space_before),
            space_after: user.space_after.unwrap_or(defaults.space_after),
            table_style: user.table_style.clone().unwrap_or(defaults.table_style),
            embed_images: user.embed_images.unwrap_or(defaults.embed_images),
            placeholders: user.placeholders.clone(),
        }
    }

    /// 转回部分配置，用于在已解析配置上继续调整
    pub fn to_user(&self) -> UserOptions {
        UserOptions {
            template: self.template.clone(),
            author: Some(self.author.clone()),
            company: Some(self.company.clone()),
            footer_text: Some(self.footer_text.clone()),
            add_page_nums: Some(self.add_page_nums),
            margins: Some(UserMargins {
                top: Some(self.margins.top),
                bottom: Some(self.margins.bottom),
                left: Some(self.margins.left),
                right: Some(self.margins.right),
            }),
            heading_font: Some(UserFont {
                name: Some(self.heading_font.name.clone()),
                size: Some(self.heading_font.size),
            }),
            body_font: Some(UserFont {
                name: Some(self.body_font.name.clone()),
                size: Some(self.body_font.size),
            }),
            line_spacing: Some(self.line_spacing),
            space_before: Some(self.space_before),
            space_after: Some(self.space_after),
            table_style: Some(self.table_style.clone()),
            embed_images: Some(self.embed_images),
            placeholders: self.placeholders.clone(),
        }
    }
}

fn resolve_font(user: Option<&UserFont>, default: &FontSpec) -> FontSpec {
    match user {
        Some(f) => FontSpec {
            name: f.name.clone().unwrap_or_else(|| default.name.clone()),
            size: f.size.unwrap_or(default.size),
        },
        None => default.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_user_options_take_all_defaults() {
        let resolved = ReportOptions::resolve(&UserOptions::default());
        assert_eq!(resolved.heading_font, FontSpec::new("Arial", 16.0));
        assert_eq!(resolved.body_font, FontSpec::new("Arial", 11.0));
        assert_eq!(resolved.line_spacing, 1.15);
        assert_eq!(resolved.space_before, 6.0);
        assert_eq!(resolved.space_after, 6.0);
        assert_eq!(resolved.margins, Margins::default());
        assert_eq!(resolved.table_style, "Table Grid");
        assert!(resolved.add_page_nums);
        assert!(!resolved.embed_images);
    }

    #[test]
    fn explicit_falsy_values_are_preserved() {
        let user = UserOptions {
            add_page_nums: Some(false),
            space_before: Some(0.0),
            footer_text: Some(String::new()),
            ..UserOptions::default()
        };
        let resolved = ReportOptions::resolve(&user);
        assert!(!resolved.add_page_nums);
        assert_eq!(resolved.space_before, 0.0);
        assert_eq!(resolved.footer_text, "");
    }

    #[test]
    fn partial_margins_resolve_field_by_field() {
        let user = UserOptions {
            margins: Some(UserMargins {
                left: Some(36.0),
                ..UserMargins::default()
            }),
            ..UserOptions::default()
        };
        let resolved = ReportOptions::resolve(&user);
        assert_eq!(resolved.margins.left, 36.0);
        assert_eq!(resolved.margins.top, 72.0);
        assert_eq!(resolved.margins.bottom, 72.0);
        assert_eq!(resolved.margins.right, 72.0);
    }

    #[test]
    fn resolve_is_idempotent() {
        let user = UserOptions {
            author: Some("张三".to_string()),
            line_spacing: Some(1.5),
            heading_font: Some(UserFont {
                name: Some("黑体".to_string()),
                size: None,
            }),
            ..UserOptions::default()
        };
        let once = ReportOptions::resolve(&user);
        let twice = ReportOptions::resolve(&once.to_user());
        assert_eq!(once.author, twice.author);
        assert_eq!(once.line_spacing, twice.line_spacing);
        assert_eq!(once.heading_font, twice.heading_font);
        assert_eq!(once.margins, twice.margins);
        assert_eq!(once.table_style, twice.table_style);
    }
}
