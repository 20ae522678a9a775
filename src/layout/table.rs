use serde::{Deserialize, Serialize};

use crate::models::{ReportOptions, TableSpec};

/// 两个后端共用的表格网格描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridDescription {
    /// 总行数（含表头）
    pub row_count: usize,
    /// 列数，取第一个数据行的长度
    pub col_count: usize,
    /// 表头单元格，渲染时加粗
    pub header: Option<Vec<String>>,
    /// 数据行
    pub rows: Vec<Vec<String>>,
    /// 表格样式名称
    pub style: String,
}

/// 将表格定义转换为网格描述
///
/// 数据行为空时返回 None，整个表格被跳过。
/// 表头长度与数据行列数是否一致不做校验。
pub fn layout_table(table: &TableSpec, options: &ReportOptions) -> Option<GridDescription> {
    if table.rows.is_empty() {
        return None;
    }

    let header = table.header.clone().filter(|h| !h.is_empty());
    let col_count = table.rows[0].len();
    let row_count = table.rows.len() + if header.is_some() { 1 } else { 0 };

    Some(GridDescription {
        row_count,
        col_count,
        header,
        rows: table.rows.clone(),
        style: options.table_style.clone(),
    })
}
