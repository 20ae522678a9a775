//! 图片来源归一化与行分组
//!
//! 非文件来源的图片会被落盘为临时 PNG，临时文件由 [`TempImages`]
//! 守卫持有，在消费它的渲染步骤结束时（无论成败）统一删除。

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{ReportError, ReportResult};
use crate::models::{FigureSource, FigureSpec};

/// 归一化后的图片：保证指向一个可读的图片文件
#[derive(Debug, Clone)]
pub struct ResolvedFigure {
    /// 绝对路径
    pub path: PathBuf,
    /// 图注
    pub caption: Option<String>,
    /// 行号
    pub row_index: u32,
    /// 内嵌覆盖开关（仅 HTML 后端）
    pub embed: Option<bool>,
}

/// 一行并排显示的图片
#[derive(Debug, Clone)]
pub struct FigureRow {
    /// 行号
    pub index: u32,
    /// 本行图片，保持输入顺序
    pub figures: Vec<ResolvedFigure>,
}

/// 临时图片文件守卫
///
/// drop 时删除所有记录过的路径；文件已不存在不算错误，
/// 其他删除失败只告警不中断
#[derive(Debug, Default)]
pub struct TempImages {
    paths: Vec<PathBuf>,
}

impl TempImages {
    /// 记录一个待删除的临时文件
    pub fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// 当前记录的临时文件路径
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Drop for TempImages {
    fn drop(&mut self) {
        for path in &self.paths {
            match fs::remove_file(path) {
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => log::warn!("临时图片删除失败 {}: {}", path.display(), e),
            }
        }
    }
}

/// 将图片定义归一化为可读的图片文件
///
/// * 文件来源：文件必须存在，路径转为绝对路径
/// * 绘图句柄来源：生成唯一命名的临时 PNG 并调用句柄落盘
/// * 文件不存在时返回 `InvalidFigure`，整个渲染中止——静默丢图比显式失败更糟
pub fn resolve_figures(figures: &[FigureSpec]) -> ReportResult<(Vec<ResolvedFigure>, TempImages)> {
    let mut resolved = Vec::with_capacity(figures.len());
    let mut temps = TempImages::default();

    for figure in figures {
        let path = match &figure.source {
            FigureSource::FilePath(p) => {
                if !p.is_file() {
                    return Err(ReportError::InvalidFigure(format!(
                        "图片文件不存在: {}",
                        p.display()
                    )));
                }
                fs::canonicalize(p)?
            }
            FigureSource::Plot(handle) => {
                let path = temp_png_path()?;
                // 先登记后落盘，句柄写文件失败时守卫仍能清理
                temps.push(path.clone());
                handle.save_png(&path)?;
                path
            }
        };

        // 行号未给出或为 0 时归到第 1 行
        let row_index = match figure.row_index {
            Some(0) | None => 1,
            Some(i) => i,
        };

        resolved.push(ResolvedFigure {
            path,
            caption: figure.caption.clone(),
            row_index,
            embed: figure.embed,
        });
    }

    Ok((resolved, temps))
}

/// 按行号分组图片
///
/// 行按行号升序输出，与输入顺序无关；同一行内保持输入顺序
pub fn group_figure_rows(figures: &[ResolvedFigure]) -> Vec<FigureRow> {
    let indices: BTreeSet<u32> = figures.iter().map(|f| f.row_index).collect();

    indices
        .into_iter()
        .map(|index| FigureRow {
            index,
            figures: figures
                .iter()
                .filter(|f| f.row_index == index)
                .cloned()
                .collect(),
        })
        .collect()
}

fn temp_png_path() -> ReportResult<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("report_fig_")
        .suffix(".png")
        .tempfile()?;
    file.into_temp_path()
        .keep()
        .map_err(|e| ReportError::Io(e.error))
}
