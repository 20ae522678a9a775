//! 报告生成错误类型

use thiserror::Error;

/// 报告导出错误
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX生成错误: {0}")]
    Docx(#[from] docx_rs::DocxError),

    #[error("资源不可用: {0}")]
    Resource(String),

    #[error("无效的图片来源: {0}")]
    InvalidFigure(String),

    #[error("无效的配置: {0}")]
    InvalidConfig(String),
}

/// 报告导出结果
pub type ReportResult<T> = Result<T, ReportError>;
