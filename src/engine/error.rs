// ==========================================
// 商品目录馈送生成器 - 流水线错误类型
// ==========================================
// 说明: 只有表级问题会走到这里; 行级问题见 importer::diagnostics
// ==========================================

use crate::config::config_manager::ConfigError;
use crate::domain::types::TableRole;
use crate::importer::error::ImportError;
use thiserror::Error;

/// 流水线错误类型
#[derive(Error, Debug)]
pub enum FeedError {
    /// 表头中找不到任何商品编码列，需提示用户检查表头
    #[error("无法识别商品编码列 ({table} 表)，请检查表头（product code / main sku / код / артикул）")]
    UnresolvableIdentifierColumn { table: TableRole },

    /// 上传内容无法解析为表格
    #[error("无法解析为表格数据: {0}")]
    MalformedInputTable(String),

    #[error("输入文件错误: {0}")]
    Import(ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导出渲染失败: {0}")]
    Render(String),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// 是否为需要用户检查表头的拒绝
    pub fn is_header_problem(&self) -> bool {
        matches!(self, FeedError::UnresolvableIdentifierColumn { .. })
    }

    /// 是否应作为“拒绝本次上传”展示给用户
    pub fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            FeedError::UnresolvableIdentifierColumn { .. } | FeedError::MalformedInputTable(_)
        )
    }
}

// 表格结构错误统一为 MalformedInputTable，其余保持原样
impl From<ImportError> for FeedError {
    fn from(err: ImportError) -> Self {
        if err.is_malformed() {
            FeedError::MalformedInputTable(err.to_string())
        } else {
            FeedError::Import(err)
        }
    }
}

impl From<csv::Error> for FeedError {
    fn from(err: csv::Error) -> Self {
        FeedError::Render(err.to_string())
    }
}

/// Result 类型别名
pub type FeedResult<T> = Result<T, FeedError>;
