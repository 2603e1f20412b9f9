// ==========================================
// 商品目录馈送生成器 - 导入层
// ==========================================
// 流程: 文件解析 → 列解析 → 字段提取 → 记录合并
// ==========================================

pub mod column_resolver;
pub mod data_cleaner;
pub mod diagnostics;
pub mod error;
pub mod field_extractor;
pub mod file_parser;
pub mod importer_trait;
pub mod record_merger;

pub use column_resolver::{normalize_header, resolve_column, HeaderIndex, RowView, TableView};
pub use data_cleaner::DataCleaner;
pub use diagnostics::{DiagnosticLog, RowIssue};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use importer_trait::FileParser;
pub use record_merger::{RecordMerger, TableColumns};
