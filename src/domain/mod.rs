// ==========================================
// 商品目录馈送生成器 - 领域模型层
// ==========================================
// 职责: 定义原始表格、规范商品记录、策略枚举
// 红线: 不含文件读取逻辑,不含导出逻辑
// ==========================================

pub mod product;
pub mod table;
pub mod types;

// 重导出核心类型
pub use product::{AttributeTriplet, CanonicalRecord, MergedTable};
pub use table::{CellValue, RawTable};
pub use types::{DuplicatePolicy, ExportFormat, PricePolicy, TableRole};
