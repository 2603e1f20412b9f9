// ==========================================
// 商品目录馈送生成器 - 导出层
// ==========================================
// tabular: 固定列表格（Prom 导入模板，序列化为 CSV）
// tree:    YML 目录（XML）
// ==========================================

pub mod tabular;
pub mod tree;

pub use tabular::{tabular_columns, TabularExport, TabularExporter, BASE_COLUMNS};
pub use tree::{TreeExporter, CATALOG_DATE_FORMAT};
