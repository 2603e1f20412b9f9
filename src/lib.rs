// ==========================================
// 商品目录馈送生成器 - 核心库
// ==========================================
// 输入: 基础语言表 + 翻译语言表（Excel / CSV）
// 输出: Prom 表格模板（CSV）或 YML 目录（XML）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格与商品记录
pub mod domain;

// 配置层 - 运行参数与字段别名
pub mod config;

// 导入层 - 文件解析 / 列解析 / 字段提取 / 合并
pub mod importer;

// 导出层 - 表格 / 树形
pub mod exporter;

// 引擎层 - 流水线编排与检查工具
pub mod engine;

// 应用层 - 上传会话
pub mod app;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ConfigManager, FeedSettings};
pub use domain::{CanonicalRecord, CellValue, ExportFormat, MergedTable, RawTable};
pub use engine::{ExportOptions, FeedArtifact, FeedError, FeedOutput, FeedPipeline, PipelineReport};
pub use importer::{DiagnosticLog, RowIssue, UniversalFileParser};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Prom 商品馈送生成器";
