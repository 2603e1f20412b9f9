// ==========================================
// 商品目录馈送生成器 - 引擎层
// ==========================================
// pipeline: 合并 + 导出的完整流程
// inspect:  上传后的只读检查工具
// ==========================================

pub mod error;
pub mod inspect;
pub mod pipeline;

pub use error::{FeedError, FeedResult};
pub use inspect::{count_rows, photo_sheet, preview, price_sheet, validate_columns, ColumnReport};
pub use pipeline::{
    load_table, load_upload, ExportOptions, FeedArtifact, FeedOutput, FeedPipeline, PipelineReport,
};
