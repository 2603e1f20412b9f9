// ==========================================
// 商品目录馈送生成器 - 应用层
// ==========================================
// 职责: 上传会话管理（传输层之外的状态）
// ==========================================

pub mod session;

// 重导出
pub use session::{parse_keywords, SessionError, SessionStore, UploadProgress, UploadSession};
