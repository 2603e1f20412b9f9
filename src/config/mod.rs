// ==========================================
// 商品目录馈送生成器 - 配置层
// ==========================================
// 职责: 运行配置（币种、上限、策略）与静态字段别名表
// 存储: JSON 文件,缺省值内置
// ==========================================

pub mod config_manager;
pub mod feed_config_trait;
pub mod field_aliases;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, FeedSettings};
pub use feed_config_trait::FeedConfigReader;
pub use field_aliases::{CanonicalField, ATTRIBUTE_ALIASES};
