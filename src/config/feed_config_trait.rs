// ==========================================
// 商品目录馈送生成器 - 配置读取 Trait
// ==========================================
// 职责: 定义流水线所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::config_manager::ConfigError;
use crate::domain::types::{DuplicatePolicy, PricePolicy};

// ==========================================
// FeedConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 JSON 键值读取）
pub trait FeedConfigReader: Send + Sync {
    /// 固定币种代码
    ///
    /// # 默认值
    /// - UAH
    fn get_currency(&self) -> Result<String, ConfigError>;

    /// 表格导出时商品编码最大字符数
    ///
    /// # 默认值
    /// - 25
    fn get_id_max_len(&self) -> Result<usize, ConfigError>;

    /// 每个商品最多保留的图片数
    ///
    /// # 默认值
    /// - 10
    fn get_max_photos(&self) -> Result<usize, ConfigError>;

    /// 特征三元组上限（由目标表格宽度决定: 10 / 15 / 20）
    ///
    /// # 默认值
    /// - 20
    fn get_max_attributes(&self) -> Result<usize, ConfigError>;

    /// 价格列重试策略
    ///
    /// # 默认值
    /// - first_present
    fn get_price_policy(&self) -> Result<PricePolicy, ConfigError>;

    /// 翻译表重复标识的合并策略
    ///
    /// # 默认值
    /// - first_match
    fn get_duplicate_policy(&self) -> Result<DuplicatePolicy, ConfigError>;

    /// 预览行数
    ///
    /// # 默认值
    /// - 5
    fn get_preview_rows(&self) -> Result<usize, ConfigError>;

    /// 诊断日志文件路径
    ///
    /// # 默认值
    /// - prom_feed.log
    fn get_log_file(&self) -> Result<String, ConfigError>;
}
