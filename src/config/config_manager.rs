// ==========================================
// 商品目录馈送生成器 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、默认值回退
// 存储: JSON 对象（key → value），缺失键使用默认值
// ==========================================

use crate::config::feed_config_trait::FeedConfigReader;
use crate::domain::types::{DuplicatePolicy, PricePolicy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置文件格式错误: {0}")]
    ConfigFormatError(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const CURRENCY: &str = "currency";
    pub const ID_MAX_LEN: &str = "id_max_len";
    pub const MAX_PHOTOS: &str = "max_photos";
    pub const MAX_ATTRIBUTES: &str = "max_attributes";
    pub const PRICE_POLICY: &str = "price_policy";
    pub const DUPLICATE_POLICY: &str = "duplicate_policy";
    pub const PREVIEW_ROWS: &str = "preview_rows";
    pub const LOG_FILE: &str = "log_file";
}

mod defaults {
    pub const CURRENCY: &str = "UAH";
    pub const ID_MAX_LEN: usize = 25;
    pub const MAX_PHOTOS: usize = 10;
    pub const MAX_ATTRIBUTES: usize = 20;
    pub const PREVIEW_ROWS: usize = 5;
    pub const LOG_FILE: &str = "prom_feed.log";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象文本加载
    ///
    /// 数值、布尔值统一转为字符串保存，由 getter 负责类型转换
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)
            .map_err(|e| ConfigError::ConfigFormatError(e.to_string()))?;

        let values = raw
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let value = match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, value)
            })
            .collect();

        Ok(Self { values })
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// 覆写单个配置项（命令行参数优先于文件）
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key).unwrap_or(default).to_string()
    }

    /// 解析配置值，缺失时使用默认值
    fn parse_or_default<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// 解析正整数配置
    fn positive_or_default(&self, key: &str, default: usize) -> Result<usize, ConfigError> {
        let value = self.parse_or_default(key, default)?;
        if value == 0 {
            return Err(ConfigError::ConfigValueError {
                key: key.to_string(),
                value: "0".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        Ok(value)
    }

    /// 所有显式配置的快照（JSON，键有序）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        let ordered: BTreeMap<&String, &String> = self.values.iter().collect();
        serde_json::to_string(&ordered).map_err(|e| ConfigError::ConfigFormatError(e.to_string()))
    }
}

impl FeedConfigReader for ConfigManager {
    fn get_currency(&self) -> Result<String, ConfigError> {
        Ok(self.get_config_or_default(config_keys::CURRENCY, defaults::CURRENCY))
    }

    fn get_id_max_len(&self) -> Result<usize, ConfigError> {
        self.positive_or_default(config_keys::ID_MAX_LEN, defaults::ID_MAX_LEN)
    }

    fn get_max_photos(&self) -> Result<usize, ConfigError> {
        self.positive_or_default(config_keys::MAX_PHOTOS, defaults::MAX_PHOTOS)
    }

    fn get_max_attributes(&self) -> Result<usize, ConfigError> {
        self.positive_or_default(config_keys::MAX_ATTRIBUTES, defaults::MAX_ATTRIBUTES)
    }

    fn get_price_policy(&self) -> Result<PricePolicy, ConfigError> {
        self.parse_or_default(config_keys::PRICE_POLICY, PricePolicy::default())
    }

    fn get_duplicate_policy(&self) -> Result<DuplicatePolicy, ConfigError> {
        self.parse_or_default(config_keys::DUPLICATE_POLICY, DuplicatePolicy::default())
    }

    fn get_preview_rows(&self) -> Result<usize, ConfigError> {
        self.positive_or_default(config_keys::PREVIEW_ROWS, defaults::PREVIEW_ROWS)
    }

    fn get_log_file(&self) -> Result<String, ConfigError> {
        Ok(self.get_config_or_default(config_keys::LOG_FILE, defaults::LOG_FILE))
    }
}

// ==========================================
// FeedSettings - 单次运行的配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSettings {
    pub currency: String,
    pub id_max_len: usize,
    pub max_photos: usize,
    pub max_attributes: usize,
    pub price_policy: PricePolicy,
    pub duplicate_policy: DuplicatePolicy,
    pub preview_rows: usize,
    pub log_file: String,
}

impl FeedSettings {
    /// 通过配置读取器生成快照
    pub fn from_reader<C: FeedConfigReader + ?Sized>(config: &C) -> Result<Self, ConfigError> {
        Ok(Self {
            currency: config.get_currency()?,
            id_max_len: config.get_id_max_len()?,
            max_photos: config.get_max_photos()?,
            max_attributes: config.get_max_attributes()?,
            price_policy: config.get_price_policy()?,
            duplicate_policy: config.get_duplicate_policy()?,
            preview_rows: config.get_preview_rows()?,
            log_file: config.get_log_file()?,
        })
    }

    /// 指定特征上限（10 / 15 / 20 列宽的表格模板）
    pub fn with_max_attributes(mut self, max_attributes: usize) -> Self {
        self.max_attributes = max_attributes;
        self
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            currency: defaults::CURRENCY.to_string(),
            id_max_len: defaults::ID_MAX_LEN,
            max_photos: defaults::MAX_PHOTOS,
            max_attributes: defaults::MAX_ATTRIBUTES,
            price_policy: PricePolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
            preview_rows: defaults::PREVIEW_ROWS,
            log_file: defaults::LOG_FILE.to_string(),
        }
    }
}
