// ==========================================
// 商品目录馈送生成器 - 领域枚举类型
// ==========================================
// 职责: 导出格式 / 表角色 / 合并与价格策略
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// ExportFormat - 导出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Tabular, // 固定列表格（XLSX/CSV）
    Tree,    // 层级文档（YML）
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Tabular => write!(f, "tabular"),
            ExportFormat::Tree => write!(f, "tree"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 兼容旧的 xlsx / yml 叫法
        match s.trim().to_lowercase().as_str() {
            "tabular" | "xlsx" | "csv" => Ok(ExportFormat::Tabular),
            "tree" | "yml" | "xml" => Ok(ExportFormat::Tree),
            other => Err(format!("未知导出格式: {}", other)),
        }
    }
}

// ==========================================
// TableRole - 输入表角色
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableRole {
    Base,        // 基础语言表（决定行是否存在）
    Translation, // 翻译语言表
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Base => write!(f, "base"),
            TableRole::Translation => write!(f, "translation"),
        }
    }
}

// ==========================================
// DuplicatePolicy - 翻译表重复标识处理
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// 同一标识只取翻译表中第一条
    #[default]
    FirstMatch,
    /// 每条匹配生成一条合并记录（行数膨胀）
    FanOut,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::FirstMatch => write!(f, "first_match"),
            DuplicatePolicy::FanOut => write!(f, "fan_out"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first_match" => Ok(DuplicatePolicy::FirstMatch),
            "fan_out" => Ok(DuplicatePolicy::FanOut),
            other => Err(format!("未知重复策略: {}", other)),
        }
    }
}

// ==========================================
// PricePolicy - 价格列重试策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePolicy {
    /// 第一个有值的列决定结果，解析失败即视为缺失
    #[default]
    FirstPresent,
    /// 解析失败时继续尝试下一个别名列
    FirstParseable,
}

impl fmt::Display for PricePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricePolicy::FirstPresent => write!(f, "first_present"),
            PricePolicy::FirstParseable => write!(f, "first_parseable"),
        }
    }
}

impl FromStr for PricePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first_present" => Ok(PricePolicy::FirstPresent),
            "first_parseable" => Ok(PricePolicy::FirstParseable),
            other => Err(format!("未知价格策略: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_aliases() {
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Tabular));
        assert_eq!(" YML ".parse::<ExportFormat>(), Ok(ExportFormat::Tree));
        assert_eq!("tree".parse::<ExportFormat>(), Ok(ExportFormat::Tree));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_policy_defaults() {
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::FirstMatch);
        assert_eq!(PricePolicy::default(), PricePolicy::FirstPresent);
        assert_eq!(
            "fan_out".parse::<DuplicatePolicy>(),
            Ok(DuplicatePolicy::FanOut)
        );
        assert_eq!(
            "first_parseable".parse::<PricePolicy>(),
            Ok(PricePolicy::FirstParseable)
        );
    }
}
