// ==========================================
// 商品目录馈送生成器 - 商品领域模型
// ==========================================
// 用途: 合并层写入,导出层只读
// 红线: 空标识记录永不输出
// ==========================================

use crate::domain::table::CellValue;
use serde::{Deserialize, Serialize};

// ==========================================
// AttributeTriplet - 商品特征三元组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTriplet {
    pub label: String, // 规范特征名（输出语言）
    pub unit: String,  // 计量单位（目前所有提取器均留空）
    pub value: String, // 去空白后的原值
}

impl AttributeTriplet {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            unit: String::new(),
            value: value.into(),
        }
    }
}

// ==========================================
// CanonicalRecord - 规范商品记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalRecord {
    // ===== 主键 =====
    pub id: String, // 商品编码（去空白；表格导出时截断）

    // ===== 文本字段 =====
    pub name: String,                   // 基础语言名称
    pub name_translated: String,        // 翻译语言名称
    pub description: String,            // 基础语言描述
    pub description_translated: String, // 翻译语言描述

    // ===== 数值字段 =====
    pub price: Option<f64>,          // 价格（币种由配置固定）
    pub quantity: Option<CellValue>, // 库存数量（原样透传）

    // ===== 列表字段 =====
    pub photos: Vec<String>,                 // 去重后的图片地址
    pub attributes: Vec<AttributeTriplet>, // 按别名表顺序的特征

    // ===== 元信息 =====
    pub source_row: usize, // 基础表中的行号（从 1 开始）
}

impl CanonicalRecord {
    pub fn has_identifier(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// 数量是否可视为数值（数字单元格，或可解析的文本）
    ///
    /// NaN / 无穷大不算数值
    pub fn numeric_quantity(&self) -> Option<f64> {
        let value = match self.quantity.as_ref()? {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            CellValue::Empty => None,
        };
        value.filter(|v| v.is_finite())
    }
}

// ==========================================
// MergedTable - 合并结果
// ==========================================
// 顺序与基础表一致；可能包含空标识记录，导出时过滤
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergedTable {
    pub records: Vec<CanonicalRecord>,
}

impl MergedTable {
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 可输出记录（标识非空）
    pub fn emittable(&self) -> impl Iterator<Item = &CanonicalRecord> {
        self.records.iter().filter(|r| r.has_identifier())
    }

    pub fn empty_identifier_count(&self) -> usize {
        self.records.iter().filter(|r| !r.has_identifier()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emittable_skips_blank_ids() {
        let table = MergedTable::new(vec![
            CanonicalRecord {
                id: "A1".to_string(),
                ..Default::default()
            },
            CanonicalRecord {
                id: "  ".to_string(),
                ..Default::default()
            },
        ]);

        assert_eq!(table.emittable().count(), 1);
        assert_eq!(table.empty_identifier_count(), 1);
    }

    #[test]
    fn test_numeric_quantity() {
        let mut record = CanonicalRecord::default();
        assert_eq!(record.numeric_quantity(), None);

        record.quantity = Some(CellValue::Number(5.0));
        assert_eq!(record.numeric_quantity(), Some(5.0));

        record.quantity = Some(CellValue::Text("2,5".to_string()));
        assert_eq!(record.numeric_quantity(), Some(2.5));

        record.quantity = Some(CellValue::Text("багато".to_string()));
        assert_eq!(record.numeric_quantity(), None);
    }

    #[test]
    fn test_non_finite_quantity_is_not_numeric() {
        let mut record = CanonicalRecord::default();
        for text in ["NaN", "inf", "-infinity", " Infinity "] {
            record.quantity = Some(CellValue::Text(text.to_string()));
            assert_eq!(record.numeric_quantity(), None, "text {:?}", text);
        }

        record.quantity = Some(CellValue::Number(f64::NAN));
        assert_eq!(record.numeric_quantity(), None);
        record.quantity = Some(CellValue::Number(f64::NEG_INFINITY));
        assert_eq!(record.numeric_quantity(), None);
    }
}
