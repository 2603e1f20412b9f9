// ==========================================
// 商品目录馈送生成器 - 表格导出器
// ==========================================
// 职责: 规范记录 → 固定列表格（Prom 导入模板）
// 红线: 每行列数与列顺序完全一致,与商品实际特征数无关
// ==========================================

use crate::config::config_manager::FeedSettings;
use crate::domain::product::{CanonicalRecord, MergedTable};
use crate::engine::error::FeedResult;
use crate::importer::data_cleaner::DataCleaner;
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// 固定前缀列（特征列组之前）
pub const BASE_COLUMNS: [&str; 10] = [
    "Код_товару",
    "Назва_позиції",
    "Назва_позиції_укр",
    "Опис",
    "Опис_укр",
    "Ціна",
    "Валюта",
    "Кількість",
    "Посилання_зображення",
    "Ключові_фрази",
];

/// 特征列组前缀（名称 / 单位 / 值）
pub const TRIPLET_PREFIXES: [&str; 3] = [
    "Назва_Характеристики",
    "Одиниця_виміру_Характеристики",
    "Значення_Характеристики",
];

/// 完整列定义: 固定列 + N 组特征列
pub fn tabular_columns(max_attributes: usize) -> Vec<String> {
    let mut columns: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    for slot in 1..=max_attributes {
        for prefix in TRIPLET_PREFIXES {
            columns.push(format!("{}_{}", prefix, slot));
        }
    }
    columns
}

// ==========================================
// TabularExport - 表格导出结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TabularExport {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularExport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按列名取单元格
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// 写出为 CSV（UTF-8，逗号分隔）
    pub fn write_csv<W: Write>(&self, writer: W) -> FeedResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_bytes(&self) -> FeedResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }
}

// ==========================================
// TabularExporter - 表格导出器
// ==========================================
pub struct TabularExporter<'s> {
    settings: &'s FeedSettings,
}

impl<'s> TabularExporter<'s> {
    pub fn new(settings: &'s FeedSettings) -> Self {
        Self { settings }
    }

    /// 导出可输出记录（空编码记录不输出）
    pub fn export(&self, merged: &MergedTable, keywords: &[String]) -> TabularExport {
        let columns = tabular_columns(self.settings.max_attributes);
        let keyword_text = keywords.join(", ");

        let rows: Vec<Vec<String>> = merged
            .emittable()
            .map(|record| self.row_for(record, &keyword_text))
            .collect();

        info!(rows = rows.len(), columns = columns.len(), "表格导出完成");
        TabularExport { columns, rows }
    }

    fn row_for(&self, record: &CanonicalRecord, keyword_text: &str) -> Vec<String> {
        let cleaner = DataCleaner;
        let mut row = vec![
            cleaner.truncate_chars(record.id.trim(), self.settings.id_max_len),
            record.name.clone(),
            record.name_translated.clone(),
            record.description.clone(),
            record.description_translated.clone(),
            record.price.map(|p| p.to_string()).unwrap_or_default(),
            self.settings.currency.clone(),
            record
                .quantity
                .as_ref()
                .map(|q| q.to_text())
                .unwrap_or_default(),
            record.photos.join(", "),
            keyword_text.to_string(),
        ];

        for slot in 0..self.settings.max_attributes {
            match record.attributes.get(slot) {
                Some(attr) => {
                    row.push(attr.label.clone());
                    row.push(attr.unit.clone());
                    row.push(attr.value.clone());
                }
                None => row.extend([String::new(), String::new(), String::new()]),
            }
        }

        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::AttributeTriplet;
    use crate::domain::table::CellValue;

    fn record(id: &str) -> CanonicalRecord {
        CanonicalRecord {
            id: id.to_string(),
            name: "Плед".to_string(),
            price: Some(19.99),
            quantity: Some(CellValue::Number(3.0)),
            photos: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            attributes: vec![AttributeTriplet::new("Колір", "синій")],
            ..Default::default()
        }
    }

    #[test]
    fn test_columns_fixed_schema() {
        let columns = tabular_columns(15);
        assert_eq!(columns.len(), 10 + 45);
        assert_eq!(columns[0], "Код_товару");
        assert_eq!(columns[10], "Назва_Характеристики_1");
        assert_eq!(columns[11], "Одиниця_виміру_Характеристики_1");
        assert_eq!(columns[54], "Значення_Характеристики_15");
    }

    #[test]
    fn test_export_row_shape_and_values() {
        let settings = FeedSettings::default();
        let merged = MergedTable::new(vec![record("A1"), record(""), CanonicalRecord {
            id: "B2".to_string(),
            ..Default::default()
        }]);

        let export = TabularExporter::new(&settings).export(&merged, &["плед".to_string(), "ковдра".to_string()]);

        assert_eq!(export.len(), 2);
        assert!(export.rows.iter().all(|r| r.len() == export.columns.len()));
        assert_eq!(export.get(0, "Ціна"), Some("19.99"));
        assert_eq!(export.get(0, "Валюта"), Some("UAH"));
        assert_eq!(export.get(0, "Кількість"), Some("3"));
        assert_eq!(export.get(0, "Посилання_зображення"), Some("a.jpg, b.jpg"));
        assert_eq!(export.get(0, "Ключові_фрази"), Some("плед, ковдра"));
        assert_eq!(export.get(0, "Назва_Характеристики_1"), Some("Колір"));
        assert_eq!(export.get(0, "Одиниця_виміру_Характеристики_1"), Some(""));
        assert_eq!(export.get(0, "Значення_Характеристики_1"), Some("синій"));
        assert_eq!(export.get(0, "Назва_Характеристики_2"), Some(""));

        // 价格缺失 → 空串而不是 0
        assert_eq!(export.get(1, "Ціна"), Some(""));
        assert_eq!(export.get(1, "Кількість"), Some(""));
    }

    #[test]
    fn test_identifier_truncated_to_limit() {
        let settings = FeedSettings::default();
        let long_id = "X".repeat(40);
        let merged = MergedTable::new(vec![record(&long_id)]);

        let export = TabularExporter::new(&settings).export(&merged, &[]);

        assert_eq!(export.get(0, "Код_товару").map(|s| s.chars().count()), Some(25));
        assert_eq!(export.get(0, "Ключові_фрази"), Some(""));
    }

    #[test]
    fn test_csv_output_has_header_line() {
        let settings = FeedSettings::default().with_max_attributes(10);
        let merged = MergedTable::new(vec![record("A1")]);
        let export = TabularExporter::new(&settings).export(&merged, &[]);

        let text = String::from_utf8(export.to_csv_bytes().unwrap()).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Код_товару,Назва_позиції,"));
        assert!(lines.next().unwrap().starts_with("A1,Плед,"));
    }
}
