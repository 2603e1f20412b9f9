// ==========================================
// 商品目录馈送生成器 - 检查工具
// ==========================================
// 职责: 上传后的辅助查看（列校验 / 预览 / 计数 / 只看图片 / 只看价格）
// 说明: 只读,不产生诊断
// ==========================================

use crate::config::field_aliases::CanonicalField;
use crate::domain::product::MergedTable;
use crate::domain::table::RawTable;
use crate::exporter::TabularExport;
use crate::importer::column_resolver::TableView;
use serde::Serialize;

/// 校验时要求存在的字段
pub const REQUIRED_FIELDS: [CanonicalField; 3] =
    [CanonicalField::Id, CanonicalField::Name, CanonicalField::Price];

// ==========================================
// ColumnCheck - 单表列校验结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCheck {
    pub field: &'static str,
    pub header: Option<String>, // 命中的规范化表头
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub checks: Vec<ColumnCheck>,
}

impl ColumnReport {
    /// 缺失字段键列表
    pub fn missing(&self) -> Vec<&'static str> {
        self.checks
            .iter()
            .filter(|c| c.header.is_none())
            .map(|c| c.field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.checks.iter().all(|c| c.header.is_some())
    }
}

/// 检查 id / name / price 是否可解析
///
/// price 只要任一价格别名存在即视为可解析
pub fn validate_columns(table: &RawTable) -> ColumnReport {
    let view = TableView::new(table);
    let checks = REQUIRED_FIELDS
        .iter()
        .map(|field| ColumnCheck {
            field: field.key(),
            header: view
                .resolve_field(*field)
                .map(|(header, _)| header.to_string()),
        })
        .collect();
    ColumnReport { checks }
}

/// 前 n 行（全部渲染为文本）
pub fn preview(table: &RawTable, rows: usize) -> TabularExport {
    TabularExport {
        columns: table.headers().to_vec(),
        rows: table
            .rows()
            .iter()
            .take(rows)
            .map(|row| row.iter().map(|cell| cell.to_text()).collect())
            .collect(),
    }
}

/// 所有表的总行数
pub fn count_rows(tables: &[RawTable]) -> usize {
    tables.iter().map(RawTable::len).sum()
}

/// 只含编码与图片槽位的表
pub fn photo_sheet(merged: &MergedTable, max_photos: usize) -> TabularExport {
    let mut columns = vec!["Код_товару".to_string()];
    columns.extend((1..=max_photos).map(|i| format!("Фото_{}", i)));

    let rows = merged
        .emittable()
        .map(|record| {
            let mut row = vec![record.id.clone()];
            row.extend(
                (0..max_photos).map(|i| record.photos.get(i).cloned().unwrap_or_default()),
            );
            row
        })
        .collect();

    TabularExport { columns, rows }
}

/// 只含编码与解析后价格的表
pub fn price_sheet(merged: &MergedTable) -> TabularExport {
    let rows = merged
        .emittable()
        .map(|record| {
            vec![
                record.id.clone(),
                record.price.map(|p| p.to_string()).unwrap_or_default(),
            ]
        })
        .collect();

    TabularExport {
        columns: vec!["Код_товару".to_string(), "Ціна".to_string()],
        rows,
    }
}
