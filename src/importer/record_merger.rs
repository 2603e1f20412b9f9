// ==========================================
// 商品目录馈送生成器 - 记录合并器
// ==========================================
// 职责: 基础表 LEFT JOIN 翻译表（按商品编码）→ 规范记录
// 红线: 基础表决定行是否存在; 仅翻译表存在的行丢弃
// 红线: 任一表解析不到编码列 → 整体中止（表级错误）
// ==========================================

use crate::config::config_manager::FeedSettings;
use crate::config::field_aliases::CanonicalField;
use crate::domain::product::{CanonicalRecord, MergedTable};
use crate::domain::table::RawTable;
use crate::domain::types::{DuplicatePolicy, TableRole};
use crate::engine::error::FeedError;
use crate::importer::column_resolver::{RowView, TableView};
use crate::importer::diagnostics::{DiagnosticLog, RowIssue};
use crate::importer::field_extractor::{
    build_photo_list, extract_attributes, extract_identifier, extract_price, extract_quantity,
    extract_text,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

// ==========================================
// TableColumns - 单表解析出的列
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumns {
    pub id: usize,
    pub name: Option<usize>,
    pub description: Option<usize>,
    pub quantity: Option<usize>,
}

impl TableColumns {
    /// 解析编码/名称/描述/数量列
    ///
    /// # 返回
    /// - Err(UnresolvableIdentifierColumn): 编码列不存在
    /// - Ok: 名称列缺失时记录 MissingColumn 并继续
    pub fn resolve(
        view: &TableView<'_>,
        table: TableRole,
        log: &mut DiagnosticLog,
    ) -> Result<Self, FeedError> {
        let (id_header, id) = view
            .resolve_field(CanonicalField::Id)
            .ok_or(FeedError::UnresolvableIdentifierColumn { table })?;
        debug!(%table, column = id_header, "编码列已解析");

        let name = view.resolve_field(CanonicalField::Name).map(|(_, idx)| idx);
        if name.is_none() {
            log.record(RowIssue::MissingColumn {
                table,
                field: CanonicalField::Name.key().to_string(),
            });
        }

        let description = view
            .resolve_field(CanonicalField::Description)
            .map(|(_, idx)| idx);
        if description.is_none() {
            debug!(%table, "未找到描述列");
        }

        let quantity = view.resolve_field(CanonicalField::Quantity).map(|(_, idx)| idx);

        Ok(Self {
            id,
            name,
            description,
            quantity,
        })
    }
}

/// 翻译表中的一行（只保留需要的文本）
#[derive(Debug, Clone, PartialEq, Eq)]
struct TranslationText {
    name: String,
    description: String,
}

// ==========================================
// RecordMerger - 记录合并器
// ==========================================
pub struct RecordMerger<'s> {
    settings: &'s FeedSettings,
}

impl<'s> RecordMerger<'s> {
    pub fn new(settings: &'s FeedSettings) -> Self {
        Self { settings }
    }

    /// 合并基础表与翻译表
    ///
    /// # 返回
    /// - Ok(MergedTable): 基础表顺序; 可能包含空编码记录（导出时过滤）
    /// - Err(UnresolvableIdentifierColumn): 任一表缺少编码列
    pub fn merge(
        &self,
        base: &RawTable,
        translation: &RawTable,
        log: &mut DiagnosticLog,
    ) -> Result<MergedTable, FeedError> {
        let base_view = TableView::new(base);
        let translation_view = TableView::new(translation);

        // === 步骤 1: 列解析（两表独立）===
        let base_cols = TableColumns::resolve(&base_view, TableRole::Base, log)?;
        let translation_cols =
            TableColumns::resolve(&translation_view, TableRole::Translation, log)?;

        // === 步骤 2: 翻译表按编码建索引 ===
        let translations = self.index_translations(&translation_view, &translation_cols, log);

        // === 步骤 3: LEFT JOIN ===
        let mut records = Vec::with_capacity(base_view.len());
        let mut matched_ids = HashSet::new();
        for row in base_view.rows() {
            let record = self.base_record(&row, &base_cols, log);

            let matches = if record.has_identifier() {
                translations.get(&record.id)
            } else {
                None
            };

            match matches {
                Some(texts) => {
                    matched_ids.insert(record.id.clone());
                    let take = match self.settings.duplicate_policy {
                        DuplicatePolicy::FirstMatch => 1,
                        DuplicatePolicy::FanOut => texts.len(),
                    };
                    for text in texts.iter().take(take) {
                        let mut merged = record.clone();
                        merged.name_translated = text.name.clone();
                        merged.description_translated = text.description.clone();
                        records.push(merged);
                    }
                }
                None => records.push(record),
            }
        }

        let unmatched = translations
            .keys()
            .filter(|id| !matched_ids.contains(*id))
            .count();
        if unmatched > 0 {
            debug!(unmatched, "翻译表中存在无基础行对应的编码，已忽略");
        }

        info!(
            base_rows = base_view.len(),
            translation_rows = translation_view.len(),
            merged = records.len(),
            "记录合并完成"
        );

        Ok(MergedTable::new(records))
    }

    /// 翻译表索引: 编码 → 行（保持翻译表顺序）
    fn index_translations(
        &self,
        view: &TableView<'_>,
        cols: &TableColumns,
        log: &mut DiagnosticLog,
    ) -> HashMap<String, Vec<TranslationText>> {
        let mut index: HashMap<String, Vec<TranslationText>> = HashMap::new();

        for row in view.rows() {
            let id = extract_identifier(&row, Some(cols.id));
            if id.is_empty() {
                log.record(RowIssue::EmptyIdentifier {
                    table: TableRole::Translation,
                    row: row.row_number(),
                });
                continue;
            }

            let entries = index.entry(id).or_default();
            if !entries.is_empty() && self.settings.duplicate_policy == DuplicatePolicy::FirstMatch
            {
                continue;
            }
            entries.push(TranslationText {
                name: extract_text(&row, cols.name),
                description: extract_text(&row, cols.description),
            });
        }

        index
    }

    /// 基础表单行 → 规范记录（翻译字段留空）
    fn base_record(
        &self,
        row: &RowView<'_>,
        cols: &TableColumns,
        log: &mut DiagnosticLog,
    ) -> CanonicalRecord {
        let id = extract_identifier(row, Some(cols.id));
        if id.is_empty() {
            log.record(RowIssue::EmptyIdentifier {
                table: TableRole::Base,
                row: row.row_number(),
            });
        }

        let price = extract_price(row, self.settings.price_policy, TableRole::Base);
        log.extend(price.issues);

        let quantity = extract_quantity(row, cols.quantity);
        let record = CanonicalRecord {
            id,
            name: extract_text(row, cols.name),
            description: extract_text(row, cols.description),
            price: price.price,
            quantity,
            photos: build_photo_list(row, self.settings.max_photos),
            attributes: extract_attributes(row, self.settings.max_attributes),
            source_row: row.row_number(),
            ..Default::default()
        };

        if record.quantity.is_some() && record.numeric_quantity().is_none() {
            log.record(RowIssue::NonNumericQuantity {
                table: TableRole::Base,
                row: row.row_number(),
                value: record.quantity.as_ref().map(|q| q.to_text()).unwrap_or_default(),
            });
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;

    fn base_table() -> RawTable {
        RawTable::with_rows(
            ["Артикул", "Название", "Описание", "Цена", "Количество"],
            vec![
                vec!["42".into(), "Плед".into(), "Тёплый".into(), "19,99".into(), CellValue::Number(3.0)],
                vec!["43".into(), "Подушка".into(), "".into(), "250".into(), "".into()],
                vec!["  ".into(), "Без кода".into(), "".into(), "".into(), "".into()],
            ],
        )
    }

    fn translation_table() -> RawTable {
        RawTable::with_rows(
            ["Код", "Назва", "Опис"],
            vec![
                vec!["43".into(), "Подушка UA".into(), "Опис 43".into()],
                vec!["43".into(), "Подушка UA (дубль)".into(), "".into()],
                vec!["99".into(), "Лише переклад".into(), "".into()],
            ],
        )
    }

    #[test]
    fn test_left_join_keeps_unmatched_base_rows() {
        let settings = FeedSettings::default();
        let mut log = DiagnosticLog::new();
        let merged = RecordMerger::new(&settings)
            .merge(&base_table(), &translation_table(), &mut log)
            .unwrap();

        assert_eq!(merged.len(), 3);
        let first = &merged.records[0];
        assert_eq!(first.id, "42");
        assert_eq!(first.name, "Плед");
        assert_eq!(first.name_translated, "");
        assert_eq!(first.price, Some(19.99));

        let second = &merged.records[1];
        assert_eq!(second.name_translated, "Подушка UA");
        assert_eq!(second.description_translated, "Опис 43");

        // 仅翻译表存在的 99 不出现
        assert!(merged.records.iter().all(|r| r.id != "99"));
        assert_eq!(merged.empty_identifier_count(), 1);
        assert_eq!(log.count_of("empty_identifier"), 1);
    }

    #[test]
    fn test_fan_out_policy_multiplies_rows() {
        let settings = FeedSettings {
            duplicate_policy: DuplicatePolicy::FanOut,
            ..Default::default()
        };
        let mut log = DiagnosticLog::new();
        let merged = RecordMerger::new(&settings)
            .merge(&base_table(), &translation_table(), &mut log)
            .unwrap();

        assert_eq!(merged.len(), 4);
        let translated: Vec<&str> = merged
            .records
            .iter()
            .filter(|r| r.id == "43")
            .map(|r| r.name_translated.as_str())
            .collect();
        assert_eq!(translated, vec!["Подушка UA", "Подушка UA (дубль)"]);
    }

    #[test]
    fn test_missing_identifier_column_aborts() {
        let settings = FeedSettings::default();
        let mut log = DiagnosticLog::new();
        let no_id = RawTable::with_rows(["Назва"], vec![vec!["x".into()]]);

        let err = RecordMerger::new(&settings)
            .merge(&base_table(), &no_id, &mut log)
            .unwrap_err();
        assert!(matches!(
            err,
            FeedError::UnresolvableIdentifierColumn {
                table: TableRole::Translation
            }
        ));

        let err = RecordMerger::new(&settings)
            .merge(&no_id, &translation_table(), &mut log)
            .unwrap_err();
        assert!(matches!(
            err,
            FeedError::UnresolvableIdentifierColumn {
                table: TableRole::Base
            }
        ));
    }

    #[test]
    fn test_missing_name_column_degrades() {
        let settings = FeedSettings::default();
        let mut log = DiagnosticLog::new();
        let base = RawTable::with_rows(["sku", "product code"], vec![vec!["x".into(), "7".into()]]);
        let translation = RawTable::with_rows(["код", "назва"], vec![vec!["7".into(), "Сім".into()]]);

        let merged = RecordMerger::new(&settings)
            .merge(&base, &translation, &mut log)
            .unwrap();

        assert_eq!(merged.records[0].name, "");
        assert_eq!(merged.records[0].name_translated, "Сім");
        assert_eq!(log.count_of("missing_column"), 1);
    }

    #[test]
    fn test_numeric_identifier_joins_text_identifier() {
        let settings = FeedSettings::default();
        let mut log = DiagnosticLog::new();
        let base = RawTable::with_rows(["код", "название"], vec![vec![CellValue::Number(42.0), "a".into()]]);
        let translation = RawTable::with_rows(["код", "назва"], vec![vec![" 42 ".into(), "б".into()]]);

        let merged = RecordMerger::new(&settings)
            .merge(&base, &translation, &mut log)
            .unwrap();

        assert_eq!(merged.records[0].id, "42");
        assert_eq!(merged.records[0].name_translated, "б");
    }
}
