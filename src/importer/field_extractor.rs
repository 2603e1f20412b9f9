// ==========================================
// 商品目录馈送生成器 - 字段提取器
// ==========================================
// 职责: 原始行 → 规范字段值（标识/价格/数量/图片/特征）
// 说明: 纯函数,问题以 RowIssue 返回,由调用方写入诊断日志
// ==========================================

use crate::config::field_aliases::{ATTRIBUTE_ALIASES, PHOTO_ALIASES, PRICE_ALIASES};
use crate::domain::product::AttributeTriplet;
use crate::domain::table::CellValue;
use crate::domain::types::{PricePolicy, TableRole};
use crate::importer::column_resolver::RowView;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::diagnostics::RowIssue;
use std::collections::HashSet;

/// 价格提取结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceExtraction {
    pub price: Option<f64>,
    pub issues: Vec<RowIssue>,
}

/// 商品编码: 去空白后的文本，列不存在或为空时返回空串
pub fn extract_identifier(row: &RowView<'_>, id_column: Option<usize>) -> String {
    text_at(row, id_column)
}

/// 名称/描述等文本字段
pub fn extract_text(row: &RowView<'_>, column: Option<usize>) -> String {
    text_at(row, column)
}

fn text_at(row: &RowView<'_>, column: Option<usize>) -> String {
    column
        .and_then(|idx| row.cell_at(idx))
        .and_then(CellValue::trimmed_text)
        .unwrap_or_default()
}

/// 价格: 按别名顺序找第一个有值的列
///
/// # 策略
/// - FirstPresent: 第一个有值的列决定结果，解析失败即缺失
/// - FirstParseable: 解析失败时记录问题并尝试下一列
///
/// 数值单元格直接使用；文本先把逗号替换为句点再解析
pub fn extract_price(row: &RowView<'_>, policy: PricePolicy, table: TableRole) -> PriceExtraction {
    let cleaner = DataCleaner;
    let mut result = PriceExtraction::default();

    for alias in PRICE_ALIASES {
        let cell = match row.get(alias) {
            Some(cell) if !cell.is_blank() => cell,
            _ => continue,
        };

        let parsed = match cell {
            CellValue::Number(n) => Some(*n).filter(|v| v.is_finite()),
            other => cleaner.parse_decimal(&other.to_text()),
        };

        match parsed {
            Some(price) => {
                result.price = Some(price);
                return result;
            }
            None => {
                result.issues.push(RowIssue::UnparseablePrice {
                    table,
                    row: row.row_number(),
                    column: alias.to_string(),
                    value: cell.to_text(),
                });
                if policy == PricePolicy::FirstPresent {
                    return result;
                }
            }
        }
    }

    result
}

/// 数量: 原样透传，空值返回 None
pub fn extract_quantity(row: &RowView<'_>, qty_column: Option<usize>) -> Option<CellValue> {
    qty_column
        .and_then(|idx| row.cell_at(idx))
        .filter(|cell| !cell.is_blank())
        .cloned()
}

/// 图片列表: 拼接所有图片列 → 逗号拆分 → 去重（保留首次出现顺序）→ 截断
pub fn build_photo_list(row: &RowView<'_>, max_photos: usize) -> Vec<String> {
    let cleaner = DataCleaner;
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    let pieces = PHOTO_ALIASES
        .iter()
        .filter_map(|alias| row.text(alias))
        .flat_map(|value| cleaner.split_list(&value));

    for url in pieces {
        if urls.len() >= max_photos {
            break;
        }
        if seen.insert(url.clone()) {
            urls.push(url);
        }
    }

    urls
}

/// 特征三元组: 按特征别名表顺序提取，达到上限即停止
pub fn extract_attributes(row: &RowView<'_>, max_attributes: usize) -> Vec<AttributeTriplet> {
    ATTRIBUTE_ALIASES
        .iter()
        .filter_map(|(source_key, label)| {
            row.text(source_key)
                .map(|value| AttributeTriplet::new(*label, value))
        })
        .take(max_attributes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::RawTable;
    use crate::importer::column_resolver::TableView;

    fn single_row(headers: &[&str], cells: Vec<CellValue>) -> RawTable {
        RawTable::with_rows(headers.iter().copied(), vec![cells])
    }

    fn price_of(table: &RawTable, policy: PricePolicy) -> PriceExtraction {
        let view = TableView::new(table);
        let row = view.rows().next().unwrap();
        extract_price(&row, policy, TableRole::Base)
    }

    #[test]
    fn test_price_plain_and_comma() {
        let table = single_row(&["Ціна"], vec!["19.99".into()]);
        assert_eq!(price_of(&table, PricePolicy::FirstPresent).price, Some(19.99));

        let table = single_row(&["Ціна"], vec!["19,99".into()]);
        assert_eq!(price_of(&table, PricePolicy::FirstPresent).price, Some(19.99));

        let table = single_row(&["price"], vec![CellValue::Number(250.0)]);
        assert_eq!(price_of(&table, PricePolicy::FirstPresent).price, Some(250.0));
    }

    #[test]
    fn test_price_unparseable_is_absent_and_reported() {
        let table = single_row(&["price"], vec!["abc".into()]);
        let result = price_of(&table, PricePolicy::FirstPresent);

        assert_eq!(result.price, None);
        assert_eq!(result.issues.len(), 1);
        assert!(matches!(
            &result.issues[0],
            RowIssue::UnparseablePrice { column, value, .. } if column == "price" && value == "abc"
        ));
    }

    #[test]
    fn test_price_thousands_space_not_inferred() {
        let table = single_row(&["цена"], vec!["1 234,56".into()]);
        let result = price_of(&table, PricePolicy::FirstPresent);

        assert_eq!(result.price, None);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn test_price_policy_first_present_vs_first_parseable() {
        let table = single_row(&["special price", "price"], vec!["n/a".into(), "100".into()]);

        let first_present = price_of(&table, PricePolicy::FirstPresent);
        assert_eq!(first_present.price, None);
        assert_eq!(first_present.issues.len(), 1);

        let first_parseable = price_of(&table, PricePolicy::FirstParseable);
        assert_eq!(first_parseable.price, Some(100.0));
        assert_eq!(first_parseable.issues.len(), 1);
    }

    #[test]
    fn test_price_skips_blank_special_price() {
        let table = single_row(&["special price", "price"], vec!["  ".into(), "99,5".into()]);
        let result = price_of(&table, PricePolicy::FirstPresent);

        assert_eq!(result.price, Some(99.5));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_price_missing_everywhere_is_none_not_zero() {
        let table = single_row(&["name"], vec!["x".into()]);
        let result = price_of(&table, PricePolicy::FirstPresent);

        assert_eq!(result.price, None);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_photo_list_dedup_and_cap() {
        let slots: Vec<String> = (1..=10).map(|i| format!("photo{}", i)).collect();
        let mut headers: Vec<&str> = vec!["main photo"];
        headers.extend(slots.iter().map(String::as_str));
        headers.push("посилання_зображення");

        let mut cells: Vec<CellValue> = vec!["a.jpg, b.jpg".into()];
        cells.extend((1..=10).map(|i| CellValue::from(format!("p{}.jpg", i))));
        cells.push("a.jpg, z.jpg".into());

        let table = single_row(&headers, cells);
        let view = TableView::new(&table);
        let row = view.rows().next().unwrap();
        let photos = build_photo_list(&row, 10);

        assert_eq!(photos.len(), 10);
        assert_eq!(photos[0], "a.jpg");
        assert_eq!(photos[1], "b.jpg");
        assert_eq!(photos[2], "p1.jpg");
        assert!(!photos.contains(&"z.jpg".to_string()));
    }

    #[test]
    fn test_photo_list_single_column_with_duplicates() {
        let table = single_row(&["Main Photo"], vec!["x.jpg, ,x.jpg ,y.jpg".into()]);
        let view = TableView::new(&table);
        let row = view.rows().next().unwrap();

        assert_eq!(build_photo_list(&row, 10), vec!["x.jpg", "y.jpg"]);
    }

    #[test]
    fn test_attributes_follow_alias_order_and_cap() {
        let headers: Vec<&str> = ATTRIBUTE_ALIASES.iter().rev().map(|(k, _)| *k).collect();
        let cells: Vec<CellValue> = (0..headers.len())
            .map(|i| CellValue::from(format!("v{}", i)))
            .collect();
        let table = single_row(&headers, cells);
        let view = TableView::new(&table);
        let row = view.rows().next().unwrap();

        let attrs = extract_attributes(&row, 15);
        assert_eq!(attrs.len(), 15);
        assert_eq!(attrs[0].label, ATTRIBUTE_ALIASES[0].1);
        assert_eq!(attrs[14].label, ATTRIBUTE_ALIASES[14].1);
        assert!(attrs.iter().all(|a| a.unit.is_empty()));
    }

    #[test]
    fn test_attributes_skip_blank_values() {
        let table = single_row(&["color", "density", "bonus"], vec!["  синій ".into(), " ".into(), CellValue::Number(1.0)]);
        let view = TableView::new(&table);
        let row = view.rows().next().unwrap();

        let attrs = extract_attributes(&row, 20);
        assert_eq!(
            attrs,
            vec![
                AttributeTriplet::new("Колір", "синій"),
                AttributeTriplet::new("Бонус", "1"),
            ]
        );
    }

    #[test]
    fn test_identifier_and_quantity() {
        let table = single_row(&["код", "кількість"], vec![CellValue::Number(42.0), " ".into()]);
        let view = TableView::new(&table);
        let row = view.rows().next().unwrap();

        assert_eq!(extract_identifier(&row, Some(0)), "42");
        assert_eq!(extract_identifier(&row, None), "");
        assert_eq!(extract_quantity(&row, Some(1)), None);
    }
}
