// ==========================================
// 商品目录馈送生成器 - 列解析器
// ==========================================
// 职责: 表头规范化 + 按别名表顺序查找第一个存在的列
// 红线: 仅做精确匹配（忽略大小写与首尾空白）,不做模糊匹配
// ==========================================

use crate::config::field_aliases::CanonicalField;
use crate::domain::table::{CellValue, RawTable};
use std::collections::HashMap;

/// 表头规范化: 去首尾空白 + 小写
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

// ==========================================
// HeaderIndex - 规范化表头 → 列下标
// ==========================================
// 规范化后重名的列，保留最左侧一列
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn from_headers(headers: &[String]) -> Self {
        let mut columns = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let normalized = normalize_header(header);
            if normalized.is_empty() {
                continue;
            }
            columns.entry(normalized).or_insert(idx);
        }
        Self { columns }
    }

    pub fn position(&self, normalized: &str) -> Option<usize> {
        self.columns.get(normalized).copied()
    }

    /// 返回别名表中第一个存在的别名及其列下标
    ///
    /// # 返回
    /// - Some((alias, index)): 按别名表声明顺序（而非表头顺序）的第一个命中
    /// - None: 没有任何别名存在
    pub fn resolve<'a>(&self, aliases: &[&'a str]) -> Option<(&'a str, usize)> {
        aliases
            .iter()
            .find_map(|alias| self.position(alias).map(|idx| (*alias, idx)))
    }
}

/// 列解析契约: 第一个存在于表头中的别名
pub fn resolve_column<'a>(index: &HeaderIndex, aliases: &[&'a str]) -> Option<&'a str> {
    index.resolve(aliases).map(|(alias, _)| alias)
}

// ==========================================
// TableView - 带表头索引的只读视图
// ==========================================
pub struct TableView<'t> {
    table: &'t RawTable,
    index: HeaderIndex,
}

impl<'t> TableView<'t> {
    pub fn new(table: &'t RawTable) -> Self {
        Self {
            index: HeaderIndex::from_headers(table.headers()),
            table,
        }
    }

    pub fn index(&self) -> &HeaderIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 规范字段对应的列
    pub fn resolve_field(&self, field: CanonicalField) -> Option<(&'static str, usize)> {
        self.index.resolve(field.aliases())
    }

    /// 逐行视图（行号从 1 开始，不含表头）
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        self.table
            .rows()
            .iter()
            .enumerate()
            .map(move |(idx, cells)| RowView {
                cells,
                index: &self.index,
                row_number: idx + 1,
            })
    }
}

// ==========================================
// RowView - 单行视图（按规范化表头取值）
// ==========================================
#[derive(Clone, Copy)]
pub struct RowView<'a> {
    cells: &'a [CellValue],
    index: &'a HeaderIndex,
    row_number: usize,
}

impl<'a> RowView<'a> {
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn cell_at(&self, idx: usize) -> Option<&'a CellValue> {
        self.cells.get(idx)
    }

    /// 按规范化列名取值；列不存在返回 None
    pub fn get(&self, normalized: &str) -> Option<&'a CellValue> {
        self.index.position(normalized).and_then(|idx| self.cell_at(idx))
    }

    /// 列存在且去空白后非空时返回文本
    pub fn text(&self, normalized: &str) -> Option<String> {
        self.get(normalized).and_then(CellValue::trimmed_text)
    }
}
