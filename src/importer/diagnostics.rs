// ==========================================
// 商品目录馈送生成器 - 行级诊断
// ==========================================
// 职责: 收集可恢复的行级问题,逐条写入诊断日志
// 红线: 行级问题只降级该行字段,不中断整批
// ==========================================

use crate::domain::types::TableRole;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// 行级（非致命）问题
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowIssue {
    #[error("价格无法解析 ({table} 行 {row}, 列 {column}): {value}")]
    UnparseablePrice {
        table: TableRole,
        row: usize,
        column: String,
        value: String,
    },

    #[error("商品编码为空 ({table} 行 {row})，该行不会输出")]
    EmptyIdentifier { table: TableRole, row: usize },

    #[error("未找到字段列 ({table}, 字段 {field})，该字段按空值处理")]
    MissingColumn { table: TableRole, field: String },

    #[error("数量不是数值 ({table} 行 {row}): {value}")]
    NonNumericQuantity {
        table: TableRole,
        row: usize,
        value: String,
    },
}

impl RowIssue {
    pub fn kind(&self) -> &'static str {
        match self {
            RowIssue::UnparseablePrice { .. } => "unparseable_price",
            RowIssue::EmptyIdentifier { .. } => "empty_identifier",
            RowIssue::MissingColumn { .. } => "missing_column",
            RowIssue::NonNumericQuantity { .. } => "non_numeric_quantity",
        }
    }
}

// ==========================================
// DiagnosticLog - 单次运行的诊断收集器
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticLog {
    issues: Vec<RowIssue>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录问题并写入日志
    pub fn record(&mut self, issue: RowIssue) {
        warn!(kind = issue.kind(), "{}", issue);
        self.issues.push(issue);
    }

    pub fn extend<I: IntoIterator<Item = RowIssue>>(&mut self, issues: I) {
        for issue in issues {
            self.record(issue);
        }
    }

    pub fn issues(&self) -> &[RowIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count_of(&self, kind: &str) -> usize {
        self.issues.iter().filter(|i| i.kind() == kind).count()
    }

    pub fn into_issues(self) -> Vec<RowIssue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let mut log = DiagnosticLog::new();
        log.record(RowIssue::EmptyIdentifier {
            table: TableRole::Base,
            row: 3,
        });
        log.extend(vec![RowIssue::UnparseablePrice {
            table: TableRole::Base,
            row: 4,
            column: "price".to_string(),
            value: "abc".to_string(),
        }]);

        assert_eq!(log.len(), 2);
        assert_eq!(log.count_of("empty_identifier"), 1);
        assert_eq!(log.count_of("unparseable_price"), 1);
    }

    #[test]
    fn test_issue_serializes_with_kind_tag() {
        let issue = RowIssue::MissingColumn {
            table: TableRole::Translation,
            field: "name".to_string(),
        };
        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(json["kind"], "missing_column");
        assert_eq!(json["table"], "translation");
        assert_eq!(json["field"], "name");
    }
}
