// ==========================================
// 商品目录馈送生成器 - 上传会话
// ==========================================
// 职责: 每个用户一份显式会话（格式 / 已上传表 / 关键词）
// 红线: 一次最多累积两张表（基础 + 翻译）; 取走后才能开始下一对
// 说明: 仅内存保存,不做持久化
// ==========================================

use crate::domain::table::RawTable;
use crate::domain::types::ExportFormat;
use crate::engine::pipeline::ExportOptions;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// 一对表的大小
pub const PAIR_SIZE: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("尚未选择导出格式")]
    FormatNotSelected,

    #[error("已有两张表等待处理，请先生成或清空")]
    PairAlreadyComplete,
}

/// 上传进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadProgress {
    AwaitingSecond,
    PairReady,
}

// ==========================================
// UploadSession - 单用户会话
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    format: Option<ExportFormat>,
    tables: Vec<RawTable>,
    keywords: Vec<String>,
    awaiting_keywords: bool,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(&self) -> Option<ExportFormat> {
        self.format
    }

    /// 选择格式; 已上传的表作废，关键词保留
    pub fn select_format(&mut self, format: ExportFormat) {
        self.format = Some(format);
        self.tables.clear();
    }

    pub fn tables(&self) -> &[RawTable] {
        &self.tables
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_awaiting_keywords(&self) -> bool {
        self.awaiting_keywords
    }

    /// 追加一张表（第一张为基础表，第二张为翻译表）
    pub fn add_table(&mut self, table: RawTable) -> Result<UploadProgress, SessionError> {
        if self.format.is_none() {
            return Err(SessionError::FormatNotSelected);
        }
        if self.tables.len() >= PAIR_SIZE {
            return Err(SessionError::PairAlreadyComplete);
        }

        self.tables.push(table);
        debug!(tables = self.tables.len(), "会话收到表格");

        if self.tables.len() == PAIR_SIZE {
            Ok(UploadProgress::PairReady)
        } else {
            Ok(UploadProgress::AwaitingSecond)
        }
    }

    /// 进入关键词输入状态
    pub fn begin_keyword_entry(&mut self) {
        self.awaiting_keywords = true;
    }

    /// 解析逗号分隔的关键词（去空白、丢弃空项），替换已有关键词
    pub fn set_keywords_from_text(&mut self, text: &str) -> usize {
        self.keywords = parse_keywords(text);
        self.awaiting_keywords = false;
        self.keywords.len()
    }

    /// 取走已完成的一对表（基础, 翻译）; 不足两张时返回 None
    pub fn take_pair(&mut self) -> Option<(RawTable, RawTable)> {
        if self.tables.len() < PAIR_SIZE {
            return None;
        }
        let mut drained = self.tables.drain(..PAIR_SIZE);
        let base = drained.next()?;
        let translation = drained.next()?;
        Some((base, translation))
    }

    /// 当前会话对应的导出选项
    pub fn export_options(&self) -> Option<ExportOptions> {
        self.format
            .map(|format| ExportOptions::new(format).with_keywords(self.keywords.clone()))
    }

    /// 清空表与关键词（保留格式）
    pub fn clear(&mut self) {
        self.tables.clear();
        self.keywords.clear();
        self.awaiting_keywords = false;
    }

    /// 完全重置（包括格式）
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 关键词解析: 逗号拆分 + 去空白 + 丢弃空项
pub fn parse_keywords(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

// ==========================================
// SessionStore - 按用户保存会话
// ==========================================
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<u64, UploadSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取会话，不存在时创建
    pub fn ensure(&mut self, user_id: u64) -> &mut UploadSession {
        self.sessions.entry(user_id).or_insert_with(|| {
            info!(user_id, "创建上传会话");
            UploadSession::new()
        })
    }

    pub fn get(&self, user_id: u64) -> Option<&UploadSession> {
        self.sessions.get(&user_id)
    }

    /// 清空会话内容（会话本身保留）
    pub fn clear(&mut self, user_id: u64) {
        if let Some(session) = self.sessions.get_mut(&user_id) {
            session.clear();
        }
    }

    pub fn remove(&mut self, user_id: u64) -> Option<UploadSession> {
        self.sessions.remove(&user_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: &str) -> RawTable {
        RawTable::with_rows(["код"], vec![vec![id.into()]])
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_keywords(" плед, , ковдра ,"), vec!["плед", "ковдра"]);
        assert!(parse_keywords("  ").is_empty());
    }

    #[test]
    fn test_add_requires_format() {
        let mut session = UploadSession::new();
        assert_eq!(session.add_table(table("1")), Err(SessionError::FormatNotSelected));
    }

    #[test]
    fn test_pair_lifecycle() {
        let mut session = UploadSession::new();
        session.select_format(ExportFormat::Tree);

        assert_eq!(session.add_table(table("1")), Ok(UploadProgress::AwaitingSecond));
        assert!(session.take_pair().is_none());
        assert_eq!(session.add_table(table("2")), Ok(UploadProgress::PairReady));
        assert_eq!(session.add_table(table("3")), Err(SessionError::PairAlreadyComplete));

        let (base, translation) = session.take_pair().unwrap();
        assert_eq!(base.rows()[0][0].to_text(), "1");
        assert_eq!(translation.rows()[0][0].to_text(), "2");
        assert!(session.tables().is_empty());
        assert_eq!(session.add_table(table("3")), Ok(UploadProgress::AwaitingSecond));
    }

    #[test]
    fn test_select_format_discards_tables_keeps_keywords() {
        let mut session = UploadSession::new();
        session.select_format(ExportFormat::Tabular);
        session.set_keywords_from_text("a, b");
        session.add_table(table("1")).unwrap();

        session.select_format(ExportFormat::Tree);
        assert!(session.tables().is_empty());
        assert_eq!(session.keywords(), ["a", "b"]);

        let options = session.export_options().unwrap();
        assert_eq!(options.format, ExportFormat::Tree);
        assert_eq!(options.keywords, vec!["a", "b"]);
    }

    #[test]
    fn test_store_lifecycle() {
        let mut store = SessionStore::new();
        store.ensure(7).select_format(ExportFormat::Tabular);
        store.ensure(7).set_keywords_from_text("x");
        assert_eq!(store.len(), 1);

        store.clear(7);
        let session = store.get(7).unwrap();
        assert!(session.keywords().is_empty());
        assert_eq!(session.format(), Some(ExportFormat::Tabular));

        assert!(store.remove(7).is_some());
        assert!(store.is_empty());
    }
}
