// ==========================================
// 商品目录馈送生成器 - 流水线编排器
// ==========================================
// 流程: 两张原始表 → 列解析/字段提取/合并 → 表格或树形导出
// 红线: 无跨调用的可变状态; 同样输入两次 → 字节级相同输出
// ==========================================

use crate::config::config_manager::FeedSettings;
use crate::config::feed_config_trait::FeedConfigReader;
use crate::domain::product::MergedTable;
use crate::domain::table::RawTable;
use crate::domain::types::ExportFormat;
use crate::engine::error::{FeedError, FeedResult};
use crate::exporter::{TabularExport, TabularExporter, TreeExporter};
use crate::importer::diagnostics::{DiagnosticLog, RowIssue};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::record_merger::RecordMerger;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, instrument, Span};
use uuid::Uuid;

// ==========================================
// ExportOptions - 导出选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub keywords: Vec<String>,                // 关键词（可为空）
    pub catalog_date: Option<NaiveDateTime>, // 仅树形导出使用
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            keywords: Vec::new(),
            catalog_date: None,
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_catalog_date(mut self, date: NaiveDateTime) -> Self {
        self.catalog_date = Some(date);
        self
    }
}

// ==========================================
// FeedArtifact - 导出产物
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedArtifact {
    Tabular(TabularExport),
    Tree(String),
}

impl FeedArtifact {
    pub fn format(&self) -> ExportFormat {
        match self {
            FeedArtifact::Tabular(_) => ExportFormat::Tabular,
            FeedArtifact::Tree(_) => ExportFormat::Tree,
        }
    }

    /// 序列化为字节（表格 → CSV，树形 → UTF-8 XML）
    pub fn to_bytes(&self) -> FeedResult<Vec<u8>> {
        match self {
            FeedArtifact::Tabular(export) => export.to_csv_bytes(),
            FeedArtifact::Tree(xml) => Ok(xml.as_bytes().to_vec()),
        }
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> FeedResult<()> {
        match self {
            FeedArtifact::Tabular(export) => export.write_csv(writer),
            FeedArtifact::Tree(xml) => {
                writer.write_all(xml.as_bytes())?;
                Ok(())
            }
        }
    }

    /// 建议的文件扩展名
    pub fn file_extension(&self) -> &'static str {
        match self {
            FeedArtifact::Tabular(_) => "csv",
            FeedArtifact::Tree(_) => "yml",
        }
    }
}

// ==========================================
// PipelineReport - 运行报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub run_id: String,
    pub base_rows: usize,
    pub translation_rows: usize,
    pub merged: usize,
    pub emitted: usize,
    pub skipped_empty_id: usize,
    pub issues: Vec<RowIssue>,
}

impl PipelineReport {
    pub fn to_json(&self) -> FeedResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FeedError::Render(e.to_string()))
    }
}

/// 一次运行的完整输出
#[derive(Debug, Clone)]
pub struct FeedOutput {
    pub artifact: FeedArtifact,
    pub report: PipelineReport,
}

// ==========================================
// 输入表加载
// ==========================================
// 结构性解析失败统一为 MalformedInputTable

/// 按扩展名读取本地文件
pub fn load_table<P: AsRef<Path>>(path: P) -> FeedResult<RawTable> {
    Ok(UniversalFileParser.parse(path)?)
}

/// 读取上传内容（文件名仅用于判断格式）
pub fn load_upload(file_name: &str, bytes: &[u8]) -> FeedResult<RawTable> {
    Ok(UniversalFileParser.parse_upload(file_name, bytes)?)
}

// ==========================================
// FeedPipeline - 流水线
// ==========================================
pub struct FeedPipeline {
    settings: FeedSettings,
}

impl FeedPipeline {
    pub fn new(settings: FeedSettings) -> Self {
        Self { settings }
    }

    /// 从配置读取器构建（配置值无效 → FeedError::Config）
    pub fn from_config<C: FeedConfigReader + ?Sized>(config: &C) -> FeedResult<Self> {
        Ok(Self::new(FeedSettings::from_reader(config)?))
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    /// 合并两张表（不导出）
    ///
    /// # 返回
    /// - Ok: 合并结果与本次诊断
    /// - Err(UnresolvableIdentifierColumn): 任一表缺少编码列
    pub fn merge(
        &self,
        base: &RawTable,
        translation: &RawTable,
    ) -> FeedResult<(MergedTable, DiagnosticLog)> {
        let mut log = DiagnosticLog::new();
        let merged = RecordMerger::new(&self.settings).merge(base, translation, &mut log)?;
        Ok((merged, log))
    }

    /// 执行完整流程
    ///
    /// # 参数
    /// - base: 基础语言表
    /// - translation: 翻译语言表
    /// - options: 导出格式、关键词、目录日期
    ///
    /// # 返回
    /// 导出产物 + 运行报告; 表级问题返回 FeedError
    #[instrument(skip_all, fields(format = %options.format, run_id))]
    pub fn generate(
        &self,
        base: &RawTable,
        translation: &RawTable,
        options: &ExportOptions,
    ) -> FeedResult<FeedOutput> {
        let run_id = Uuid::new_v4().to_string();
        Span::current().record("run_id", run_id.as_str());

        info!(
            base_rows = base.len(),
            translation_rows = translation.len(),
            keywords = options.keywords.len(),
            "开始生成商品馈送"
        );

        // === 步骤 1: 列解析 + 字段提取 + 合并 ===
        let (merged, log) = self.merge(base, translation)?;
        let skipped_empty_id = merged.empty_identifier_count();
        debug!(merged = merged.len(), skipped_empty_id, "合并阶段完成");

        // === 步骤 2: 导出 ===
        let artifact = match options.format {
            ExportFormat::Tabular => FeedArtifact::Tabular(
                TabularExporter::new(&self.settings).export(&merged, &options.keywords),
            ),
            ExportFormat::Tree => FeedArtifact::Tree(TreeExporter::new(&self.settings).export(
                &merged,
                &options.keywords,
                options.catalog_date,
            )?),
        };

        // === 步骤 3: 运行报告 ===
        let emitted = merged.len() - skipped_empty_id;
        let report = PipelineReport {
            run_id,
            base_rows: base.len(),
            translation_rows: translation.len(),
            merged: merged.len(),
            emitted,
            skipped_empty_id,
            issues: log.into_issues(),
        };

        info!(
            emitted = report.emitted,
            skipped_empty_id = report.skipped_empty_id,
            issues = report.issues.len(),
            "商品馈送生成完成"
        );

        Ok(FeedOutput { artifact, report })
    }
}
