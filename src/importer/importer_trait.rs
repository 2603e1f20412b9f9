// ==========================================
// 商品目录馈送生成器 - 导入 Trait
// ==========================================
// 职责: 定义文件解析接口（不包含实现）
// ==========================================

use crate::domain::table::RawTable;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析磁盘文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawTable): 首行为表头,完全空白的行已跳过
    /// - Err: 文件不存在、扩展名不支持、内容不是表格
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;

    /// 解析内存中的上传内容
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable>;
}
