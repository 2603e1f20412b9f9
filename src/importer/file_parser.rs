// ==========================================
// 商品目录馈送生成器 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls/.ods) / CSV (.csv)
// 说明: Excel 数值单元格保持数值,CSV 单元格一律为文本
// ==========================================

use crate::domain::table::{CellValue, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// 检查文件存在
fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 根据首行猜测分隔符（本地化 Excel 常导出分号分隔）
    fn sniff_delimiter(bytes: &[u8]) -> u8 {
        let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or(&[]);
        let commas = first_line.iter().filter(|b| **b == b',').count();
        let semicolons = first_line.iter().filter(|b| **b == b';').count();
        if semicolons > commas {
            b';'
        } else {
            b','
        }
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut bytes = Vec::new();
        File::open(file_path)?.read_to_end(&mut bytes)?;
        self.parse_bytes(&bytes)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .delimiter(Self::sniff_delimiter(bytes))
            .from_reader(bytes);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MalformedInputTable(
                "CSV 文件缺少表头".to_string(),
            ));
        }

        let mut table = RawTable::new(headers);
        for result in reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record.iter().map(CellValue::from).collect();

            // 跳过完全空白的行
            if row.iter().all(CellValue::is_blank) {
                continue;
            }
            table.push_row(row);
        }

        debug!(rows = table.len(), "CSV 解析完成");
        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::from(s.as_str()),
            other => CellValue::from(other.to_string()),
        }
    }

    /// 第一个工作表 → RawTable
    fn range_to_table(range: &Range<Data>) -> ImportResult<RawTable> {
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::MalformedInputTable("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MalformedInputTable(
                "Excel 首行没有表头".to_string(),
            ));
        }

        let mut table = RawTable::new(headers);
        for data_row in rows {
            let row: Vec<CellValue> = data_row.iter().map(Self::cell_value).collect();

            // 跳过完全空白的行
            if row.iter().all(CellValue::is_blank) {
                continue;
            }
            table.push_row(row);
        }

        Ok(table)
    }

    fn first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> ImportResult<RawTable> {
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::MalformedInputTable("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let table = Self::range_to_table(&range)?;
        debug!(sheet = %sheet_name, rows = table.len(), "Excel 解析完成");
        Ok(table)
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !matches!(ext.as_str(), "xlsx" | "xls" | "xlsm" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| ImportError::MalformedInputTable(e.to_string()))?;
        Self::first_sheet(&mut workbook)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| ImportError::MalformedInputTable(e.to_string()))?;
        Self::first_sheet(&mut workbook)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    fn parser_for(ext: &str) -> ImportResult<Box<dyn FileParser>> {
        match ext {
            "csv" => Ok(Box::new(CsvParser)),
            "xlsx" | "xls" | "xlsm" | "ods" => Ok(Box::new(ExcelParser)),
            _ => Err(ImportError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        Self::parser_for(&extension_of(path))?.parse_to_raw_table(path)
    }

    /// 解析上传内容，按原始文件名的扩展名选择解析器
    pub fn parse_upload(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        Self::parser_for(&extension_of(Path::new(file_name)))?.parse_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file("Код,Назва,Ціна\nA1,Комплект,\"19,99\"\nA2,Подушка,250\n");

        let records = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records.headers(), &["Код", "Назва", "Ціна"]);
        assert_eq!(records.rows()[0][2], CellValue::from("19,99"));
    }

    #[test]
    fn test_csv_parser_semicolon_delimiter() {
        let records = CsvParser
            .parse_bytes("код;назва\nA1;Ковдра\n".as_bytes())
            .unwrap();

        assert_eq!(records.headers(), &["код", "назва"]);
        assert_eq!(records.rows()[0][1], CellValue::from("Ковдра"));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file("код,назва\nA1,x\n,\nA2,y\n");

        let records = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_parser_empty_input_is_malformed() {
        let result = CsvParser.parse_bytes(b"");
        assert!(matches!(result, Err(ImportError::MalformedInputTable(_))));
    }

    #[test]
    fn test_excel_parser_garbage_is_malformed() {
        let result = ExcelParser.parse_bytes(b"definitely not a workbook");
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse_upload("catalog.pdf", b"%PDF");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "pdf"));
    }
}
