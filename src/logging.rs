// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// 支持追加写入单一日志文件（多次运行交错写入）
// ==========================================

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化日志系统（输出到 stderr）
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=prom_feed=trace
///
/// # 示例
/// ```no_run
/// use prom_feed::logging;
/// logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 初始化日志系统（追加写入文件）
///
/// # 参数
/// - path: 日志文件路径（不存在时创建）
/// - json: 是否输出 JSON 行
pub fn init_with_log_file<P: AsRef<Path>>(path: P, json: bool) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    let writer = Mutex::new(file);

    let result = if json {
        fmt()
            .json()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .with_target(true)
            .try_init()
    } else {
        fmt()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .try_init()
    };

    result.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// 读取日志文件末尾（最多 max_bytes 字节，按字符边界对齐）
///
/// 文件不存在时返回 Ok(None)
pub fn read_log_tail<P: AsRef<Path>>(path: P, max_bytes: u64) -> io::Result<Option<String>> {
    let mut file = match File::open(path.as_ref()) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let len = file.metadata()?.len();
    let start = len.saturating_sub(max_bytes);
    file.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;

    // 截断处可能落在多字节字符中间: 跳过开头的 UTF-8 续字节
    let skip = if start > 0 {
        buf.iter().take_while(|b| **b & 0xC0 == 0x80).count()
    } else {
        0
    };
    Ok(Some(String::from_utf8_lossy(&buf[skip..]).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_log_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.log");
        assert!(read_log_tail(&path, 100).unwrap().is_none());

        let mut file = File::create(&path).unwrap();
        write!(file, "line one\nline two\n").unwrap();

        assert_eq!(read_log_tail(&path, 9).unwrap().as_deref(), Some("line two\n"));
        assert_eq!(
            read_log_tail(&path, 1000).unwrap().as_deref(),
            Some("line one\nline two\n")
        );
    }

    #[test]
    fn test_read_log_tail_multibyte_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.log");
        std::fs::write(&path, "ковдра").unwrap();

        // 5 字节从“д”的第二个字节开始
        let tail = read_log_tail(&path, 5).unwrap().unwrap();
        assert_eq!(tail, "ра");
    }

    #[test]
    fn test_read_log_tail_keeps_literal_replacement_char() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.log");
        std::fs::write(&path, "x\u{FFFD}ok\n").unwrap();

        // 从文件头读取，以及恰好从字符边界开始
        assert_eq!(
            read_log_tail(&path, 100).unwrap().as_deref(),
            Some("x\u{FFFD}ok\n")
        );
        assert_eq!(
            read_log_tail(&path, 6).unwrap().as_deref(),
            Some("\u{FFFD}ok\n")
        );
        // 从 U+FFFD 的第二个字节开始 → 丢弃残片
        assert_eq!(read_log_tail(&path, 5).unwrap().as_deref(), Some("ok\n"));
    }
}
