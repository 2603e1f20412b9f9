// ==========================================
// 商品目录馈送生成器 - 命令行入口
// ==========================================
// 子命令: generate / validate / preview / photos / prices / log
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use prom_feed::config::{config_keys, ConfigManager};
use prom_feed::domain::{DuplicatePolicy, ExportFormat, PricePolicy, RawTable};
use prom_feed::engine::{inspect, load_table, ExportOptions, FeedError, FeedPipeline};
use prom_feed::exporter::{TabularExport, CATALOG_DATE_FORMAT};
use prom_feed::{app, logging};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// 双语商品表 → Prom 导入文件
#[derive(Parser)]
#[command(name = "prom-feed", version, about = "Merge bilingual product sheets into a Prom feed.")]
struct Cli {
    /// JSON 配置文件
    #[arg(long, env = "PROM_FEED_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// 日志追加写入配置中的日志文件（默认输出到 stderr）
    #[arg(long, global = true)]
    log_to_file: bool,

    /// 日志文件使用 JSON 行格式
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

/// 两张输入表
#[derive(clap::Args)]
struct PairArgs {
    /// 基础语言表（决定输出哪些商品）
    #[arg(long)]
    base: PathBuf,

    /// 翻译语言表
    #[arg(long)]
    translation: PathBuf,

    /// 输出文件（默认 stdout；generate 时无扩展名则按格式补全）
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// 合并并生成馈送文件
    Generate {
        #[command(flatten)]
        pair: PairArgs,

        /// tabular（CSV 表格）或 tree（YML）
        #[arg(short, long, default_value = "tabular")]
        format: ExportFormat,

        /// 逗号分隔的关键词
        #[arg(short, long)]
        keywords: Option<String>,

        /// 目录日期 "YYYY-MM-DD HH:MM" 或 now（仅 tree）
        #[arg(long)]
        date: Option<String>,

        /// 特征列组数量（10 / 15 / 20）
        #[arg(long)]
        max_attributes: Option<usize>,

        #[arg(long)]
        price_policy: Option<PricePolicy>,

        #[arg(long)]
        duplicate_policy: Option<DuplicatePolicy>,

        /// 运行报告（JSON）输出路径
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// 检查 id / name / price 列是否可识别
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// 预览前几行
    Preview {
        file: PathBuf,

        #[arg(short, long)]
        rows: Option<usize>,
    },

    /// 只导出编码与图片
    Photos {
        #[command(flatten)]
        pair: PairArgs,
    },

    /// 只导出编码与价格
    Prices {
        #[command(flatten)]
        pair: PairArgs,
    },

    /// 查看日志文件末尾
    Log {
        #[arg(long, default_value_t = 2000)]
        bytes: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{:#}", err);
        eprintln!("错误: {:#}", err);
        if let Some(feed_err) = err.downcast_ref::<FeedError>() {
            if feed_err.is_user_rejection() {
                eprintln!("本次上传已被拒绝，请检查文件内容与表头后重新上传");
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ConfigManager::from_json_file(path)
            .with_context(|| format!("读取配置失败: {}", path.display()))?,
        None => ConfigManager::new(),
    };

    // 命令行参数覆盖配置文件
    if let Command::Generate {
        max_attributes,
        price_policy,
        duplicate_policy,
        ..
    } = &cli.command
    {
        if let Some(n) = max_attributes {
            config.set(config_keys::MAX_ATTRIBUTES, n.to_string());
        }
        if let Some(policy) = price_policy {
            config.set(config_keys::PRICE_POLICY, policy.to_string());
        }
        if let Some(policy) = duplicate_policy {
            config.set(config_keys::DUPLICATE_POLICY, policy.to_string());
        }
    }

    let pipeline = FeedPipeline::from_config(&config).context("配置值无效")?;
    let settings = pipeline.settings().clone();

    if cli.log_to_file {
        logging::init_with_log_file(&settings.log_file, cli.json_log)
            .with_context(|| format!("无法打开日志文件: {}", settings.log_file))?;
    } else {
        logging::init();
    }
    info!(version = prom_feed::VERSION, "{}", prom_feed::APP_NAME);

    match cli.command {
        Command::Generate {
            pair,
            format,
            keywords,
            date,
            report,
            ..
        } => {
            let (base, translation) = load_pair(&pair)?;

            let mut options = ExportOptions::new(format)
                .with_keywords(keywords.as_deref().map(app::parse_keywords).unwrap_or_default());
            if let Some(date) = date.as_deref() {
                options = options.with_catalog_date(parse_catalog_date(date)?);
            }

            let output = pipeline.generate(&base, &translation, &options)?;
            let out = pair.out.map(|path| {
                if path.extension().is_none() {
                    path.with_extension(output.artifact.file_extension())
                } else {
                    path
                }
            });
            write_output(out.as_deref(), |w| Ok(output.artifact.write_to(w)?))?;

            if let Some(path) = report {
                std::fs::write(&path, output.report.to_json()?)
                    .with_context(|| format!("写入报告失败: {}", path.display()))?;
            }
            eprintln!(
                "已输出 {} 条商品（跳过空编码 {} 条，问题 {} 条）",
                output.report.emitted,
                output.report.skipped_empty_id,
                output.report.issues.len()
            );
        }

        Command::Validate { files } => {
            let mut all_ok = true;
            for path in &files {
                let table = load_table(path)
                    .with_context(|| format!("无法读取: {}", path.display()))?;
                let report = inspect::validate_columns(&table);
                if report.is_complete() {
                    println!("{}: 所有必需列均存在", path.display());
                } else {
                    all_ok = false;
                    println!("{}: 缺少列 {:?}", path.display(), report.missing());
                }
            }
            if !all_ok {
                bail!("存在缺失列，请检查表头");
            }
        }

        Command::Preview { file, rows } => {
            let table =
                load_table(&file).with_context(|| format!("无法读取: {}", file.display()))?;
            let head = inspect::preview(&table, rows.unwrap_or(settings.preview_rows));
            write_table(None, &head)?;
            println!("共 {} 行", inspect::count_rows(std::slice::from_ref(&table)));
        }

        Command::Photos { pair } => {
            let (base, translation) = load_pair(&pair)?;
            let (merged, _) = pipeline.merge(&base, &translation)?;
            write_table(pair.out.as_deref(), &inspect::photo_sheet(&merged, settings.max_photos))?;
        }

        Command::Prices { pair } => {
            let (base, translation) = load_pair(&pair)?;
            let (merged, _) = pipeline.merge(&base, &translation)?;
            write_table(pair.out.as_deref(), &inspect::price_sheet(&merged))?;
        }

        Command::Log { bytes } => match logging::read_log_tail(&settings.log_file, bytes)? {
            Some(text) => print!("{}", text),
            None => println!("日志文件为空: {}", settings.log_file),
        },
    }

    Ok(())
}

fn load_pair(pair: &PairArgs) -> Result<(RawTable, RawTable)> {
    let base = load_table(&pair.base)
        .with_context(|| format!("无法读取基础表: {}", pair.base.display()))?;
    let translation = load_table(&pair.translation)
        .with_context(|| format!("无法读取翻译表: {}", pair.translation.display()))?;
    info!(
        base_rows = base.len(),
        translation_rows = translation.len(),
        "输入表已加载"
    );
    Ok((base, translation))
}

fn parse_catalog_date(text: &str) -> Result<NaiveDateTime> {
    if text.eq_ignore_ascii_case("now") {
        return Ok(chrono::Local::now().naive_local());
    }
    NaiveDateTime::parse_from_str(text, CATALOG_DATE_FORMAT)
        .with_context(|| format!("日期格式应为 YYYY-MM-DD HH:MM: {}", text))
}

fn write_table(out: Option<&Path>, table: &TabularExport) -> Result<()> {
    write_output(out, |w| Ok(table.write_csv(w)?))
}

fn write_output<F>(out: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    match out {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("无法创建输出文件: {}", path.display()))?;
            write(&mut file)?;
            info!(path = %path.display(), "输出已写入");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write(&mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}
