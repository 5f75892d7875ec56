use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use transline_core::{run, write_json_report, Config, ConsoleReporter, LintFailure, LintOptions, Reporter, RunOutcome};

mod staging;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "transline", version, about = "检查模板中被拆成多行的翻译字符串")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描目录，报告（并可修复）跨行的 `_("...")`
    Check {
        /// 扫描根目录
        #[arg(default_value = ".")]
        root: PathBuf,

        /// 发现问题时自动合并为单行
        #[arg(long)]
        fix: bool,

        /// pre-push 钩子模式：隐含 --fix，并用 `git add` 暂存修复过的文件
        #[arg(long)]
        prepush: bool,

        /// 配置文件路径（TOML），默认读取 <root>/transline.toml（若存在）
        #[arg(long)]
        config: Option<PathBuf>,

        /// 覆盖配置中的文件扩展名
        #[arg(long)]
        ext: Option<String>,

        /// 追加排除的目录名（可多次指定）
        #[arg(long)]
        exclude: Vec<String>,

        /// 最大扫描文件大小（单位字节）
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 修复轮数上限
        #[arg(long, default_value_t = transline_core::DEFAULT_MAX_FIX_PASSES)]
        max_passes: usize,

        /// 线程数（"auto"=CPU 核心数）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 将首轮命中项写为 JSON 数组
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { root, fix, prepush, config, ext, exclude, max_file_size, max_passes, threads, json } => {
            info!(?root, fix, prepush, "starting check");

            let mut cfg = Config::resolve(config.as_deref(), &root).context("load config")?;
            if let Some(ext) = ext {
                cfg.extension = ext.trim_start_matches('.').to_string();
            }
            cfg.exclude.extend(exclude);
            if max_file_size.is_some() {
                cfg.max_file_size = max_file_size;
            }
            let source = cfg.file_source(&root);

            let reporter = ConsoleReporter;
            if prepush {
                reporter.info("Running translation strings test (pre-push hook)...\n");
            } else {
                reporter.info("Checking for multi-line translation strings...\n");
            }

            let opts = LintOptions { fix: fix || prepush, max_fix_passes: max_passes, threads: parse_threads(&threads) };
            let report = run(&source, &reporter, &opts).context("check failed")?;

            if let Some(path) = json {
                let mut out = BufWriter::new(File::create(&path).context("create json report")?);
                write_json_report(&report.findings, &mut out).context("write json report")?;
                out.flush().context("flush json report")?;
            }

            if prepush && !report.fixed_files.is_empty() {
                match staging::stage_files(&report.fixed_files) {
                    Ok(()) => reporter.info("Staged fixed files for commit.\n"),
                    Err(err) => {
                        warn!(error = %err, "git add failed");
                        reporter.warn("Could not stage files automatically. Please stage them manually.\n");
                    }
                }
            }

            info!(
                files_scanned = report.stats.files_scanned,
                findings = report.stats.findings_total,
                files_fixed = report.stats.files_fixed,
                "check finished"
            );

            match report.outcome {
                RunOutcome::Clean | RunOutcome::Fixed => Ok(ExitCode::SUCCESS),
                RunOutcome::Failed(failure) => {
                    if matches!(failure, LintFailure::Detected { .. }) {
                        reporter.error("Or run with --fix flag to auto-fix: transline check --fix");
                    }
                    warn!(%failure, "check failed");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug；日志写 stderr，stdout 留给报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(std::io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thread_counts() {
        assert_eq!(parse_threads("auto"), None);
        assert_eq!(parse_threads("AUTO"), None);
        assert_eq!(parse_threads("4"), Some(4));
        assert_eq!(parse_threads("0"), None);
        assert_eq!(parse_threads("many"), None);
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
