//! 检查主流程：发现 → 扫描 → 报告 → （可选）修复并重新扫描
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::discovery::FileSource;
use crate::error::LintFailure;
use crate::findings::{sort_findings_stable, Finding};
use crate::options::{LintOptions, RunStats};
use crate::report::{report_findings, Reporter, EXAMPLE_HINT};
use crate::rewriter::fix_file;
use crate::scanner::scan_file;

/// 一次运行的最终结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 没有跨行翻译字符串
    Clean,
    /// 存在命中项，已全部自动修复
    Fixed,
    Failed(LintFailure),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, RunOutcome::Failed(_))
    }
}

/// 运行结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub stats: RunStats,
    /// 首轮扫描的命中项（已排序）
    pub findings: Vec<Finding>,
    /// 被改写过的文件（按路径排序）
    pub fixed_files: Vec<PathBuf>,
}

/// 单轮扫描结果
struct ScanPass {
    files_scanned: usize,
    findings: Vec<Finding>,
}

/// 执行一次完整检查
/// - 未开启修复：有命中即失败
/// - 开启修复：最多 `max_fix_passes` 轮“修复 → 重新发现并扫描”；
///   某轮没有改动任何文件，或轮数用尽仍有残留，判定为无法修复
/// 单个文件的读写错误只记录日志并跳过，不中断整体运行
pub fn run(source: &dyn FileSource, reporter: &dyn Reporter, opts: &LintOptions) -> Result<RunReport> {
    let threads = opts.threads.unwrap_or_else(num_cpus::get);

    let first = scan_files(&source.files()?, threads)?;
    let mut stats = RunStats {
        files_scanned: first.files_scanned,
        findings_total: first.findings.len(),
        ..RunStats::default()
    };
    info!(files_scanned = stats.files_scanned, findings = stats.findings_total, "scan finished");

    let initial = first.findings;
    if initial.is_empty() {
        reporter.info("All translation strings are on single lines!");
        return Ok(RunReport { outcome: RunOutcome::Clean, stats, findings: initial, fixed_files: Vec::new() });
    }
    report_findings(reporter, &initial);

    if !opts.fix {
        reporter.error("Please fix these translation strings to be on a single line.");
        reporter.error(EXAMPLE_HINT);
        let outcome = RunOutcome::Failed(LintFailure::Detected { count: initial.len() });
        return Ok(RunReport { outcome, stats, findings: initial, fixed_files: Vec::new() });
    }

    reporter.info("Attempting to auto-fix...\n");
    let mut fixed: BTreeSet<PathBuf> = BTreeSet::new();
    let mut remaining = initial.clone();

    for pass in 1..=opts.max_fix_passes.max(1) {
        stats.passes = pass;
        let changed = fix_findings(&remaining, reporter);
        if changed.is_empty() {
            debug!(pass, "fix pass changed no file");
            break;
        }
        reporter.info(&format!("\nAuto-fixed {} file(s). Re-running check...\n", changed.len()));
        fixed.extend(changed);

        remaining = scan_files(&source.files()?, threads)?.findings;
        if remaining.is_empty() {
            reporter.info("All translation strings are on single lines!");
            stats.files_fixed = fixed.len();
            return Ok(RunReport {
                outcome: RunOutcome::Fixed,
                stats,
                findings: initial,
                fixed_files: fixed.into_iter().collect(),
            });
        }
        report_findings(reporter, &remaining);
    }

    reporter.error("Could not auto-fix all errors. Please fix manually.");
    reporter.error(EXAMPLE_HINT);
    stats.files_fixed = fixed.len();
    Ok(RunReport {
        outcome: RunOutcome::Failed(LintFailure::UnfixableResidue { remaining: remaining.len() }),
        stats,
        findings: initial,
        fixed_files: fixed.into_iter().collect(),
    })
}

/// 按文件分组改写，返回实际改动过的文件
fn fix_findings(findings: &[Finding], reporter: &dyn Reporter) -> Vec<PathBuf> {
    let mut by_file: BTreeMap<&Path, Vec<Finding>> = BTreeMap::new();
    for f in findings {
        by_file.entry(f.file.as_path()).or_default().push(f.clone());
    }

    let mut changed = Vec::new();
    for (file, group) in by_file {
        match fix_file(file, &group) {
            Ok(true) => {
                reporter.info(&format!("Fixed: {}", file.display()));
                changed.push(file.to_path_buf());
            }
            Ok(false) => debug!(file = %file.display(), "nothing to rewrite"),
            Err(err) => warn!(file = %file.display(), error = %err, "fix failed, skipping file"),
        }
    }
    changed
}

/// 扫描文件列表；线程数 > 1 时使用 Rayon 线程池并行，结果顺序与输入一致
fn scan_files(files: &[PathBuf], threads: usize) -> Result<ScanPass> {
    let results: Vec<Result<Vec<Finding>>> = if threads > 1 {
        use rayon::prelude::*;
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        pool.install(|| files.par_iter().map(|p| scan_file(p)).collect())
    } else {
        files.iter().map(|p| scan_file(p)).collect()
    };

    let mut pass = ScanPass { files_scanned: 0, findings: Vec::new() };
    for (path, res) in files.iter().zip(results) {
        match res {
            Ok(found) => {
                pass.files_scanned += 1;
                pass.findings.extend(found);
            }
            Err(err) => warn!(file = %path.display(), error = %err, "scan failed, skipping file"),
        }
    }
    sort_findings_stable(&mut pass.findings);
    Ok(pass)
}
