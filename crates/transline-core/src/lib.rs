//! 跨行翻译字符串检查库
//!
//! 设计要点：
//! - 在模板文件中查找被拆到多行的 `_("...")` / `_('...')` 翻译调用。
//! - 仅做字面量子串匹配，不解析模板语言，不处理转义或嵌套引号。
//! - 自动修复把跨度合并为一行，保留跨度前后的非字符串内容；修复后重新扫描验证收敛。
//! - 文件发现与报告输出均为可注入接口，核心扫描/改写逻辑不依赖它们。

mod config;
mod detectors;
mod discovery;
mod error;
mod findings;
mod options;
mod report;
mod rewriter;
mod scan;
mod scanner;
mod source;
mod types;

pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use discovery::{ExcludeDirs, FileSource, WalkDirSource, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSION};
pub use error::LintFailure;
pub use findings::{Finding, Quote};
pub use options::{LintOptions, RunStats, DEFAULT_MAX_FIX_PASSES};
pub use report::{report_findings, ConsoleReporter, Level, MemoryReporter, Reporter, EXAMPLE_HINT};
pub use rewriter::{fix_file, rewrite, RewriteOutcome};
pub use scan::{run, RunOutcome, RunReport};
pub use scanner::{scan_file, scan_source, scan_text, Scanner, LOOKAHEAD_LINES};
pub use source::SourceText;
pub use types::{write_json_report, OutputItem};
