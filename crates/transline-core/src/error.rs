//! 致命的检查结果
use thiserror::Error;

/// 导致非零退出码的两种情况
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintFailure {
    /// 存在跨行翻译字符串且未开启自动修复
    #[error("found {count} multi-line translation string(s)")]
    Detected { count: usize },
    /// 自动修复后仍有残留
    #[error("could not auto-fix all errors, {remaining} multi-line translation string(s) remain")]
    UnfixableResidue { remaining: usize },
}
