//! 检查选项与统计信息（模块）

/// 默认的修复轮数上限（修复 → 重新扫描）
pub const DEFAULT_MAX_FIX_PASSES: usize = 2;

/// 检查选项
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// 发现命中项后是否自动修复
    pub fix: bool,
    /// 修复轮数上限；用尽后仍有残留即判定为无法修复
    pub max_fix_passes: usize,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self { fix: false, max_fix_passes: DEFAULT_MAX_FIX_PASSES, threads: None }
    }
}

/// 运行统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// 首轮扫描的文件数
    pub files_scanned: usize,
    /// 首轮扫描的命中项总数
    pub findings_total: usize,
    /// 被改写的文件数（去重）
    pub files_fixed: usize,
    /// 实际执行的修复轮数
    pub passes: usize,
}
