//! pre-push 模式下暂存修复过的文件（尽力而为）
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// 逐个执行 `git add <file>`；任一失败即返回错误，由调用方降级为警告
pub(crate) fn stage_files(files: &[PathBuf]) -> Result<()> {
    for file in files {
        let status = Command::new("git")
            .arg("add")
            .arg(file)
            .status()
            .context("spawn git")?;
        if !status.success() {
            bail!("git add {} exited with {status}", file.display());
        }
    }
    Ok(())
}
