//! 源文本（按行切分）与整文件读写
use anyhow::{Context, Result};
use std::path::Path;

/// 按 `\n` 切分后的行序列
/// - 末尾换行会产生一个空的末行，`to_text` 拼回时原样还原
/// - 对外暴露的行号一律从 1 开始
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub(crate) lines: Vec<String>,
}

impl SourceText {
    pub fn parse(content: &str) -> Self {
        Self { lines: content.split('\n').map(str::to_string).collect() }
    }

    /// 整文件读取
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    /// 整文件写回
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text()).with_context(|| format!("write {}", path.display()))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}
