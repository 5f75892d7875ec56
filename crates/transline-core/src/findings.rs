//! 命中项与排序
use serde::Serialize;
use std::path::PathBuf;

/// 翻译字面量的引号（同一命中项内不混用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(Quote::Double),
            '\'' => Some(Quote::Single),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }

    /// 开标记：`_("` 或 `_('`
    pub fn open_marker(self) -> String {
        format!("_({}", self.as_char())
    }

    /// 闭标记：`")` 或 `')`
    pub fn close_marker(self) -> String {
        format!("{})", self.as_char())
    }
}

/// 一处跨行的翻译字符串
/// 不变量：`start_line < end_line` 且 `end_line - start_line <= LOOKAHEAD_LINES`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub file: PathBuf,
    /// 起始行（1 起）
    pub start_line: usize,
    /// 结束行（1 起，含）
    pub end_line: usize,
    pub quote: Quote,
    /// 合并为单行后的翻译文本（空白折叠、去首尾空白）
    pub text: String,
    /// 原始多行内容（报告用）
    pub content: String,
}

impl Finding {
    /// 原始内容逐行附带行号
    pub fn content_lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.content.split('\n').enumerate().map(move |(i, l)| (self.start_line + i, l))
    }
}

/// 稳定排序：文件路径升序 → 起始行升序 → 结束行升序
pub(crate) fn sort_findings_stable(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.start_line.cmp(&b.start_line))
            .then(a.end_line.cmp(&b.end_line))
    });
}
