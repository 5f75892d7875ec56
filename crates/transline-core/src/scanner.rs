//! 跨行翻译字符串扫描
//!
//! 逐行查找 `_("` / `_('` 开标记：
//! - 同一行内出现对应闭标记（`")` / `')`）则为单行，不报告；
//! - 否则在其后最多 `LOOKAHEAD_LINES` 行内寻找首个含闭标记的行，找到即产出一个命中项；
//! - 窗口内找不到则静默忽略（已知限制）。
//! 无论是否命中，扫描都从下一行继续（不跳过跨度内的行）。
use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::detectors::detect_open_marker;
use crate::findings::Finding;
use crate::source::SourceText;

/// 开标记之后最多向下查找的行数（含开标记行共 10 行）
pub const LOOKAHEAD_LINES: usize = 9;

/// 惰性命中项迭代器；每次新建即重新扫描，不保留跨调用状态
pub struct Scanner<'a> {
    file: &'a Path,
    lines: &'a [String],
    next: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(file: &'a Path, source: &'a SourceText) -> Self {
        Self { file, lines: source.lines(), next: 0 }
    }

    /// 评估第 `i` 行是否为跨行翻译字符串的起点
    fn evaluate(&self, i: usize) -> Option<Finding> {
        let line = &self.lines[i];
        let marker = detect_open_marker(line)?;
        let close = marker.quote.close_marker();

        let tail = &line[marker.body_start()..];
        if tail.contains(&close) {
            return None;
        }

        let last = (i + LOOKAHEAD_LINES).min(self.lines.len().saturating_sub(1));
        let j = (i + 1..=last).find(|&j| self.lines[j].contains(&close))?;

        let end_line = &self.lines[j];
        let head = &end_line[..end_line.find(&close)?];

        let parts = std::iter::once(tail)
            .chain(self.lines[i + 1..j].iter().map(String::as_str))
            .chain(std::iter::once(head));
        let text = collapse_whitespace(&parts.collect::<Vec<_>>().join(" "));

        Some(Finding {
            file: self.file.to_path_buf(),
            start_line: i + 1,
            end_line: j + 1,
            quote: marker.quote,
            text,
            content: self.lines[i..=j].join("\n").trim().to_string(),
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Finding;

    fn next(&mut self) -> Option<Finding> {
        while self.next < self.lines.len() {
            let i = self.next;
            self.next += 1;
            if let Some(f) = self.evaluate(i) {
                return Some(f);
            }
        }
        None
    }
}

/// 空白串折叠为单个空格并去掉首尾空白
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 扫描单个文件（整读）
pub fn scan_file(path: &Path) -> Result<Vec<Finding>> {
    let source = SourceText::load(path)?;
    Ok(scan_source(path, &source))
}

pub fn scan_source(file: &Path, source: &SourceText) -> Vec<Finding> {
    Scanner::new(file, source).collect()
}

/// 便于测试与调用方：直接扫描一段文本
pub fn scan_text(file: impl Into<PathBuf>, content: &str) -> Vec<Finding> {
    let file = file.into();
    scan_source(&file, &SourceText::parse(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::Quote;

    #[test]
    fn single_line_strings_are_not_findings() {
        let content = [
            r#"{{ _("add to cart") }}"#,
            r#"<p>{{ _('done') }}</p>"#,
            r#"{{ _("a") }} {{ _("b") }}"#,
            r#"{{ _("") }}"#,
        ]
        .join("\n");
        assert!(scan_text("t.jinja", &content).is_empty());
    }

    #[test]
    fn span_within_window_is_found() {
        // k = 2..=10 lines between open and close
        for k in 2..=10usize {
            let mut lines = vec!["head".to_string(), "{{ _(\"start".to_string()];
            for n in 0..k - 2 {
                lines.push(format!("word{n}"));
            }
            lines.push("end\") }}".to_string());
            let findings = scan_text("t.jinja", &lines.join("\n"));
            assert_eq!(findings.len(), 1, "k = {k}");
            assert_eq!(findings[0].start_line, 2);
            assert_eq!(findings[0].end_line, 1 + k);
            assert!(findings[0].end_line - findings[0].start_line <= LOOKAHEAD_LINES);
        }
    }

    #[test]
    fn span_beyond_window_is_ignored() {
        for k in [11usize, 12, 20] {
            let mut lines = vec!["{{ _(\"start".to_string()];
            for n in 0..k - 2 {
                lines.push(format!("word{n}"));
            }
            lines.push("end\") }}".to_string());
            assert!(scan_text("t.jinja", &lines.join("\n")).is_empty(), "k = {k}");
        }
    }

    #[test]
    fn reconstructs_text_with_collapsed_whitespace() {
        let findings = scan_text("t.jinja", "{{ _(\"add\n   to   cart\") }}");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.text, "add to cart");
        assert_eq!(f.quote, Quote::Double);
        assert_eq!(f.content, "{{ _(\"add\n   to   cart\") }}");
    }

    #[test]
    fn single_quote_delimiter_ignores_double_close() {
        let content = "{{ _('it\nsays \") here\nok') }}";
        let findings = scan_text("t.jinja", content);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].quote, Quote::Single);
        assert_eq!(findings[0].end_line, 3);
        assert_eq!(findings[0].text, "it says \") here ok");
    }

    #[test]
    fn first_close_in_window_wins() {
        let findings = scan_text("t.jinja", "_(\"a\nb\")\nc\")");
        assert_eq!(findings.len(), 1);
        assert_eq!((findings[0].start_line, findings[0].end_line), (1, 2));
        assert_eq!(findings[0].text, "a b");
    }

    #[test]
    fn scanning_resumes_on_next_line() {
        // 第 2 行本身也是未闭合的开标记，独立评估
        let findings = scan_text("t.jinja", "_(\"a\n_(\"b\nc\")");
        let spans: Vec<_> = findings.iter().map(|f| (f.start_line, f.end_line)).collect();
        assert_eq!(spans, vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn unclosed_at_end_of_file_is_ignored() {
        assert!(scan_text("t.jinja", "{{ _(\"never\nclosed").is_empty());
    }

    #[test]
    fn scanner_is_restartable() {
        let src = SourceText::parse("_(\"a\nb\")\n_('c\nd')");
        let path = Path::new("t.jinja");
        let first: Vec<_> = Scanner::new(path, &src).collect();
        let second: Vec<_> = Scanner::new(path, &src).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }
}
