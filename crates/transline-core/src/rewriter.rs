//! 自动修复：把跨行翻译字符串合并为一行
use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::findings::Finding;
use crate::source::SourceText;

/// 单次改写的结果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// 实际合并的跨度数
    pub merged: usize,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        self.merged > 0
    }
}

/// 按起始行降序逐个合并命中项
/// - 先处理靠后的跨度，删除行不会影响尚未处理的靠前跨度的行号
/// - 行号越界（过期的命中集）或开/闭标记已不存在的命中项直接跳过
/// - 跨度外的行不做任何改动
pub fn rewrite(source: &mut SourceText, findings: &[Finding]) -> RewriteOutcome {
    let mut ordered: Vec<&Finding> = findings.iter().collect();
    ordered.sort_by(|a, b| b.start_line.cmp(&a.start_line));

    let mut outcome = RewriteOutcome::default();
    for f in ordered {
        if merge_span(&mut source.lines, f) {
            outcome.merged += 1;
        } else {
            debug!(file = %f.file.display(), start = f.start_line, end = f.end_line, "skip stale finding");
        }
    }
    outcome
}

fn merge_span(lines: &mut Vec<String>, f: &Finding) -> bool {
    if f.start_line == 0 || f.end_line < f.start_line {
        return false;
    }
    let (start, end) = (f.start_line - 1, f.end_line - 1);
    if start >= lines.len() || end >= lines.len() {
        return false;
    }

    let open = f.quote.open_marker();
    let close = f.quote.close_marker();
    let Some(open_at) = lines[start].find(&open) else { return false };
    let Some(close_at) = lines[end].find(&close) else { return false };

    let before = &lines[start][..open_at];
    let after = &lines[end][close_at + close.len()..];
    let merged = format!("{before}{open}{}{close}{after}", f.text);

    lines[start] = merged;
    lines.drain(start + 1..=end);
    true
}

/// 读取文件、合并全部命中项，有改动时整文件写回；返回是否改动
pub fn fix_file(path: &Path, findings: &[Finding]) -> Result<bool> {
    let mut source = SourceText::load(path)?;
    let outcome = rewrite(&mut source, findings);
    if outcome.changed() {
        source.save(path)?;
    }
    Ok(outcome.changed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_text;

    fn fix_text(content: &str) -> (String, RewriteOutcome) {
        let findings = scan_text("t.jinja", content);
        let mut src = SourceText::parse(content);
        let outcome = rewrite(&mut src, &findings);
        (src.to_text(), outcome)
    }

    #[test]
    fn preserves_surrounding_content() {
        let (out, outcome) = fix_text("prefix _(\"a\nb\") suffix");
        assert_eq!(out, "prefix _(\"a b\") suffix");
        assert_eq!(outcome.merged, 1);
    }

    #[test]
    fn rescan_after_rewrite_is_clean() {
        let content = "<p>\n  {{ _('Your order\n      has been\n   shipped') }}\n</p>\n";
        let (out, _) = fix_text(content);
        assert_eq!(out, "<p>\n  {{ _('Your order has been shipped') }}\n</p>\n");
        assert!(scan_text("t.jinja", &out).is_empty());
    }

    #[test]
    fn order_of_findings_does_not_matter() {
        let content = "_(\"a\nb\")\nkeep\n_(\"c\nd\ne\")\ntail";
        let findings = scan_text("t.jinja", content);
        assert_eq!(findings.len(), 2);

        let mut forward = SourceText::parse(content);
        rewrite(&mut forward, &findings);
        let mut reversed_findings = findings.clone();
        reversed_findings.reverse();
        let mut backward = SourceText::parse(content);
        rewrite(&mut backward, &reversed_findings);

        let expected = "_(\"a b\")\nkeep\n_(\"c d e\")\ntail";
        assert_eq!(forward.to_text(), expected);
        assert_eq!(backward.to_text(), expected);
    }

    #[test]
    fn stale_findings_are_skipped() {
        let content = "_(\"a\nb\")";
        let findings = scan_text("t.jinja", content);
        let mut src = SourceText::parse(content);
        assert_eq!(rewrite(&mut src, &findings).merged, 1);
        // 同一命中集再次应用：行号已越界
        let again = rewrite(&mut src, &findings);
        assert!(!again.changed());
        assert_eq!(src.to_text(), "_(\"a b\")");
    }

    #[test]
    fn untouched_lines_stay_in_place() {
        let (out, _) = fix_text("one\n{{ _(\"x\ny\") }}\nthree\nfour");
        assert_eq!(out, "one\n{{ _(\"x y\") }}\nthree\nfour");
    }

    #[test]
    fn fix_file_writes_only_when_changed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jinja");
        std::fs::write(&path, "{{ _(\"add\n to cart\") }}\n").unwrap();

        let findings = crate::scanner::scan_file(&path).unwrap();
        assert!(fix_file(&path, &findings).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{{ _(\"add to cart\") }}\n");
        assert!(!fix_file(&path, &[]).unwrap());
    }
}
