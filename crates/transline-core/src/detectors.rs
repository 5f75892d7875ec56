//! 开标记检测器（`_(` 紧跟引号）
use regex::Regex;
use std::sync::OnceLock;

use crate::findings::Quote;

/// 候选开标记：`_(` 后紧跟 `"` 或 `'`，捕获组 1 为引号
const OPEN_MARKER_PATTERN: &str = r#"_\((["'])"#;

fn open_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(OPEN_MARKER_PATTERN).expect("build open marker regex"))
}

/// 一行中的候选开标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenMarker {
    /// `_(` 在行内的字节偏移
    pub(crate) offset: usize,
    pub(crate) quote: Quote,
}

impl OpenMarker {
    /// 开标记（含引号）之后的文本起点
    pub(crate) fn body_start(&self) -> usize {
        self.offset + self.quote.open_marker().len()
    }
}

/// 检测行内首个候选开标记；行内最左的命中决定引号类型
/// 无法取得引号时视为畸形候选，返回 None
pub(crate) fn detect_open_marker(line: &str) -> Option<OpenMarker> {
    let caps = open_marker_regex().captures(line)?;
    let quote = caps.get(1)?.as_str().chars().next().and_then(Quote::from_char)?;
    let offset = caps.get(0)?.start();
    Some(OpenMarker { offset, quote })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftmost_marker_decides_quote() {
        let m = detect_open_marker(r#"{{ _('a') }} {{ _("b") }}"#).unwrap();
        assert_eq!(m.quote, Quote::Single);
        assert_eq!(m.offset, 3);
        assert_eq!(m.body_start(), 6);
    }

    #[test]
    fn marker_without_quote_is_skipped() {
        assert_eq!(detect_open_marker("{{ _(name) }}"), None);
        assert_eq!(detect_open_marker("plain text"), None);
    }
}
