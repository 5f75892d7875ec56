//! 报告输出（注入式，不依赖全局格式状态）
use std::sync::Mutex;

use crate::findings::Finding;

/// 致命退出时给出的单行写法示例
pub const EXAMPLE_HINT: &str = r#"Example: {{ _("add to cart") }} instead of {{ _("add\n to cart") }}"#;

/// 报告能力：信息 / 警告 / 错误
pub trait Reporter {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// 终端输出：info 写 stdout，warn/error 写 stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, msg: &str) {
        println!("{msg}");
    }

    fn warn(&self, msg: &str) {
        eprintln!("{msg}");
    }

    fn error(&self, msg: &str) {
        eprintln!("{msg}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// 内存收集（测试与嵌入调用方使用）
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// 所有消息拼成一段文本
    pub fn transcript(&self) -> String {
        self.messages().into_iter().map(|(_, m)| m).collect::<Vec<_>>().join("\n")
    }

    fn push(&self, level: Level, msg: &str) {
        if let Ok(mut m) = self.messages.lock() {
            m.push((level, msg.to_string()));
        }
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }
}

/// 逐条列出命中项：序号、文件:行范围、原始内容
pub fn report_findings(reporter: &dyn Reporter, findings: &[Finding]) {
    reporter.error(&format!("\nFound {} multi-line translation string(s):\n", findings.len()));
    for (idx, f) in findings.iter().enumerate() {
        reporter.info(&format!("{}. {}:{}-{}", idx + 1, f.file.display(), f.start_line, f.end_line));
        reporter.info("   Content:");
        for (line_no, line) in f.content_lines() {
            reporter.warn(&format!("   {line_no}: {line}"));
        }
        reporter.info("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_text;

    #[test]
    fn lists_each_finding_with_line_numbers() {
        let findings = scan_text("shop/cart.jinja", "x\n{{ _(\"add\n to cart\") }}");
        let reporter = MemoryReporter::new();
        report_findings(&reporter, &findings);

        let text = reporter.transcript();
        assert!(text.contains("Found 1 multi-line translation string(s)"));
        assert!(text.contains("1. shop/cart.jinja:2-3"));
        assert!(text.contains("   2: {{ _(\"add"));
        assert!(text.contains("   3:  to cart\") }}"));

        let warns = reporter.messages().into_iter().filter(|(l, _)| *l == Level::Warn).count();
        assert_eq!(warns, 2);
    }
}
