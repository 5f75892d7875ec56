//! 公共类型（对外暴露）
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::findings::{Finding, Quote};

/// JSON 报告的单个元素
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub file: String,
    pub start_line: usize,
    pub end_line: usize,
    pub quote: Quote,
    pub text: &'a str,
    pub content: &'a str,
}

impl<'a> From<&'a Finding> for OutputItem<'a> {
    fn from(f: &'a Finding) -> Self {
        Self {
            file: f.file.display().to_string(),
            start_line: f.start_line,
            end_line: f.end_line,
            quote: f.quote,
            text: &f.text,
            content: &f.content,
        }
    }
}

/// 将命中项以 JSON 数组写入 `out`
pub fn write_json_report(findings: &[Finding], out: &mut dyn Write) -> Result<()> {
    let items: Vec<OutputItem<'_>> = findings.iter().map(OutputItem::from).collect();
    serde_json::to_writer_pretty(&mut *out, &items)?;
    writeln!(out)?;
    Ok(())
}
