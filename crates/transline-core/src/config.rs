//! 配置文件加载（TOML）
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::discovery::{ExcludeDirs, WalkDirSource, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSION};

/// 未显式指定时尝试读取的默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "transline.toml";

/// 配置文件结构；缺省字段使用默认值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// 扫描的文件扩展名（不含点）
    pub extension: String,
    /// 排除的目录名
    pub exclude: Vec<String>,
    /// 最大扫描文件大小（字节）
    pub max_file_size: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            exclude: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            max_file_size: None,
        }
    }
}

impl Config {
    /// 从 TOML 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&txt).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn parse(txt: &str) -> Result<Self> {
        let mut cfg: Config = toml::from_str(txt)?;
        // 兼容 ".jinja" 写法
        cfg.extension = cfg.extension.trim_start_matches('.').to_string();
        Ok(cfg)
    }

    /// 显式路径必须可读；否则尝试 `dir/transline.toml`，不存在时使用默认值
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::load(&fallback);
        }
        Ok(Self::default())
    }

    /// 构建以 `root` 为根的文件发现器
    pub fn file_source(&self, root: &Path) -> WalkDirSource {
        WalkDirSource {
            root: root.to_path_buf(),
            extension: self.extension.clone(),
            exclude: ExcludeDirs::new(self.exclude.iter().cloned()),
            max_file_size: self.max_file_size,
        }
    }
}
