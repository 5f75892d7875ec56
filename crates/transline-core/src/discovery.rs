//! 文件发现：递归遍历目录并按排除规则裁剪
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// 默认排除的目录名（依赖缓存 / 版本控制 / 第三方库 / 构建产物）
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "libraries", "dist", "build"];

/// 默认扫描的文件扩展名
pub const DEFAULT_EXTENSION: &str = "jinja";

/// 候选文件来源；扫描流程只依赖此接口
pub trait FileSource {
    /// 返回本轮需要扫描的文件（顺序稳定）
    fn files(&self) -> Result<Vec<PathBuf>>;
}

/// 目录名排除谓词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeDirs {
    names: BTreeSet<String>,
}

impl ExcludeDirs {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.names.contains(dir_name)
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
    }
}

impl Default for ExcludeDirs {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_DIRS.iter().copied())
    }
}

/// 基于 walkdir 的递归文件发现
#[derive(Debug, Clone)]
pub struct WalkDirSource {
    pub root: PathBuf,
    pub extension: String,
    pub exclude: ExcludeDirs,
    /// 超过该大小（字节）的文件跳过
    pub max_file_size: Option<u64>,
}

impl WalkDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            exclude: ExcludeDirs::default(),
            max_file_size: None,
        }
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        // 根目录本身不参与排除判断
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry.file_name().to_str().is_some_and(|n| self.exclude.is_excluded(n))
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == self.extension)
    }

    fn within_size(&self, path: &Path) -> bool {
        match (self.max_file_size, std::fs::metadata(path)) {
            (Some(max), Ok(md)) => md.len() <= max,
            _ => true,
        }
    }
}

impl FileSource for WalkDirSource {
    fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root).follow_links(false).into_iter();
        for entry in walker.filter_entry(|e| !self.is_pruned(e)) {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    debug!(%err, "skip unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.has_extension(entry.path()) {
                continue;
            }
            if !self.within_size(entry.path()) {
                debug!(path = %entry.path().display(), "skip oversized file");
                continue;
            }
            files.push(entry.into_path());
        }
        // 按路径排序，确保输出顺序稳定
        files.sort();
        Ok(files)
    }
}

/// 固定文件列表（调用方已自行枚举）
impl FileSource for Vec<PathBuf> {
    fn files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.clone())
    }
}
