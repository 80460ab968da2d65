//! # 输出文件收集器
//!
//! 在实验根目录下递归收集 ORCA 输出文件。
//!
//! ## 功能
//! - 文件名 glob 匹配（包含模式 + 排除模式）
//! - 递归目录搜索（跟随符号链接）
//! - 按路径字典序返回，保证下游顺序确定
//! - 遍历错误（权限、符号链接环）直接返回，不跳过任何目录
//!
//! ## 依赖关系
//! - 被 `experiment/mod.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{HarvestError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认包含模式：文件名含 "out"
pub const DEFAULT_INCLUDE: &str = "*out*";

/// 默认排除模式：调度器日志
pub const DEFAULT_EXCLUDE: &str = "*slurm*";

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 包含模式
    include: Vec<Pattern>,
    /// 排除模式
    exclude: Vec<Pattern>,
}

impl FileCollector {
    /// 创建新的文件收集器（默认模式）
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            include: vec![Pattern::new(DEFAULT_INCLUDE).expect("static pattern")],
            exclude: vec![Pattern::new(DEFAULT_EXCLUDE).expect("static pattern")],
        }
    }

    /// 设置包含模式（逗号分隔的多模式）
    pub fn with_include(mut self, patterns: &str) -> Result<Self> {
        self.include = Self::parse_patterns(patterns)?;
        if self.include.is_empty() {
            self.include = vec![Pattern::new("*").expect("static pattern")];
        }
        Ok(self)
    }

    /// 设置排除模式（逗号分隔，空串表示不排除）
    pub fn with_exclude(mut self, patterns: &str) -> Result<Self> {
        self.exclude = Self::parse_patterns(patterns)?;
        Ok(self)
    }

    /// 递归收集所有匹配的文件，按路径排序
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.input).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.input).display().to_string();
                HarvestError::FileReadError {
                    path,
                    source: e.into(),
                }
            })?;

            if entry.file_type().is_file() && self.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// 文件名命中任一包含模式且不命中任何排除模式
    fn matches(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        self.include.iter().any(|p| p.matches(filename))
            && !self.exclude.iter().any(|p| p.matches(filename))
    }

    fn parse_patterns(patterns: &str) -> Result<Vec<Pattern>> {
        patterns
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    HarvestError::InvalidArgument(format!("invalid file pattern '{}': {}", s, e))
                })
            })
            .collect()
    }
}
