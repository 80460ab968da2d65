//! # 批量执行器
//!
//! 在固定大小的线程池中并行处理文件列表。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果保持输入顺序
//! - 任一文件失败即中止整个批次，返回输入顺序中第一个错误
//! - 可选进度条
//!
//! ## 依赖关系
//! - 被 `experiment/mod.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{HarvestError, Result};
use crate::utils::progress;

use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;
use std::path::PathBuf;

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
    /// 是否显示进度条
    progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示使用全部 CPU）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            progress: false,
        }
    }

    /// 是否显示进度条
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    ///
    /// 返回值顺序与 `files` 一致；有多个文件失败时返回输入顺序中最靠前的错误，
    /// 与线程调度无关。
    pub fn try_run<T, F>(&self, files: &[PathBuf], processor: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&PathBuf) -> Result<T> + Sync + Send,
    {
        let pb = if self.progress {
            progress::create_progress_bar(files.len() as u64, "Reading")
        } else {
            ProgressBar::hidden()
        };

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| HarvestError::Other(format!("failed to build thread pool: {}", e)))?;

        debug!("processing {} files on {} threads", files.len(), self.jobs);

        let results: Vec<Result<T>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();
        results.into_iter().collect()
    }
}
