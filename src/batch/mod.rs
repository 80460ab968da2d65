//! # 批量处理模块
//!
//! 为实验级聚合提供文件收集与并行读取。
//!
//! ## 功能
//! - 收集匹配的输出文件列表（有序）
//! - 并行处理，任一失败即中止
//! - 进度反馈
//!
//! ## 依赖关系
//! - 被 `experiment/` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::BatchRunner;
