//! # 解析器模块
//!
//! ORCA 输出文件的定向正则扫描，以及运行目录命名约定的解析。
//!
//! ## 依赖关系
//! - 被 `experiment/`, `commands/`, `thermo.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: orca_out, run_path, sections

pub mod orca_out;
pub mod run_path;
pub mod sections;

pub use orca_out::OrcaOutput;
pub use run_path::run_info_for_file;
