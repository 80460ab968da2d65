//! # qharvest - ORCA 输出解析与实验聚合工具
//!
//! 把 ORCA 量子化学程序的纯文本输出整理成带类型的表格：单文件读取
//! （最终能量、能量面扫描、布居分析、IR 光谱），以及按目录约定组织的
//! 多运行实验聚合。
//!
//! ## 子命令
//! - `energies`   - 实验级最终能量
//! - `surface`    - 实验级能量面扫描（可选绘图）
//! - `population` - 实验级布居分析
//! - `spectra`    - 实验级 IR 光谱
//! - `read`       - 单个输出文件摘要
//! - `runinfo`    - 目录命名约定解析
//! - `rates`      - HTST 速率常数
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── experiment/ (多运行聚合与排序)
//!   │     │     └── batch/  (文件收集与并行读取)
//!   │     ├── parsers/    (ORCA 输出解析器)
//!   │     ├── models/     (数据模型)
//!   │     ├── export.rs / plot.rs / thermo.rs
//!   │     └── config.rs   (YAML 实验配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod experiment;
mod export;
mod models;
mod parsers;
mod plot;
mod thermo;
mod utils;

#[cfg(test)]
mod fixtures;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
