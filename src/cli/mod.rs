//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `energies`: 实验级最终能量表
//! - `surface`: 实验级能量面扫描表（可选绘图）
//! - `population`: 实验级布居分析表
//! - `spectra`: 实验级 IR 光谱表
//! - `read`: 单个输出文件摘要
//! - `runinfo`: 由目录约定解析运行来源
//! - `rates`: 过渡态理论速率常数
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: experiment, single

pub mod experiment;
pub mod single;

use clap::{Parser, Subcommand};

/// qharvest - ORCA 输出解析与实验聚合工具
#[derive(Parser)]
#[command(name = "qharvest")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Harvest typed tables from ORCA quantum-chemistry output files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Final single point energies of every run in an experiment
    Energies(experiment::EnergiesArgs),

    /// Energy surface scans of every run in an experiment
    Surface(experiment::SurfaceArgs),

    /// Mulliken / Loewdin population analyses of every run in an experiment
    Population(experiment::PopulationArgs),

    /// IR spectra of every run in an experiment
    Spectra(experiment::SpectraArgs),

    /// Summarize a single ORCA output file
    Read(single::ReadArgs),

    /// Show the run provenance encoded in a directory path
    Runinfo(single::RunInfoArgs),

    /// Harmonic transition state theory rate constants from three outputs
    Rates(single::RatesArgs),
}
