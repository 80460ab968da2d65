//! # 实验级子命令 CLI 定义
//!
//! `energies`, `surface`, `population`, `spectra` 共享同一组实验参数，
//! 命令行参数覆盖配置文件中的同名设置。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/` 相应模块

use crate::models::{PopulationMethod, SurfaceType};

use clap::Args;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 共享参数
// ─────────────────────────────────────────────────────────────

/// 实验级公共参数
#[derive(Args, Debug)]
pub struct ExperimentArgs {
    /// Experiment root directory (…/slug/theory/spin/calc/basis/<output>)
    pub dir: PathBuf,

    /// YAML configuration file (orderings, file markers, jobs, decimals)
    #[arg(short, long, env = "QHARVEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Basis sets from smallest to largest (overrides the configuration)
    #[arg(long, num_args = 1..)]
    pub basis_order: Vec<String>,

    /// Theory levels from lowest to highest (overrides the configuration)
    #[arg(long, num_args = 1..)]
    pub theory_order: Vec<String>,

    /// Number of parallel readers (0 = all CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Round energies to this many decimals when printing / exporting
    #[arg(long)]
    pub decimals: Option<u32>,

    /// Write the table to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only write the CSV, do not print the table
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

// ─────────────────────────────────────────────────────────────
// 子命令
// ─────────────────────────────────────────────────────────────

/// energies 子命令参数
#[derive(Args, Debug)]
pub struct EnergiesArgs {
    #[command(flatten)]
    pub common: ExperimentArgs,
}

/// surface 子命令参数
#[derive(Args, Debug)]
pub struct SurfaceArgs {
    #[command(flatten)]
    pub common: ExperimentArgs,

    /// Surface types to read: "Actual Energy", "MDCI", "MDCI w/o Triples", "SCF Energy"
    /// (default: "Actual Energy" "SCF Energy")
    #[arg(long = "kind", num_args = 1..)]
    pub kinds: Vec<SurfaceType>,

    /// Plot one surface type to this file (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Surface type to plot (default: first requested type)
    #[arg(long)]
    pub plot_kind: Option<SurfaceType>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}

/// population 子命令参数
#[derive(Args, Debug)]
pub struct PopulationArgs {
    #[command(flatten)]
    pub common: ExperimentArgs,

    /// Population analyses to read: Mulliken, Loewdin (default: both)
    #[arg(long = "method", num_args = 1..)]
    pub methods: Vec<PopulationMethod>,
}

/// spectra 子命令参数
#[derive(Args, Debug)]
pub struct SpectraArgs {
    #[command(flatten)]
    pub common: ExperimentArgs,
}
