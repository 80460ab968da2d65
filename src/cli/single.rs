//! # 单文件子命令 CLI 定义
//!
//! - `read`: 单个输出文件摘要
//! - `runinfo`: 目录命名约定解析
//! - `rates`: HTST 速率常数
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/single.rs`

use crate::models::{PopulationMethod, SurfaceType};

use clap::Args;
use std::path::PathBuf;

/// read 子命令参数
#[derive(Args, Debug)]
pub struct ReadArgs {
    /// ORCA output file
    pub file: PathBuf,

    /// Also read these energy surfaces
    #[arg(long = "surface", num_args = 1..)]
    pub surfaces: Vec<SurfaceType>,

    /// Number of scan points (default: declared in the output header)
    #[arg(long)]
    pub points: Option<usize>,

    /// Also read these population analyses
    #[arg(long = "population", num_args = 1..)]
    pub populations: Vec<PopulationMethod>,

    /// Also read the IR spectrum
    #[arg(long, default_value_t = false)]
    pub spectrum: bool,

    /// Also read the final Gibbs free energy
    #[arg(long, default_value_t = false)]
    pub gibbs: bool,

    /// Distance between two atoms of the final geometry (0-based indices)
    #[arg(long, num_args = 2, value_names = ["I", "J"])]
    pub bond: Vec<usize>,

    /// Angle I-CENTER-J of the final geometry in degrees (0-based indices)
    #[arg(long, num_args = 3, value_names = ["CENTER", "I", "J"])]
    pub angle: Vec<usize>,

    /// Round energies to this many decimals
    #[arg(long)]
    pub decimals: Option<u32>,
}

/// runinfo 子命令参数
#[derive(Args, Debug)]
pub struct RunInfoArgs {
    /// Run directory or output file
    pub path: PathBuf,
}

/// rates 子命令参数
#[derive(Args, Debug)]
pub struct RatesArgs {
    /// Reactant output file (frequency calculation)
    #[arg(long)]
    pub reactant: PathBuf,

    /// Product output file (frequency calculation)
    #[arg(long)]
    pub product: PathBuf,

    /// Transition state output file (frequency calculation)
    #[arg(long)]
    pub ts: PathBuf,

    /// Temperature in kelvin
    #[arg(short, long, default_value_t = 298.15)]
    pub temperature: f64,
}
