//! # spectra 子命令实现
//!
//! 实验内每个运行的 IR 光谱，按 (理论方法, 基组) 排序。
//!
//! ## 依赖关系
//! - 使用 `cli/experiment.rs` 定义的 SpectraArgs
//! - 使用 `experiment/` 聚合，`export.rs` 导出

use super::{open_experiment, write_csv};
use crate::cli::experiment::SpectraArgs;
use crate::error::Result;
use crate::export;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 光谱表行
#[derive(Debug, Clone, Tabled)]
struct ModeRow {
    #[tabled(rename = "Theory")]
    theory: String,
    #[tabled(rename = "Basis")]
    basis: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Mode")]
    mode: usize,
    #[tabled(rename = "Freq (cm⁻¹)")]
    freq: String,
    #[tabled(rename = "T² (km/mol)")]
    t2: String,
    #[tabled(rename = "(TX, TY, TZ)")]
    dipole: String,
}

/// 执行 spectra
pub fn execute(args: SpectraArgs) -> Result<()> {
    output::print_header("IR Spectra");

    let (experiment, _config) = open_experiment(&args.common)?;
    let modes = experiment.vibrational_spectra()?;

    if !args.common.quiet && !modes.is_empty() {
        let rows: Vec<ModeRow> = modes
            .iter()
            .map(|tagged| {
                let m = &tagged.row;
                ModeRow {
                    theory: tagged.run.theory.clone(),
                    basis: tagged.run.basis.clone(),
                    slug: tagged.run.slug.clone(),
                    mode: m.mode,
                    freq: format!("{:.2}", m.freq.value),
                    t2: format!("{:.4}", m.t2.value),
                    dipole: format!("({:.6}, {:.6}, {:.6})", m.tx, m.ty, m.tz),
                }
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    write_csv(args.common.output.as_deref(), |path| {
        export::spectra_to_csv(&modes, path)
    })?;

    output::print_done(&format!("{} modes", modes.len()));
    Ok(())
}
