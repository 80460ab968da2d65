//! # energies 子命令实现
//!
//! 实验内每个运行的最终单点能，按 (理论方法, 基组, 能量) 排序。
//!
//! ## 依赖关系
//! - 使用 `cli/experiment.rs` 定义的 EnergiesArgs
//! - 使用 `experiment/` 聚合，`export.rs` 导出

use super::{open_experiment, write_csv};
use crate::cli::experiment::EnergiesArgs;
use crate::error::Result;
use crate::export;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 能量表行
#[derive(Debug, Clone, Tabled)]
struct EnergyRow {
    #[tabled(rename = "Theory")]
    theory: String,
    #[tabled(rename = "Basis")]
    basis: String,
    #[tabled(rename = "Spin")]
    spin: String,
    #[tabled(rename = "Calc")]
    calc: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "System")]
    system: String,
    #[tabled(rename = "Energy (Eh)")]
    energy: String,
}

/// 执行 energies
pub fn execute(args: EnergiesArgs) -> Result<()> {
    output::print_header("Final Single Point Energies");

    let (experiment, config) = open_experiment(&args.common)?;
    let records = experiment.final_energies()?;

    if !args.common.quiet && !records.is_empty() {
        let rows: Vec<EnergyRow> = records
            .iter()
            .map(|r| EnergyRow {
                theory: r.info.theory.clone(),
                basis: r.info.basis.clone(),
                spin: r.info.spin.clone(),
                calc: r.info.calc.clone(),
                slug: r.info.slug.clone(),
                system: r.system(),
                energy: export::format_energy(r.final_energy.value, config.decimals),
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    write_csv(args.common.output.as_deref(), |path| {
        export::energies_to_csv(&records, config.decimals, path)
    })?;

    output::print_done(&format!("{} runs", records.len()));
    Ok(())
}
