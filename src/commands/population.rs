//! # population 子命令实现
//!
//! 实验内每个运行的 Mulliken / Loewdin 布居分析，按 (理论方法, 基组) 排序。
//!
//! ## 依赖关系
//! - 使用 `cli/experiment.rs` 定义的 PopulationArgs
//! - 使用 `experiment/` 聚合，`export.rs` 导出

use super::{open_experiment, print_table, write_csv};
use crate::cli::experiment::PopulationArgs;
use crate::error::Result;
use crate::export;
use crate::utils::output;

/// 执行 population
pub fn execute(args: PopulationArgs) -> Result<()> {
    output::print_header("Population Analysis");

    let (experiment, _config) = open_experiment(&args.common)?;
    let table = experiment.population(&args.methods)?;

    if table.open_shell {
        output::print_info("Open-shell runs present: spin populations included");
    }

    if !args.common.quiet && !table.rows.is_empty() {
        let rows = table
            .rows
            .iter()
            .map(|tagged| {
                let r = &tagged.row;
                let mut row = vec![r.anum.to_string(), r.atype.clone(), format!("{:.6}", r.pcharge)];
                if table.open_shell {
                    row.push(r.pspin.map(|s| format!("{:.6}", s)).unwrap_or_default());
                }
                row.push(r.step.to_string());
                row.push(r.method.to_string());
                row.extend(tagged.run.values().iter().map(|v| v.to_string()));
                row
            })
            .collect();
        print_table(table.columns(), rows);
    }

    write_csv(args.common.output.as_deref(), |path| {
        export::population_to_csv(&table, path)
    })?;

    output::print_done(&format!("{} rows", table.rows.len()));
    Ok(())
}
