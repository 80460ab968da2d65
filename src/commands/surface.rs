//! # surface 子命令实现
//!
//! 实验内每个运行的能量面扫描，按 (理论方法, 基组, 键长) 排序，可选绘图。
//!
//! ## 依赖关系
//! - 使用 `cli/experiment.rs` 定义的 SurfaceArgs
//! - 使用 `experiment/` 聚合，`export.rs` 导出，`plot.rs` 绘图

use super::{open_experiment, print_table, write_csv};
use crate::cli::experiment::SurfaceArgs;
use crate::error::{HarvestError, Result};
use crate::export;
use crate::plot;
use crate::utils::output;

/// 执行 surface
pub fn execute(args: SurfaceArgs) -> Result<()> {
    output::print_header("Energy Surface Scans");

    let (experiment, config) = open_experiment(&args.common)?;
    let surface = experiment.energy_surface(&args.kinds)?;

    output::print_info(&format!(
        "Surfaces: {}",
        surface
            .kinds
            .iter()
            .map(|k| k.label())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    if !args.common.quiet && !surface.rows.is_empty() {
        let rows = surface
            .rows
            .iter()
            .map(|tagged| {
                let mut row = vec![tagged.row.coordinate.raw.clone()];
                row.extend(
                    tagged
                        .row
                        .energies
                        .iter()
                        .map(|e| export::format_energy(*e, config.decimals)),
                );
                row.extend(tagged.run.values().iter().map(|v| v.to_string()));
                row
            })
            .collect();
        print_table(surface.columns(), rows);
    }

    write_csv(args.common.output.as_deref(), |path| {
        export::surface_to_csv(&surface, config.decimals, path)
    })?;

    if let Some(plot_path) = &args.plot {
        let kind = match args.plot_kind {
            Some(kind) => kind,
            None => *surface.kinds.first().ok_or_else(|| {
                HarvestError::InvalidArgument("no surface type to plot".to_string())
            })?,
        };
        let use_svg = plot_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        plot::generate_surface_plot(
            &surface,
            kind,
            plot_path,
            args.width,
            args.height,
            use_svg,
        )?;
        output::print_success(&format!("Plot saved to '{}'", plot_path.display()));
    }

    output::print_done(&format!(
        "{} points from {} runs",
        surface.rows.len(),
        surface.runs().len()
    ));
    Ok(())
}
