//! # 能量面图表生成
//!
//! 使用 `plotters` 绘制键长扫描的势能曲线，每个运行一条线。
//!
//! ## 功能
//! - 单一能量面类型，多运行叠加对比
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/surface.rs` 调用
//! - 使用 `experiment/` 的 ExperimentSurface 结构
//! - 使用 `plotters` 渲染图表

use crate::error::{HarvestError, Result};
use crate::experiment::ExperimentSurface;
use crate::models::SurfaceType;

use plotters::prelude::*;
use std::path::Path;

/// 一条曲线: (图例, 点列)
type Series = (String, Vec<(f64, f64)>);

/// 线条配色
const PALETTE: [RGBColor; 6] = [
    RGBColor(0, 102, 204),
    RGBColor(204, 51, 0),
    RGBColor(0, 153, 76),
    RGBColor(153, 51, 204),
    RGBColor(230, 153, 0),
    RGBColor(64, 64, 64),
];

/// 生成能量面图表
pub fn generate_surface_plot(
    surface: &ExperimentSurface,
    kind: SurfaceType,
    output_path: &Path,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    let series = collect_series(surface, kind)?;
    let title = format!("{} surface", kind);

    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_surface_chart(&root, &series, &title)?;
        root.present()
            .map_err(|e| HarvestError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_surface_chart(&root, &series, &title)?;
        root.present()
            .map_err(|e| HarvestError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 按运行拆分出某一能量列
fn collect_series(surface: &ExperimentSurface, kind: SurfaceType) -> Result<Vec<Series>> {
    let idx = surface
        .kinds
        .iter()
        .position(|k| *k == kind)
        .ok_or_else(|| {
            HarvestError::InvalidArgument(format!("surface '{}' was not requested", kind))
        })?;

    let series: Vec<Series> = surface
        .runs()
        .into_iter()
        .map(|(run, rows)| {
            let label = format!("{} / {}", run.theory, run.basis);
            let points = rows
                .iter()
                .map(|r| (r.coordinate.value, r.energies[idx]))
                .collect();
            (label, points)
        })
        .collect();

    if series.is_empty() {
        return Err(HarvestError::InvalidArgument(
            "energy surface has no rows to plot".to_string(),
        ));
    }
    Ok(series)
}

/// 所有曲线的坐标范围，y 方向留 5% 边距
fn bounds(series: &[Series]) -> ((f64, f64), (f64, f64)) {
    let points = series.iter().flat_map(|(_, p)| p.iter());
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let pad = ((y_max - y_min) * 0.05).max(1e-6);
    ((x_min, x_max), (y_min - pad, y_max + pad))
}

/// 绘制能量面图表的核心逻辑
fn draw_surface_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &[Series],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| HarvestError::Other(format!("{:?}", e)))?;

    let ((x_min, x_max), (y_min, y_max)) = bounds(series);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| HarvestError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Bond length (Å)")
        .y_desc("Energy (Eh)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| HarvestError::Other(format!("{:?}", e)))?;

    for (i, (label, points)) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(|e| HarvestError::Other(format!("{:?}", e)))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(|e| HarvestError::Other(format!("{:?}", e)))?;

    Ok(())
}
