//! # 单文件子命令实现
//!
//! - `read`: 打印单个输出文件的运行信息、最终能量与几何，按需附带
//!   能量面、布居分析、IR 光谱和 Gibbs 自由能
//! - `runinfo`: 打印目录命名约定解析出的来源信息
//! - `rates`: 由三个频率计算的 Gibbs 自由能计算 HTST 速率常数
//!
//! ## 依赖关系
//! - 使用 `cli/single.rs` 定义的参数
//! - 使用 `parsers/`, `thermo.rs`, `export.rs`

use super::print_table;
use crate::cli::single::{RatesArgs, ReadArgs, RunInfoArgs};
use crate::error::{HarvestError, Result};
use crate::export;
use crate::models::{EnergySurface, RunInfo, Unit, VibrationalSpectrum};
use crate::parsers::{run_path, OrcaOutput};
use crate::thermo;
use crate::utils::output;

use log::warn;
use tabled::{Table, Tabled};

/// 键值对表格行
#[derive(Debug, Clone, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(field: &str, value: impl ToString) -> Self {
        FieldRow {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

fn run_info_rows(info: &RunInfo) -> Vec<FieldRow> {
    RunInfo::COLUMNS
        .iter()
        .zip(info.values())
        .map(|(field, value)| FieldRow::new(field, value))
        .collect()
}

// ─────────────────────────────────────────────────────────────
// read
// ─────────────────────────────────────────────────────────────

/// 执行 read
pub fn execute_read(args: ReadArgs) -> Result<()> {
    output::print_header(&format!("ORCA Output: {}", args.file.display()));

    let orca = OrcaOutput::open(&args.file)?;
    let mut fields = Vec::new();

    // 不符合目录约定的文件仍可读取
    match orca.run_info() {
        Ok(info) => fields.extend(run_info_rows(&info)),
        Err(e) => warn!("{}", e),
    }

    let energy = orca.final_energy()?;
    fields.push(FieldRow::new(
        "final_energy",
        format!(
            "{} {}",
            export::format_energy(energy.value, args.decimals),
            energy.unit
        ),
    ));

    match orca.final_geometry() {
        Ok(geometry) => {
            fields.push(FieldRow::new("system", geometry.formula()));
            fields.push(FieldRow::new("atoms", geometry.len()));

            if let [i, j] = args.bond[..] {
                let r = geometry.bond_length(i, j).ok_or_else(|| {
                    HarvestError::InvalidArgument(format!("no atoms {} and {}", i, j))
                })?;
                fields.push(FieldRow::new(
                    &format!("r({}, {})", i, j),
                    format!("{:.6} {}", r, Unit::Angstrom),
                ));
            }
            if let [center, i, j] = args.angle[..] {
                let theta = geometry.bond_angle(center, i, j).ok_or_else(|| {
                    HarvestError::InvalidArgument(format!(
                        "no angle {}-{}-{} in the final geometry",
                        i, center, j
                    ))
                })?;
                fields.push(FieldRow::new(
                    &format!("angle({}-{}-{})", i, center, j),
                    format!("{:.3} deg", theta),
                ));
            }
        }
        Err(e) => warn!("{}", e),
    }

    if let Some(n) = orca.declared_evaluations() {
        fields.push(FieldRow::new("energy_evaluations", n));
    }

    if args.gibbs {
        let g = orca.gibbs_free_energy()?;
        fields.push(FieldRow::new(
            "gibbs_free_energy",
            format!("{} {}", export::format_energy(g.value, args.decimals), g.unit),
        ));
    }

    println!("{}", Table::new(&fields));

    if !args.surfaces.is_empty() {
        let surface = orca.multi_energy_surface(&args.surfaces, args.points)?;
        output::print_header(&format!("Energy Surface ({} points)", surface.len()));
        let rows = surface
            .rows
            .iter()
            .map(|r| {
                let mut row = vec![r.coordinate.raw.clone()];
                row.extend(
                    r.energies
                        .iter()
                        .map(|e| export::format_energy(*e, args.decimals)),
                );
                row
            })
            .collect();
        let mut header = vec![EnergySurface::COORDINATE_COLUMN.to_string()];
        header.extend(surface.kinds.iter().map(|k| k.label().to_string()));
        print_table(header, rows);
    }

    if !args.populations.is_empty() {
        let table = orca.multi_population_analysis(&args.populations)?;
        output::print_header(&format!(
            "Population Analysis ({} rows, {} steps)",
            table.len(),
            table.steps()
        ));
        let rows = table
            .rows
            .iter()
            .map(|r| {
                let mut row = vec![r.anum.to_string(), r.atype.clone(), format!("{:.6}", r.pcharge)];
                if table.open_shell {
                    row.push(r.pspin.map(|s| format!("{:.6}", s)).unwrap_or_default());
                }
                row.push(r.step.to_string());
                row.push(r.method.to_string());
                row
            })
            .collect();
        let mut header = table.columns();
        header.truncate(header.len() - RunInfo::COLUMNS.len());
        print_table(header, rows);
    }

    if args.spectrum {
        let spectrum = orca.single_vibrational_modes()?;
        output::print_header(&format!("IR Spectrum ({} modes)", spectrum.len()));
        let rows = spectrum
            .modes
            .iter()
            .map(|m| {
                vec![
                    m.mode.to_string(),
                    format!("{:.2}", m.freq.value),
                    format!("{:.4}", m.t2.value),
                    format!("{:.6}", m.tx),
                    format!("{:.6}", m.ty),
                    format!("{:.6}", m.tz),
                ]
            })
            .collect();
        let header = VibrationalSpectrum::COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect();
        print_table(header, rows);
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// runinfo
// ─────────────────────────────────────────────────────────────

/// 执行 runinfo
pub fn execute_runinfo(args: RunInfoArgs) -> Result<()> {
    let info = if args.path.is_file() {
        run_path::run_info_for_file(&args.path)?
    } else {
        run_path::run_info(&args.path)?
    };

    let mut rows = run_info_rows(&info);
    rows.push(FieldRow::new(
        "basis_dir",
        run_path::escape_basis(&info.basis),
    ));
    rows.push(FieldRow::new(
        "theory_dir",
        run_path::escape_theory(&info.theory),
    ));

    println!("{}", Table::new(&rows));
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// rates
// ─────────────────────────────────────────────────────────────

/// 执行 rates
pub fn execute_rates(args: RatesArgs) -> Result<()> {
    output::print_header("Harmonic Transition State Theory Rates");

    let reactant = OrcaOutput::open(&args.reactant)?;
    let product = OrcaOutput::open(&args.product)?;
    let ts = OrcaOutput::open(&args.ts)?;

    let rates = thermo::htst_rates_from_outputs(&reactant, &product, &ts, args.temperature)?;

    let rows = vec![
        FieldRow::new("temperature", format!("{} {}", args.temperature, Unit::Kelvin)),
        FieldRow::new("forward_barrier", rates.forward_barrier),
        FieldRow::new("backward_barrier", rates.backward_barrier),
        FieldRow::new("k_forward", format!("{:.6e} {}", rates.forward.value, rates.forward.unit)),
        FieldRow::new(
            "k_backward",
            format!("{:.6e} {}", rates.backward.value, rates.backward.unit),
        ),
    ];
    println!("{}", Table::new(&rows));

    Ok(())
}
