//! # 表格导出
//!
//! 把实验级表格写成 CSV，列顺序与终端表格一致。
//!
//! ## 列
//! - 最终能量: basis, calc, spin, theory, slug, final_energy, unit
//! - 能量面: bond_length, <能量面…>, basis, calc, spin, theory, slug
//! - 布居: anum, atype, pcharge, [pspin], step, population, basis, …, slug
//! - IR 光谱: mode, freq, t2, tx, ty, tz, basis, …, slug
//!
//! `decimals` 只影响能量列的写出精度，不改变内存中的数据。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `experiment/` 的表结构
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{HarvestError, Result};
use crate::experiment::{ExperimentPopulation, ExperimentSurface};
use crate::models::units::round_to;
use crate::models::{RunInfo, RunRecord, Tagged, VibrationalMode};

use std::path::Path;

/// 最终能量表表头
pub const ENERGY_COLUMNS: [&str; 7] = [
    "basis",
    "calc",
    "spin",
    "theory",
    "slug",
    "final_energy",
    "unit",
];

/// 按需四舍五入后格式化
pub fn format_energy(value: f64, decimals: Option<u32>) -> String {
    match decimals {
        Some(d) => format!("{:.*}", d as usize, round_to(value, d)),
        None => value.to_string(),
    }
}

/// 导出最终能量
pub fn energies_to_csv(records: &[RunRecord], decimals: Option<u32>, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(ENERGY_COLUMNS)?;

    for record in records {
        let mut row: Vec<String> = record.info.values().iter().map(|v| v.to_string()).collect();
        row.push(format_energy(record.final_energy.value, decimals));
        row.push(record.final_energy.unit.to_string());
        wtr.write_record(&row)?;
    }

    finish(wtr, path)
}

/// 导出能量面
pub fn surface_to_csv(surface: &ExperimentSurface, decimals: Option<u32>, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(surface.columns())?;

    for tagged in &surface.rows {
        let mut row = vec![tagged.row.coordinate.raw.clone()];
        row.extend(tagged.row.energies.iter().map(|e| format_energy(*e, decimals)));
        push_run(&mut row, &tagged.run);
        wtr.write_record(&row)?;
    }

    finish(wtr, path)
}

/// 导出布居分析；开壳层表中闭壳层运行的 pspin 留空
pub fn population_to_csv(table: &ExperimentPopulation, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(table.columns())?;

    for tagged in &table.rows {
        let r = &tagged.row;
        let mut row = vec![r.anum.to_string(), r.atype.clone(), r.pcharge.to_string()];
        if table.open_shell {
            row.push(r.pspin.map(|s| s.to_string()).unwrap_or_default());
        }
        row.push(r.step.to_string());
        row.push(r.method.to_string());
        push_run(&mut row, &tagged.run);
        wtr.write_record(&row)?;
    }

    finish(wtr, path)
}

/// 导出 IR 光谱
pub fn spectra_to_csv(modes: &[Tagged<VibrationalMode>], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = crate::models::VibrationalSpectrum::COLUMNS.to_vec();
    header.extend(RunInfo::COLUMNS);
    wtr.write_record(&header)?;

    for tagged in modes {
        let m = &tagged.row;
        let mut row = vec![
            m.mode.to_string(),
            m.freq.value.to_string(),
            m.t2.value.to_string(),
            m.tx.to_string(),
            m.ty.to_string(),
            m.tz.to_string(),
        ];
        push_run(&mut row, &tagged.run);
        wtr.write_record(&row)?;
    }

    finish(wtr, path)
}

fn push_run(row: &mut Vec<String>, run: &RunInfo) {
    row.extend(run.values().iter().map(|v| v.to_string()));
}

fn finish(mut wtr: csv::Writer<std::fs::File>, path: &Path) -> Result<()> {
    wtr.flush().map_err(|e| HarvestError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Coordinate, Geometry, PopulationMethod, PopulationRow, Quantity, SurfaceRow, SurfaceType,
        Unit,
    };
    use std::path::PathBuf;

    fn run(theory: &str) -> RunInfo {
        RunInfo {
            basis: "3-21G".to_string(),
            calc: "ENERGY".to_string(),
            spin: "spin_01".to_string(),
            theory: theory.to_string(),
            slug: "H2_test".to_string(),
        }
    }

    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let header = rdr.headers().unwrap().iter().map(String::from).collect();
        let rows = rdr
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (header, rows)
    }

    #[test]
    fn test_format_energy() {
        assert_eq!(format_energy(-1.01010039, Some(4)), "-1.0101");
        assert_eq!(format_energy(-1.01010039, None), "-1.01010039");
        assert_eq!(format_energy(-0.5, Some(2)), "-0.50");
    }

    #[test]
    fn test_energies_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("energies.csv");
        let records = vec![RunRecord {
            info: run("QCISD(T)"),
            final_energy: Quantity::hartree(-1.01010039),
            final_geometry: Geometry::default(),
            path: PathBuf::from("orca.out"),
        }];

        energies_to_csv(&records, Some(6), &path).unwrap();
        let (header, rows) = read_back(&path);
        assert_eq!(header, ENERGY_COLUMNS);
        assert_eq!(
            rows[0],
            vec!["3-21G", "ENERGY", "spin_01", "QCISD(T)", "H2_test", "-1.010100", "hartree"]
        );
    }

    #[test]
    fn test_surface_csv_keeps_raw_coordinate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surface.csv");
        let surface = ExperimentSurface {
            kinds: vec![SurfaceType::ActualEnergy, SurfaceType::ScfEnergy],
            rows: vec![Tagged::new(
                run("UHF"),
                SurfaceRow {
                    coordinate: Coordinate {
                        raw: "0.40000000".to_string(),
                        value: 0.4,
                    },
                    energies: vec![-0.91, -0.91],
                },
            )],
        };

        surface_to_csv(&surface, None, &path).unwrap();
        let (header, rows) = read_back(&path);
        assert_eq!(header.len(), 8);
        assert_eq!(header[1], "Actual Energy");
        assert_eq!(rows[0][0], "0.40000000");
        assert_eq!(rows[0][6], "UHF");
    }

    #[test]
    fn test_population_csv_blank_spin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("population.csv");
        let row = |pspin| PopulationRow {
            anum: 0,
            atype: "H".to_string(),
            pcharge: 0.0,
            pspin,
            step: 1,
            method: PopulationMethod::Mulliken,
        };
        let table = ExperimentPopulation {
            open_shell: true,
            rows: vec![
                Tagged::new(run("UHF"), row(Some(1.0))),
                Tagged::new(run("HF"), row(None)),
            ],
        };

        population_to_csv(&table, &path).unwrap();
        let (header, rows) = read_back(&path);
        assert_eq!(header.len(), 11);
        assert_eq!(rows[0][3], "1");
        assert_eq!(rows[1][3], "");
        assert_eq!(rows[1][5], "Mulliken");
    }

    #[test]
    fn test_spectra_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spectra.csv");
        let modes = vec![Tagged::new(
            run("HF"),
            VibrationalMode {
                mode: 6,
                freq: Quantity::new(1639.47, Unit::ReciprocalCentimeter),
                t2: Quantity::new(78.465356, Unit::KmPerMol),
                tx: 0.0,
                ty: -8.858068,
                tz: 0.0,
            },
        )];

        spectra_to_csv(&modes, &path).unwrap();
        let (header, rows) = read_back(&path);
        assert_eq!(header[..6], ["mode", "freq", "t2", "tx", "ty", "tz"]);
        assert_eq!(header.len(), 11);
        assert_eq!(rows[0][1], "1639.47");
    }
}
