//! # ORCA .out 输出解析器
//!
//! 读取单个 ORCA 输出文件，提取最终单点能、最终几何、能量面扫描、
//! 布居分析、IR 光谱和 Gibbs 自由能。
//!
//! ## 约定
//! - 构造时只做一次头部扫描，获取声明的能量计算次数
//! - 其余每个操作都重新打开并扫描文件，操作之间不共享解析状态
//! - 单类型读取（`single_*`、`vibrational_modes`）不带来源标签；
//!   多类型读取（`multi_*`）附加由目录约定恢复的 `RunInfo`
//!
//! ## 依赖关系
//! - 被 `experiment/`, `commands/`, `thermo.rs` 使用
//! - 使用 `parsers/sections.rs` 定位段落
//! - 使用 `parsers/run_path.rs` 恢复来源信息

use super::{run_path, sections};
use crate::error::{HarvestError, Result};
use crate::models::{
    Atom, Coordinate, EnergySurface, Geometry, PopulationMethod, PopulationRow, PopulationTable,
    Quantity, RunInfo, RunRecord, SurfaceRow, SurfaceType, Unit, VibrationalMode,
    VibrationalSpectrum,
};

use log::debug;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// 单个 ORCA 输出文件的只读视图
#[derive(Debug, Clone)]
pub struct OrcaOutput {
    path: PathBuf,
    declared_evaluations: Option<usize>,
}

impl OrcaOutput {
    /// 打开输出文件并扫描头部声明的能量计算次数
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| HarvestError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut declared_evaluations = None;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| HarvestError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?;

            if let Some(caps) = sections::DECLARED_EVALUATIONS.captures(&line) {
                declared_evaluations =
                    Some(caps[1].parse().map_err(|_| HarvestError::InvalidNumber {
                        token: caps[1].to_string(),
                        path: path.display().to_string(),
                    })?);
                break;
            }
            // 声明总在第一次能量计算之前
            if sections::FINAL_ENERGY.is_match(&line) {
                break;
            }
        }

        debug!(
            "opened {} (declared evaluations: {:?})",
            path.display(),
            declared_evaluations
        );

        Ok(OrcaOutput {
            path,
            declared_evaluations,
        })
    }

    /// 文件头部声明的能量计算次数
    pub fn declared_evaluations(&self) -> Option<usize> {
        self.declared_evaluations
    }

    /// 由目录命名约定恢复的来源信息
    pub fn run_info(&self) -> Result<RunInfo> {
        run_path::run_info_for_file(&self.path)
    }

    // ─────────────────────────────────────────────────────────────
    // 标量与几何
    // ─────────────────────────────────────────────────────────────

    /// 最后一个 "FINAL SINGLE POINT ENERGY" (hartree)
    pub fn final_energy(&self) -> Result<Quantity> {
        let content = self.read()?;

        let last = content
            .lines()
            .filter_map(|line| sections::FINAL_ENERGY.captures(line))
            .last()
            .ok_or_else(|| HarvestError::EnergyNotFound {
                path: self.display(),
            })?;

        Ok(Quantity::hartree(self.parse_float(&last[1])?))
    }

    /// 最后一个 "CARTESIAN COORDINATES (ANGSTROEM)" 块
    pub fn final_geometry(&self) -> Result<Geometry> {
        let content = self.read()?;
        let lines: Vec<&str> = content.lines().collect();

        let start = lines
            .iter()
            .rposition(|line| sections::GEOMETRY_HEADER.is_match(line))
            .ok_or_else(|| HarvestError::GeometryNotFound {
                path: self.display(),
            })?;

        let mut atoms = Vec::new();
        for line in &lines[start + 1..] {
            if atoms.is_empty() && sections::is_separator(line) {
                continue;
            }
            let Some((element, xyz)) = sections::geometry_row(line) else {
                break;
            };
            atoms.push(Atom::new(
                element,
                [
                    self.parse_float(xyz[0])?,
                    self.parse_float(xyz[1])?,
                    self.parse_float(xyz[2])?,
                ],
            ));
        }

        if atoms.is_empty() {
            return Err(HarvestError::GeometryNotFound {
                path: self.display(),
            });
        }

        Ok(Geometry::new(atoms))
    }

    /// 构造完整的运行记录
    pub fn run_record(&self) -> Result<RunRecord> {
        Ok(RunRecord {
            info: self.run_info()?,
            final_energy: self.final_energy()?,
            final_geometry: self.final_geometry()?,
            path: self.path.clone(),
        })
    }

    /// 最后一个 "Final Gibbs free energy" (hartree)
    pub fn gibbs_free_energy(&self) -> Result<Quantity> {
        let content = self.read()?;

        let last = content
            .lines()
            .filter_map(|line| sections::GIBBS_FREE_ENERGY.captures(line))
            .last()
            .ok_or_else(|| HarvestError::ThermoNotFound {
                path: self.display(),
            })?;

        Ok(Quantity::hartree(self.parse_float(&last[1])?))
    }

    // ─────────────────────────────────────────────────────────────
    // 能量面
    // ─────────────────────────────────────────────────────────────

    /// 读取一种能量面
    ///
    /// 从第一个标记行之后读取 `n_points` 行 "坐标 能量"，默认使用文件声明的
    /// 计算次数。不足 `n_points` 行时报错，不截断。
    pub fn single_energy_surface(
        &self,
        kind: SurfaceType,
        n_points: Option<usize>,
    ) -> Result<EnergySurface> {
        let n_points = n_points.or(self.declared_evaluations).ok_or_else(|| {
            HarvestError::MissingEvaluationCount {
                path: self.display(),
            }
        })?;

        let content = self.read()?;
        let lines: Vec<&str> = content.lines().collect();

        let marker = sections::surface_marker(kind);
        let start = lines
            .iter()
            .position(|line| marker.is_match(line))
            .ok_or_else(|| HarvestError::SurfaceNotFound {
                surface: kind.to_string(),
                path: self.display(),
            })?;

        let mut rows = Vec::with_capacity(n_points);
        for line in lines.iter().skip(start + 1).take(n_points) {
            let Some((coord, energy)) = sections::surface_point(line) else {
                break;
            };
            // 坐标不是数值说明块已经结束
            let Ok(value) = coord.parse::<f64>() else {
                break;
            };
            rows.push(SurfaceRow {
                coordinate: Coordinate {
                    raw: coord.to_string(),
                    value,
                },
                energies: vec![self.parse_float(energy)?],
            });
        }

        if rows.len() < n_points {
            return Err(HarvestError::ShortSurface {
                surface: kind.to_string(),
                path: self.display(),
                expected: n_points,
                found: rows.len(),
            });
        }

        debug!("{}: read {} points of '{}'", self.display(), rows.len(), kind);

        Ok(EnergySurface {
            kinds: vec![kind],
            rows,
            run: None,
        })
    }

    /// 读取多种能量面并按坐标原始文本做内连接
    pub fn multi_energy_surface(
        &self,
        kinds: &[SurfaceType],
        n_points: Option<usize>,
    ) -> Result<EnergySurface> {
        let mut unique: Vec<SurfaceType> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !unique.contains(kind) {
                unique.push(*kind);
            }
        }

        if unique.is_empty() {
            return Err(HarvestError::InvalidArgument(
                "at least one surface type is required".to_string(),
            ));
        }

        let run = self.run_info()?;

        let mut tables = unique
            .iter()
            .map(|&kind| self.single_energy_surface(kind, n_points))
            .collect::<Result<Vec<_>>>()?;

        // 只请求一种时直接返回
        let first = tables.remove(0);
        let joined = tables.into_iter().fold(first, join_on_coordinate);

        Ok(joined.tagged(run))
    }

    // ─────────────────────────────────────────────────────────────
    // 布居分析
    // ─────────────────────────────────────────────────────────────

    /// 读取一种布居分析的所有步骤
    pub fn single_population_analysis(&self, method: PopulationMethod) -> Result<PopulationTable> {
        let content = self.read()?;
        let mut lines = content.lines();

        let mut rows: Vec<PopulationRow> = Vec::new();
        let mut found = false;
        let mut open_shell = false;
        let mut first_anum: Option<usize> = None;
        let mut step = 0;

        while let Some(line) = lines.next() {
            let Some(spin_block) = sections::population_header(method, line) else {
                continue;
            };
            found = true;
            open_shell |= spin_block;

            let mut in_rows = false;
            for row_line in lines.by_ref() {
                let Some(raw) = sections::population_row(row_line) else {
                    // 标题下方的分隔线
                    if !in_rows && sections::is_separator(row_line) {
                        continue;
                    }
                    if in_rows && !sections::is_population_footer(row_line) {
                        debug!("{}: {} block ended by '{}'", self.display(), method, row_line.trim());
                    }
                    break;
                };
                in_rows = true;

                let anum: usize = raw.anum.parse().map_err(|_| HarvestError::InvalidNumber {
                    token: raw.anum.to_string(),
                    path: self.display(),
                })?;

                // 同一原子序号再次出现即进入下一步
                let first = *first_anum.get_or_insert(anum);
                if anum == first {
                    step += 1;
                }

                let pspin = match (spin_block, raw.spin) {
                    (true, Some(spin)) => Some(self.parse_float(spin)?),
                    (true, None) => {
                        return Err(self.inconsistent(
                            method,
                            format!("atom {} has no spin population", anum),
                        ))
                    }
                    (false, _) => None,
                };

                rows.push(PopulationRow {
                    anum,
                    atype: raw.atype.to_string(),
                    pcharge: self.parse_float(raw.charge)?,
                    pspin,
                    step,
                    method,
                });
            }
        }

        if !found {
            return Err(HarvestError::PopulationNotFound {
                method: method.to_string(),
                path: self.display(),
            });
        }
        if rows.is_empty() {
            return Err(self.inconsistent(method, "header without atom rows".to_string()));
        }
        if rows.iter().any(|r| r.pspin.is_some() != open_shell) {
            return Err(self.inconsistent(
                method,
                "mixed closed- and open-shell blocks".to_string(),
            ));
        }
        self.check_steps(method, &rows)?;

        debug!(
            "{}: {} {} rows over {} steps",
            self.display(),
            rows.len(),
            method,
            step
        );

        Ok(PopulationTable {
            rows,
            open_shell,
            run: None,
        })
    }

    /// 多种布居分析按行拼接，附加来源标签
    pub fn multi_population_analysis(&self, methods: &[PopulationMethod]) -> Result<PopulationTable> {
        if methods.is_empty() {
            return Err(HarvestError::InvalidArgument(
                "at least one population method is required".to_string(),
            ));
        }

        let run = self.run_info()?;

        let mut rows = Vec::new();
        let mut open_shell = false;
        for &method in methods {
            let table = self.single_population_analysis(method)?;
            open_shell |= table.open_shell;
            rows.extend(table.rows);
        }

        let table = PopulationTable {
            rows,
            open_shell,
            run: None,
        };
        Ok(table.tagged(run))
    }

    /// 每一步的原子数和 (序号, 元素) 序列必须一致
    fn check_steps(&self, method: PopulationMethod, rows: &[PopulationRow]) -> Result<()> {
        let mut by_step: HashMap<usize, Vec<(usize, &str)>> = HashMap::new();
        for row in rows {
            by_step
                .entry(row.step)
                .or_default()
                .push((row.anum, row.atype.as_str()));
        }

        let Some(reference) = by_step.get(&1) else {
            return Ok(());
        };

        for (step, atoms) in &by_step {
            if atoms != reference {
                return Err(self.inconsistent(
                    method,
                    format!(
                        "step {} lists {} atoms, step 1 lists {}",
                        step,
                        atoms.len(),
                        reference.len()
                    ),
                ));
            }
        }

        Ok(())
    }

    fn inconsistent(&self, method: PopulationMethod, reason: String) -> HarvestError {
        HarvestError::InconsistentPopulation {
            method: method.to_string(),
            path: self.display(),
            reason,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // IR 光谱
    // ─────────────────────────────────────────────────────────────

    /// 带来源标签的 IR 光谱；目录不符合命名约定时返回 `PathStructure`
    pub fn vibrational_modes(&self) -> Result<VibrationalSpectrum> {
        let run = self.run_info()?;
        Ok(self.single_vibrational_modes()?.tagged(run))
    }

    /// 读取第一个 "IR SPECTRUM" 块（不带来源标签）
    ///
    /// 括号前有两个数值时为 `freq T**2`，四个数值时为 `freq eps Int T**2`，
    /// 后者取 `Int` (km/mol) 作为强度。
    pub fn single_vibrational_modes(&self) -> Result<VibrationalSpectrum> {
        let content = self.read()?;
        let lines: Vec<&str> = content.lines().collect();

        let start = lines
            .iter()
            .position(|line| sections::IR_HEADER.is_match(line))
            .ok_or_else(|| HarvestError::SpectrumNotFound {
                path: self.display(),
            })?;

        let mut modes = Vec::new();
        for (offset, line) in lines[start + 1..].iter().enumerate() {
            let Some(raw) = sections::ir_row(line) else {
                if !modes.is_empty() || offset > sections::IR_PREAMBLE_LINES {
                    break;
                }
                continue;
            };

            let intensity = match raw.values.len() {
                0 => {
                    return Err(HarvestError::InvalidNumber {
                        token: line.trim().to_string(),
                        path: self.display(),
                    })
                }
                n if n >= 4 => raw.values[2],
                n => raw.values[n - 1],
            };

            modes.push(VibrationalMode {
                mode: raw.mode.parse().map_err(|_| HarvestError::InvalidNumber {
                    token: raw.mode.to_string(),
                    path: self.display(),
                })?,
                freq: Quantity::new(
                    self.parse_float(raw.values[0])?,
                    Unit::ReciprocalCentimeter,
                ),
                t2: Quantity::new(self.parse_float(intensity)?, Unit::KmPerMol),
                tx: self.parse_float(raw.dipole[0])?,
                ty: self.parse_float(raw.dipole[1])?,
                tz: self.parse_float(raw.dipole[2])?,
            });
        }

        if modes.is_empty() {
            return Err(HarvestError::SpectrumNotFound {
                path: self.display(),
            });
        }

        debug!("{}: {} IR modes", self.display(), modes.len());
        Ok(VibrationalSpectrum { modes, run: None })
    }

    // ─────────────────────────────────────────────────────────────
    // 内部工具
    // ─────────────────────────────────────────────────────────────

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| HarvestError::FileReadError {
            path: self.display(),
            source: e,
        })
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }

    /// 解析浮点数，兼容 Fortran 的 D 指数
    fn parse_float(&self, token: &str) -> Result<f64> {
        token
            .replace(['D', 'd'], "E")
            .parse()
            .map_err(|_| HarvestError::InvalidNumber {
                token: token.to_string(),
                path: self.display(),
            })
    }
}

/// 按坐标原始文本做内连接，保持左表顺序
fn join_on_coordinate(left: EnergySurface, right: EnergySurface) -> EnergySurface {
    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows.iter().enumerate() {
        index.entry(row.coordinate.raw.as_str()).or_default().push(i);
    }

    let mut rows = Vec::with_capacity(left.rows.len());
    for row in &left.rows {
        let Some(matches) = index.get(row.coordinate.raw.as_str()) else {
            continue;
        };
        for &i in matches {
            let mut energies = row.energies.clone();
            energies.extend_from_slice(&right.rows[i].energies);
            rows.push(SurfaceRow {
                coordinate: row.coordinate.clone(),
                energies,
            });
        }
    }

    let mut kinds = left.kinds;
    kinds.extend(right.kinds);

    EnergySurface {
        kinds,
        rows,
        run: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, H2O_FREQ, QCISDT_MDCI, QCISDT_SCAN, UHF_SCAN};
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    const QCISDT_DIR: &str = "H2_test/QCISD(T)/spin_01/ENERGY/3-21G";
    const UHF_DIR: &str = "H2_test/UHF/spin_03/ENERGY/3-21G";
    const H2O_DIR: &str = "h2o/B3LYP/spin_01/FREQ/6-31G8";

    fn open_fixture(run_dir: &str, content: &str) -> (TempDir, OrcaOutput) {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_run(dir.path(), run_dir, content);
        let output = OrcaOutput::open(path).unwrap();
        (dir, output)
    }

    #[test]
    fn test_open_missing_file() {
        let err = OrcaOutput::open("/no/such/orca.out").unwrap_err();
        assert!(matches!(err, HarvestError::FileReadError { .. }));
    }

    #[test]
    fn test_declared_evaluations() {
        let (_dir, scan) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        assert_eq!(scan.declared_evaluations(), Some(33));

        let (_dir, freq) = open_fixture(H2O_DIR, H2O_FREQ);
        assert_eq!(freq.declared_evaluations(), None);
    }

    #[test]
    fn test_run_info_from_layout() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let info = output.run_info().unwrap();
        assert_eq!(info.slug, "H2_test");
        assert_eq!(info.theory, "QCISD(T)");
        assert_eq!(info.spin, "spin_01");
        assert_eq!(info.calc, "ENERGY");
        assert_eq!(info.basis, "3-21G");
    }

    #[test]
    fn test_final_energy() {
        let (_dir, qcisdt) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let energy = qcisdt.final_energy().unwrap();
        assert_relative_eq!(energy.value, -1.01010039);
        assert_eq!(energy.unit, Unit::Hartree);

        let (_dir, uhf) = open_fixture(UHF_DIR, UHF_SCAN);
        assert_relative_eq!(uhf.final_energy().unwrap().value, -0.907804773703);
    }

    #[test]
    fn test_missing_sections() {
        let (_dir, output) = open_fixture(QCISDT_DIR, "no results here\n");
        assert!(matches!(
            output.final_energy(),
            Err(HarvestError::EnergyNotFound { .. })
        ));
        assert!(matches!(
            output.final_geometry(),
            Err(HarvestError::GeometryNotFound { .. })
        ));
        assert!(matches!(
            output.run_record(),
            Err(HarvestError::EnergyNotFound { .. })
        ));
        assert!(matches!(
            output.single_energy_surface(SurfaceType::ScfEnergy, None),
            Err(HarvestError::MissingEvaluationCount { .. })
        ));
        assert!(matches!(
            output.single_energy_surface(SurfaceType::ScfEnergy, Some(3)),
            Err(HarvestError::SurfaceNotFound { .. })
        ));
        assert!(matches!(
            output.single_population_analysis(PopulationMethod::Mulliken),
            Err(HarvestError::PopulationNotFound { .. })
        ));
        assert!(matches!(
            output.vibrational_modes(),
            Err(HarvestError::SpectrumNotFound { .. })
        ));
        assert!(matches!(
            output.gibbs_free_energy(),
            Err(HarvestError::ThermoNotFound { .. })
        ));
    }

    #[test]
    fn test_final_geometry_is_last_block() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let geometry = output.final_geometry().unwrap();
        assert_eq!(geometry.len(), 2);
        assert_eq!(geometry.formula(), "H2");
        assert_relative_eq!(geometry.bond_length(0, 1).unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_water_geometry_and_gibbs() {
        let (_dir, output) = open_fixture(H2O_DIR, H2O_FREQ);
        let record = output.run_record().unwrap();
        assert_eq!(record.system(), "H2O");
        assert_eq!(record.info.basis, "6-31G*");
        assert_relative_eq!(record.final_energy.value, -76.408952714601);

        let geometry = &record.final_geometry;
        assert_relative_eq!(geometry.bond_length(0, 1).unwrap(), 0.968565, epsilon = 1e-6);
        assert_relative_eq!(geometry.bond_angle(0, 1, 2).unwrap(), 104.0, epsilon = 1e-3);

        assert_relative_eq!(output.gibbs_free_energy().unwrap().value, -76.40026393);
    }

    // ─────────────────────────────────────────────────────────────
    // 能量面
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn test_surface_reads_declared_points() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        for kind in SurfaceType::ALL {
            let surface = output.single_energy_surface(kind, None).unwrap();
            assert_eq!(surface.len(), 33, "{kind}");
            assert_eq!(surface.kinds, vec![kind]);
            assert!(surface.run.is_none());
        }
    }

    #[test]
    fn test_surface_default_matches_explicit() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let implicit = output.single_energy_surface(SurfaceType::Mdci, None).unwrap();
        let explicit = output
            .single_energy_surface(SurfaceType::Mdci, Some(33))
            .unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_surface_too_many_points() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        match output
            .single_energy_surface(SurfaceType::ActualEnergy, Some(34))
            .unwrap_err()
        {
            HarvestError::ShortSurface {
                expected, found, ..
            } => {
                assert_eq!(expected, 34);
                assert_eq!(found, 33);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_surface_fewer_points_on_request() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let surface = output
            .single_energy_surface(SurfaceType::ScfEnergy, Some(5))
            .unwrap();
        assert_eq!(surface.len(), 5);
        assert_eq!(surface.rows[4].coordinate.raw, "0.60000000");
    }

    #[test]
    fn test_mdci_regression() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let surface = output.single_energy_surface(SurfaceType::Mdci, None).unwrap();

        for (row, expected) in surface.rows.iter().zip(fixtures::scan_coordinates()) {
            assert_relative_eq!(row.coordinate.value, expected, epsilon = 1e-9);
        }
        assert_eq!(
            surface.energies(SurfaceType::Mdci).unwrap(),
            QCISDT_MDCI.to_vec()
        );

        let no_triples = output
            .single_energy_surface(SurfaceType::MdciNoTriples, None)
            .unwrap()
            .energies(SurfaceType::MdciNoTriples)
            .unwrap();
        assert_relative_eq!(no_triples[0], -5.94138797);
        assert_eq!(&no_triples[1..], &QCISDT_MDCI[1..]);
    }

    #[test]
    fn test_single_and_multi_agree() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let single = output.single_energy_surface(SurfaceType::Mdci, None).unwrap();
        let multi = output
            .multi_energy_surface(&[SurfaceType::Mdci], None)
            .unwrap();

        assert_eq!(multi.rows, single.rows);
        assert_eq!(multi.kinds, single.kinds);
        assert_eq!(multi.run, Some(output.run_info().unwrap()));
    }

    #[test]
    fn test_multi_surface_columns() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let multi = output
            .multi_energy_surface(&[SurfaceType::Mdci, SurfaceType::ScfEnergy], None)
            .unwrap();

        assert_eq!(multi.len(), 33);
        assert_eq!(
            multi.columns(),
            vec![
                "bond_length",
                "MDCI",
                "SCF Energy",
                "basis",
                "calc",
                "spin",
                "theory",
                "slug"
            ]
        );
        assert_eq!(
            multi.energies(SurfaceType::Mdci).unwrap(),
            QCISDT_MDCI.to_vec()
        );
        assert_eq!(
            multi.energies(SurfaceType::ScfEnergy),
            output
                .single_energy_surface(SurfaceType::ScfEnergy, None)
                .unwrap()
                .energies(SurfaceType::ScfEnergy)
        );
    }

    #[test]
    fn test_multi_surface_dedups_and_rejects_empty() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let multi = output
            .multi_energy_surface(&[SurfaceType::Mdci, SurfaceType::Mdci], None)
            .unwrap();
        assert_eq!(multi.kinds, vec![SurfaceType::Mdci]);

        assert!(matches!(
            output.multi_energy_surface(&[], None),
            Err(HarvestError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_not_found_differs_from_unknown() {
        let (_dir, uhf) = open_fixture(UHF_DIR, UHF_SCAN);
        assert!(matches!(
            uhf.single_energy_surface(SurfaceType::Mdci, None),
            Err(HarvestError::SurfaceNotFound { .. })
        ));
        assert!(matches!(
            "Squid".parse::<SurfaceType>(),
            Err(HarvestError::UnknownSurfaceType(_))
        ));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let kinds = [SurfaceType::ActualEnergy, SurfaceType::ScfEnergy];
        assert_eq!(
            output.multi_energy_surface(&kinds, None).unwrap(),
            output.multi_energy_surface(&kinds, None).unwrap()
        );
        assert_eq!(
            output
                .single_population_analysis(PopulationMethod::Loewdin)
                .unwrap(),
            output
                .single_population_analysis(PopulationMethod::Loewdin)
                .unwrap()
        );
    }

    #[test]
    fn test_fortran_exponent() {
        let content = "There will be 2 energy evaluations\n\
                       The Calculated Surface using the SCF energy\n\
                       0.50 -0.11D+01\n\
                       0.60 -1.2E+00\n";
        let (_dir, output) = open_fixture(QCISDT_DIR, content);
        let surface = output
            .single_energy_surface(SurfaceType::ScfEnergy, None)
            .unwrap();
        assert_eq!(surface.energies(SurfaceType::ScfEnergy).unwrap(), vec![-1.1, -1.2]);
    }

    #[test]
    fn test_join_on_raw_token() {
        let row = |raw: &str, e: f64| SurfaceRow {
            coordinate: Coordinate {
                raw: raw.to_string(),
                value: raw.parse().unwrap(),
            },
            energies: vec![e],
        };
        let left = EnergySurface {
            kinds: vec![SurfaceType::Mdci],
            rows: vec![row("0.50", -1.0), row("0.60", -1.1)],
            run: None,
        };
        let right = EnergySurface {
            kinds: vec![SurfaceType::ScfEnergy],
            rows: vec![row("0.6", -0.9), row("0.50", -0.8)],
            run: None,
        };

        let joined = join_on_coordinate(left, right);
        assert_eq!(joined.kinds, vec![SurfaceType::Mdci, SurfaceType::ScfEnergy]);
        assert_eq!(joined.rows.len(), 1);
        assert_eq!(joined.rows[0].energies, vec![-1.0, -0.8]);
    }

    // ─────────────────────────────────────────────────────────────
    // 布居分析
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn test_closed_shell_population() {
        let (_dir, output) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let table = output
            .single_population_analysis(PopulationMethod::Mulliken)
            .unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.columns().len(), 5);
        assert!(!table.open_shell);
        assert_eq!(table.steps(), 2);
        assert!(table.run.is_none());

        let steps: Vec<usize> = table.rows.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![1, 1, 2, 2]);
        assert!(table.rows.iter().all(|r| r.pcharge == 0.0 && r.pspin.is_none()));
    }

    #[test]
    fn test_open_shell_population() {
        let (_dir, output) = open_fixture(UHF_DIR, UHF_SCAN);
        let table = output
            .single_population_analysis(PopulationMethod::Mulliken)
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns(),
            vec!["anum", "atype", "pcharge", "pspin", "step", "population"]
        );
        assert!(table.rows.iter().all(|r| r.pspin == Some(0.0)));
    }

    #[test]
    fn test_multi_population() {
        let (_dir, qcisdt) = open_fixture(QCISDT_DIR, QCISDT_SCAN);
        let table = qcisdt
            .multi_population_analysis(&PopulationMethod::ALL)
            .unwrap();
        assert_eq!((table.len(), table.columns().len()), (8, 10));
        assert_eq!(table.rows[0].method, PopulationMethod::Mulliken);
        assert_eq!(table.rows[7].method, PopulationMethod::Loewdin);

        let (_dir, uhf) = open_fixture(UHF_DIR, UHF_SCAN);
        let table = uhf.multi_population_analysis(&PopulationMethod::ALL).unwrap();
        assert_eq!((table.len(), table.columns().len()), (4, 11));
    }

    #[test]
    fn test_water_charges() {
        let (_dir, output) = open_fixture(H2O_DIR, H2O_FREQ);
        let table = output
            .single_population_analysis(PopulationMethod::Loewdin)
            .unwrap();
        let charges: Vec<f64> = table.rows.iter().map(|r| r.pcharge).collect();
        assert_eq!(charges, vec![-0.51276, 0.25638, 0.25638]);
        assert_eq!(table.rows[0].atype, "O");
        assert!(matches!(
            "Hirshfeld".parse::<PopulationMethod>(),
            Err(HarvestError::UnknownPopulationMethod(_))
        ));
    }

    #[test]
    fn test_inconsistent_steps() {
        let content = "\
MULLIKEN ATOMIC CHARGES
-----------------------
   0 H :    0.000000
   1 H :    0.000000
Sum of atomic charges:    0.0000000

MULLIKEN ATOMIC CHARGES
-----------------------
   0 H :    0.100000
   1 H :   -0.050000
   2 H :   -0.050000
Sum of atomic charges:    0.0000000
";
        let (_dir, output) = open_fixture(QCISDT_DIR, content);
        assert!(matches!(
            output.single_population_analysis(PopulationMethod::Mulliken),
            Err(HarvestError::InconsistentPopulation { .. })
        ));
    }

    // ─────────────────────────────────────────────────────────────
    // IR 光谱
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn test_ir_spectrum_orca4() {
        let (_dir, output) = open_fixture(H2O_DIR, H2O_FREQ);
        let spectrum = output.vibrational_modes().unwrap();

        assert_eq!(spectrum.len(), 3);
        assert_eq!(
            spectrum.modes.iter().map(|m| m.mode).collect::<Vec<_>>(),
            vec![6, 7, 8]
        );
        let freqs: Vec<f64> = spectrum.modes.iter().map(|m| m.freq.value).collect();
        assert_eq!(freqs, vec![1639.47, 3807.28, 3903.73]);
        assert_relative_eq!(spectrum.modes[0].t2.value, 78.465356);
        assert_eq!(spectrum.modes[0].t2.unit, Unit::KmPerMol);
        assert_relative_eq!(spectrum.modes[2].tz, -4.592116);
        assert_eq!(spectrum.run, Some(output.run_info().unwrap()));
        assert_eq!(
            VibrationalSpectrum::COLUMNS.len() + RunInfo::COLUMNS.len(),
            11
        );
    }

    #[test]
    fn test_ir_spectrum_orca5() {
        let content = "\
-----------
IR SPECTRUM
-----------

 Mode   freq       eps      Int      T**2         TX        TY        TZ
       cm**-1   L/(mol*cm) km/mol    a.u.
----------------------------------------------------------------------------
  6:   1627.38   0.012345   62.39  0.003880  ( -0.000000 -0.062290  0.000000)
  7:   3807.28   0.000910    4.60  0.000075  ( -0.000000  0.008660  0.000000)

";
        let (_dir, output) = open_fixture(H2O_DIR, content);
        let spectrum = output.vibrational_modes().unwrap();
        assert_eq!(spectrum.len(), 2);
        assert_relative_eq!(spectrum.modes[0].t2.value, 62.39);
        assert_relative_eq!(spectrum.modes[1].freq.value, 3807.28);
    }

    #[test]
    fn test_ir_spectrum_outside_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_file(dir.path(), "x/orca.out", H2O_FREQ);
        let output = OrcaOutput::open(path).unwrap();

        assert!(matches!(
            output.vibrational_modes(),
            Err(HarvestError::PathStructure { .. })
        ));
        let spectrum = output.single_vibrational_modes().unwrap();
        assert_eq!(spectrum.len(), 3);
        assert!(spectrum.run.is_none());
    }
}
