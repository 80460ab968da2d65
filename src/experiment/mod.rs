//! # 实验级聚合
//!
//! 在一个实验根目录下发现所有 ORCA 输出，逐个交给 `OrcaOutput` 读取，
//! 合并为带来源标签的表并按 (理论方法, 基组, ...) 排序。
//!
//! ## 功能
//! - 输出文件发现（有序，排除调度器日志）
//! - 最终能量、能量面、布居分析、IR 光谱四类表
//! - 并行读取，任一运行失败即中止整个聚合
//!
//! ## 约定
//! - 不缓存：每次请求表都重新读取文件
//! - 排序是稳定的，相同键保持发现顺序（路径字典序）
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `parsers/`, `batch/`, `config.rs`
//! - 子模块: ordering

pub mod ordering;

use crate::batch::{BatchRunner, FileCollector};
use crate::config::ExperimentConfig;
use crate::error::{HarvestError, Result};
use crate::models::{
    PopulationMethod, PopulationRow, RunInfo, RunRecord, SurfaceRow, SurfaceType, Tagged,
    VibrationalMode,
};
use crate::parsers::OrcaOutput;
use ordering::CategoryOrdering;

use log::{debug, info};
use std::path::{Path, PathBuf};

/// 未指定时请求的能量面
///
/// 只取每种理论方法都会输出的两种；MDCI 分解只有相关方法才有，
/// 默认包含它们会让含 HF/UHF 运行的实验整体失败。
pub const DEFAULT_SURFACES: [SurfaceType; 2] = [SurfaceType::ActualEnergy, SurfaceType::ScfEnergy];

/// 实验级能量面表
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentSurface {
    /// 能量列，顺序与每行 `energies` 一致
    pub kinds: Vec<SurfaceType>,
    pub rows: Vec<Tagged<SurfaceRow>>,
}

impl ExperimentSurface {
    pub fn columns(&self) -> Vec<String> {
        let mut cols = vec![crate::models::EnergySurface::COORDINATE_COLUMN.to_string()];
        cols.extend(self.kinds.iter().map(|k| k.label().to_string()));
        cols.extend(RunInfo::COLUMNS.iter().map(|c| c.to_string()));
        cols
    }

    /// 按运行分组（保持表内顺序）
    pub fn runs(&self) -> Vec<(&RunInfo, Vec<&SurfaceRow>)> {
        let mut groups: Vec<(&RunInfo, Vec<&SurfaceRow>)> = Vec::new();
        for tagged in &self.rows {
            match groups.iter_mut().find(|(run, _)| *run == &tagged.run) {
                Some((_, rows)) => rows.push(&tagged.row),
                None => groups.push((&tagged.run, vec![&tagged.row])),
            }
        }
        groups
    }
}

/// 实验级布居分析表
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentPopulation {
    /// 任一运行为开壳层即含 `pspin` 列
    pub open_shell: bool,
    pub rows: Vec<Tagged<PopulationRow>>,
}

impl ExperimentPopulation {
    pub fn columns(&self) -> Vec<String> {
        let mut cols: Vec<String> = vec!["anum".into(), "atype".into(), "pcharge".into()];
        if self.open_shell {
            cols.push("pspin".into());
        }
        cols.push("step".into());
        cols.push("population".into());
        cols.extend(RunInfo::COLUMNS.iter().map(|c| c.to_string()));
        cols
    }
}

/// 一个实验目录
pub struct Experiment {
    root: PathBuf,
    files: Vec<PathBuf>,
    ordering: CategoryOrdering,
    runner: BatchRunner,
}

impl Experiment {
    /// 使用配置中的文件标记、词表和并行度发现输出文件
    ///
    /// 根目录先解析为绝对路径，运行来源总能取到完整的五层目录。
    pub fn from_config(root: impl AsRef<Path>, config: &ExperimentConfig) -> Result<Self> {
        let root = resolve_root(root.as_ref())?;
        let collector = FileCollector::new(root.clone())
            .with_include(&config.include_pattern())?
            .with_exclude(&config.exclude_pattern())?;
        let ordering = config.ordering()?;
        let runner = BatchRunner::new(config.jobs);

        let files = collector.collect()?;
        info!(
            "found {} output files under {} ({} readers)",
            files.len(),
            root.display(),
            runner.jobs()
        );

        Ok(Experiment {
            root,
            files,
            ordering,
            runner,
        })
    }

    /// 读取时是否显示进度条
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.runner = self.runner.with_progress(progress);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 发现的输出文件（路径字典序）
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    // ─────────────────────────────────────────────────────────────
    // 表
    // ─────────────────────────────────────────────────────────────

    /// 每个运行的最终能量，按 (理论方法, 基组, 能量) 排序
    pub fn final_energies(&self) -> Result<Vec<RunRecord>> {
        let mut records = self.runner.try_run(&self.files, |file| {
            let record = OrcaOutput::open(file)?.run_record()?;
            let key = self.ordering.key(&record.info)?;
            Ok((key, record))
        })?;

        records.sort_by(|(ka, a), (kb, b)| {
            ka.cmp(kb)
                .then(a.final_energy.value.total_cmp(&b.final_energy.value))
        });

        Ok(records.into_iter().map(|(_, record)| record).collect())
    }

    /// 每个运行的能量面，按 (理论方法, 基组, 坐标) 排序
    ///
    /// `kinds` 为空时取 [`DEFAULT_SURFACES`]，而不是全部四种。
    /// 任一运行缺少请求的能量面时整个聚合失败。
    pub fn energy_surface(&self, kinds: &[SurfaceType]) -> Result<ExperimentSurface> {
        let kinds = if kinds.is_empty() {
            DEFAULT_SURFACES.to_vec()
        } else {
            kinds.to_vec()
        };

        let tables = self.runner.try_run(&self.files, |file| {
            let surface = OrcaOutput::open(file)?.multi_energy_surface(&kinds, None)?;
            let run = self.run_of(surface.run.clone(), file)?;
            let key = self.ordering.key(&run)?;
            Ok((key, run, surface))
        })?;

        // 去重后的实际列（与 multi_energy_surface 一致）
        let columns = tables
            .first()
            .map(|(_, _, surface)| surface.kinds.clone())
            .unwrap_or_else(|| dedup_kinds(&kinds));

        let mut rows = Vec::new();
        for (key, run, surface) in tables {
            for row in surface.rows {
                rows.push((key, Tagged::new(run.clone(), row)));
            }
        }

        let mut rows = drop_duplicates(rows);
        rows.sort_by(|(ka, a), (kb, b)| {
            ka.cmp(kb)
                .then(a.row.coordinate.value.total_cmp(&b.row.coordinate.value))
        });

        debug!("energy surface: {} rows from {} runs", rows.len(), self.files.len());

        Ok(ExperimentSurface {
            kinds: columns,
            rows: rows.into_iter().map(|(_, row)| row).collect(),
        })
    }

    /// 每个运行的布居分析，按 (理论方法, 基组) 排序
    pub fn population(&self, methods: &[PopulationMethod]) -> Result<ExperimentPopulation> {
        let methods = if methods.is_empty() {
            PopulationMethod::ALL.to_vec()
        } else {
            methods.to_vec()
        };

        let tables = self.runner.try_run(&self.files, |file| {
            let table = OrcaOutput::open(file)?.multi_population_analysis(&methods)?;
            let run = self.run_of(table.run.clone(), file)?;
            let key = self.ordering.key(&run)?;
            Ok((key, run, table))
        })?;

        let mut open_shell = false;
        let mut rows = Vec::new();
        for (key, run, table) in tables {
            open_shell |= table.open_shell;
            for row in table.rows {
                rows.push((key, Tagged::new(run.clone(), row)));
            }
        }

        rows.sort_by_key(|(key, _)| *key);

        Ok(ExperimentPopulation {
            open_shell,
            rows: rows.into_iter().map(|(_, row)| row).collect(),
        })
    }

    /// 每个运行的 IR 光谱，按 (理论方法, 基组) 排序
    pub fn vibrational_spectra(&self) -> Result<Vec<Tagged<VibrationalMode>>> {
        let spectra = self.runner.try_run(&self.files, |file| {
            let spectrum = OrcaOutput::open(file)?.vibrational_modes()?;
            let run = self.run_of(spectrum.run.clone(), file)?;
            let key = self.ordering.key(&run)?;
            Ok((key, run, spectrum))
        })?;

        let mut rows = Vec::new();
        for (key, run, spectrum) in spectra {
            for mode in spectrum.modes {
                rows.push((key, Tagged::new(run.clone(), mode)));
            }
        }

        let mut rows = drop_duplicates(rows);
        rows.sort_by_key(|(key, _)| *key);

        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    fn run_of(&self, tag: Option<RunInfo>, file: &Path) -> Result<RunInfo> {
        match tag {
            Some(run) => Ok(run),
            None => crate::parsers::run_info_for_file(file),
        }
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(HarvestError::DirectoryNotFound {
            path: root.display().to_string(),
        });
    }
    root.canonicalize().map_err(|e| HarvestError::FileReadError {
        path: root.display().to_string(),
        source: e,
    })
}

/// 删除完全相同的行，保留首次出现
fn drop_duplicates<T: PartialEq>(rows: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(rows.len());
    for row in rows {
        if !unique.contains(&row) {
            unique.push(row);
        }
    }
    unique
}

fn dedup_kinds(kinds: &[SurfaceType]) -> Vec<SurfaceType> {
    let mut unique = Vec::with_capacity(kinds.len());
    for kind in kinds {
        if !unique.contains(kind) {
            unique.push(*kind);
        }
    }
    unique
}
