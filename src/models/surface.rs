//! # 能量面扫描数据模型
//!
//! 扫描坐标（如键长）与各类能量面的对应表。
//!
//! ## 依赖关系
//! - 被 `parsers/orca_out.rs`, `parsers/sections.rs` 使用
//! - 被 `experiment/`, `export.rs`, `plot.rs` 使用

use super::calculation::RunInfo;
use crate::error::HarvestError;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 能量面类型（固定枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    ActualEnergy,
    Mdci,
    MdciNoTriples,
    ScfEnergy,
}

impl SurfaceType {
    /// 全部类型，按输出列顺序
    pub const ALL: [SurfaceType; 4] = [
        SurfaceType::ActualEnergy,
        SurfaceType::Mdci,
        SurfaceType::MdciNoTriples,
        SurfaceType::ScfEnergy,
    ];

    /// 列名 / 用户可见名称
    pub fn label(&self) -> &'static str {
        match self {
            SurfaceType::ActualEnergy => "Actual Energy",
            SurfaceType::Mdci => "MDCI",
            SurfaceType::MdciNoTriples => "MDCI w/o Triples",
            SurfaceType::ScfEnergy => "SCF Energy",
        }
    }
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SurfaceType {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SurfaceType::ALL
            .iter()
            .find(|t| t.label() == s)
            .copied()
            .ok_or_else(|| HarvestError::UnknownSurfaceType(s.to_string()))
    }
}

/// 扫描坐标：保留原始文本（连接键）及其数值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub raw: String,
    pub value: f64,
}

/// 能量面的一行：坐标 + 每个请求类型的能量 (hartree)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRow {
    pub coordinate: Coordinate,
    pub energies: Vec<f64>,
}

/// 单次运行的能量面表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySurface {
    /// 能量列，顺序与 `SurfaceRow::energies` 一致
    pub kinds: Vec<SurfaceType>,
    pub rows: Vec<SurfaceRow>,
    /// 运行来源标签（单类型读取时为 None）
    pub run: Option<RunInfo>,
}

impl EnergySurface {
    /// 坐标列名
    pub const COORDINATE_COLUMN: &'static str = "bond_length";

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 附加运行来源标签
    pub fn tagged(mut self, run: RunInfo) -> Self {
        self.run = Some(run);
        self
    }

    /// 表头：坐标 + 能量列 (+ 来源列)
    pub fn columns(&self) -> Vec<String> {
        let mut cols = vec![Self::COORDINATE_COLUMN.to_string()];
        cols.extend(self.kinds.iter().map(|k| k.label().to_string()));
        if self.run.is_some() {
            cols.extend(RunInfo::COLUMNS.iter().map(|c| c.to_string()));
        }
        cols
    }

    /// 取某一能量列
    pub fn energies(&self, kind: SurfaceType) -> Option<Vec<f64>> {
        let idx = self.kinds.iter().position(|k| *k == kind)?;
        Some(self.rows.iter().map(|r| r.energies[idx]).collect())
    }
}
