//! # 布居分析数据模型
//!
//! Mulliken / Loewdin 原子电荷（开壳层时附带自旋布居）。
//!
//! ## 依赖关系
//! - 被 `parsers/orca_out.rs` 使用
//! - 被 `experiment/`, `export.rs` 使用

use super::calculation::RunInfo;
use crate::error::HarvestError;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 布居分析方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationMethod {
    Mulliken,
    Loewdin,
}

impl PopulationMethod {
    pub const ALL: [PopulationMethod; 2] = [PopulationMethod::Mulliken, PopulationMethod::Loewdin];

    pub fn label(&self) -> &'static str {
        match self {
            PopulationMethod::Mulliken => "Mulliken",
            PopulationMethod::Loewdin => "Loewdin",
        }
    }
}

impl std::fmt::Display for PopulationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PopulationMethod {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PopulationMethod::ALL
            .iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| HarvestError::UnknownPopulationMethod(s.to_string()))
    }
}

/// 一个原子在一个步骤中的布居
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationRow {
    /// 原子序号（输出中从 0 开始）
    pub anum: usize,
    pub atype: String,
    /// 部分电荷
    pub pcharge: f64,
    /// 自旋布居，仅开壳层
    pub pspin: Option<f64>,
    /// 优化步（从 1 开始）
    pub step: usize,
    pub method: PopulationMethod,
}

/// 单次运行的布居分析表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationTable {
    pub rows: Vec<PopulationRow>,
    /// 是否含自旋布居列
    pub open_shell: bool,
    pub run: Option<RunInfo>,
}

impl PopulationTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn tagged(mut self, run: RunInfo) -> Self {
        self.run = Some(run);
        self
    }

    /// 最大步数
    pub fn steps(&self) -> usize {
        self.rows.iter().map(|r| r.step).max().unwrap_or(0)
    }

    pub fn columns(&self) -> Vec<String> {
        let mut cols: Vec<String> = vec!["anum".into(), "atype".into(), "pcharge".into()];
        if self.open_shell {
            cols.push("pspin".into());
        }
        cols.push("step".into());
        cols.push("population".into());
        if self.run.is_some() {
            cols.extend(RunInfo::COLUMNS.iter().map(|c| c.to_string()));
        }
        cols
    }
}
