//! # 计算运行数据模型
//!
//! 一次 ORCA 运行的身份（由目录命名约定恢复）及其标量结果。
//!
//! ## 依赖关系
//! - 被 `parsers/run_path.rs`, `parsers/orca_out.rs` 使用
//! - 被 `experiment/`, `commands/`, `export.rs` 使用

use super::structure::Geometry;
use super::units::Quantity;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 运行来源信息
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunInfo {
    /// 基组
    pub basis: String,

    /// 计算类型，如 ENERGY
    pub calc: String,

    /// 自旋标签，如 spin_01
    pub spin: String,

    /// 理论方法，如 QCISD(T)
    pub theory: String,

    /// 实验 / 体系标识
    pub slug: String,
}

impl RunInfo {
    /// 列名，顺序与 [`RunInfo::values`] 一致
    pub const COLUMNS: [&'static str; 5] = ["basis", "calc", "spin", "theory", "slug"];

    pub fn values(&self) -> [&str; 5] {
        [
            &self.basis,
            &self.calc,
            &self.spin,
            &self.theory,
            &self.slug,
        ]
    }
}

impl std::fmt::Display for RunInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.slug, self.theory, self.spin, self.calc, self.basis
        )
    }
}

/// 单次运行的结果记录
///
/// 只能由 `OrcaOutput::run_record` 一次性构造，找不到最终能量时构造失败。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub info: RunInfo,

    /// 最终单点能 (hartree)
    pub final_energy: Quantity,

    /// 最终几何 (Å)
    pub final_geometry: Geometry,

    /// 来源输出文件
    pub path: PathBuf,
}

impl RunRecord {
    /// 体系标签（化学式）
    pub fn system(&self) -> String {
        self.final_geometry.formula()
    }
}
