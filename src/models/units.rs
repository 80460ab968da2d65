//! # 带单位的物理量
//!
//! 每个物理量在产生处就地附带单位标签，不依赖全局单位注册表。
//!
//! ## 依赖关系
//! - 被 `models/`, `parsers/orca_out.rs`, `thermo.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 单位标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Hartree,
    Angstrom,
    ReciprocalCentimeter,
    KmPerMol,
    PerSecond,
    Kelvin,
}

impl Unit {
    /// 单位符号
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Hartree => "hartree",
            Unit::Angstrom => "angstrom",
            Unit::ReciprocalCentimeter => "reciprocal_centimeter",
            Unit::KmPerMol => "kilometer / mole",
            Unit::PerSecond => "1/second",
            Unit::Kelvin => "kelvin",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 数值 + 单位
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    pub fn hartree(value: f64) -> Self {
        Quantity::new(value, Unit::Hartree)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// 四舍五入到 `decimals` 位小数
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
