//! # 振动光谱数据模型
//!
//! ## 依赖关系
//! - 被 `parsers/orca_out.rs` 使用
//! - 被 `experiment/`, `export.rs` 使用

use super::calculation::RunInfo;
use super::units::Quantity;

use serde::{Deserialize, Serialize};

/// 一个简正模
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationalMode {
    pub mode: usize,
    /// 频率 (cm⁻¹)
    pub freq: Quantity,
    /// IR 强度 (km/mol)
    pub t2: Quantity,
    /// 偶极导数分量
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
}

/// 单次运行的 IR 光谱
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationalSpectrum {
    pub modes: Vec<VibrationalMode>,
    pub run: Option<RunInfo>,
}

impl VibrationalSpectrum {
    pub const COLUMNS: [&'static str; 6] = ["mode", "freq", "t2", "tx", "ty", "tz"];

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn tagged(mut self, run: RunInfo) -> Self {
        self.run = Some(run);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    #[test]
    fn test_tagged() {
        let spectrum = VibrationalSpectrum {
            modes: vec![VibrationalMode {
                mode: 6,
                freq: Quantity::new(1639.47, Unit::ReciprocalCentimeter),
                t2: Quantity::new(78.465356, Unit::KmPerMol),
                tx: 0.0,
                ty: -8.858068,
                tz: 0.0,
            }],
            run: None,
        };

        let run = RunInfo {
            basis: "6-31G*".to_string(),
            calc: "FREQ".to_string(),
            spin: "spin_01".to_string(),
            theory: "B3LYP".to_string(),
            slug: "h2o".to_string(),
        };
        let tagged = spectrum.tagged(run.clone());
        assert_eq!(tagged.run, Some(run));
        assert_eq!(tagged.len(), 1);
    }
}
