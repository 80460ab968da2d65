//! # 数据模型模块
//!
//! 定义运行记录、几何、能量面、布居分析、振动光谱等类型化表格。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `experiment/` 和 `commands/` 使用
//! - 子模块: calculation, structure, surface, population, spectrum, units

pub mod calculation;
pub mod population;
pub mod spectrum;
pub mod structure;
pub mod surface;
pub mod units;

pub use calculation::{RunInfo, RunRecord};
pub use population::{PopulationMethod, PopulationRow, PopulationTable};
pub use spectrum::{VibrationalMode, VibrationalSpectrum};
pub use structure::{Atom, Geometry};
pub use surface::{Coordinate, EnergySurface, SurfaceRow, SurfaceType};
pub use units::{Quantity, Unit};

use serde::{Deserialize, Serialize};

/// 带运行来源标签的一行（实验级表格使用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tagged<R> {
    pub run: RunInfo,
    pub row: R,
}

impl<R> Tagged<R> {
    pub fn new(run: RunInfo, row: R) -> Self {
        Tagged { run, row }
    }
}
