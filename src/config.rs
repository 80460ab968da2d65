//! # 实验配置
//!
//! 从 YAML 文件加载实验级设置；每个字段都有默认值，未知字段报错。
//!
//! ```yaml
//! basis_order: [STO-3G, 3-21G, 6-31G]
//! theory_order: [HF, UHF, QCISD(T)]
//! output_marker: out
//! exclude_marker: slurm
//! jobs: 4
//! decimals: 6
//! ```
//!
//! ## 依赖关系
//! - 被 `experiment/mod.rs`, `commands/` 使用
//! - 使用 `serde` + `serde_yaml` 反序列化

use crate::error::{HarvestError, Result};
use crate::experiment::ordering::{CategoryOrdering, ORDERED_BASIS, ORDERED_THEORY};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 实验级配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// 基组顺序（由小到大）
    pub basis_order: Vec<String>,

    /// 理论方法顺序（由低到高）
    pub theory_order: Vec<String>,

    /// 输出文件名需包含的子串
    pub output_marker: String,

    /// 文件名包含此子串时跳过
    pub exclude_marker: String,

    /// 并行读取线程数（0 = 全部 CPU）
    pub jobs: usize,

    /// 显示 / 导出时能量保留的小数位
    pub decimals: Option<u32>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            basis_order: ORDERED_BASIS.iter().map(|s| s.to_string()).collect(),
            theory_order: ORDERED_THEORY.iter().map(|s| s.to_string()).collect(),
            output_marker: "out".to_string(),
            exclude_marker: "slurm".to_string(),
            jobs: 0,
            decimals: None,
        }
    }
}

impl ExperimentConfig {
    /// 读取并校验 YAML 配置文件
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| HarvestError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: ExperimentConfig =
            serde_yaml::from_str(&content).map_err(|e| HarvestError::ConfigError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        config.validate().map_err(|e| HarvestError::ConfigError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(config)
    }

    /// 检查词表与文件标记
    pub fn validate(&self) -> Result<()> {
        self.ordering()?;

        if self.output_marker.is_empty() {
            return Err(HarvestError::InvalidArgument(
                "output_marker must not be empty".to_string(),
            ));
        }
        if self.decimals.is_some_and(|d| d > 15) {
            return Err(HarvestError::InvalidArgument(
                "decimals must be between 0 and 15".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ordering(&self) -> Result<CategoryOrdering> {
        CategoryOrdering::new(self.basis_order.clone(), self.theory_order.clone())
    }

    /// 文件名包含模式
    pub fn include_pattern(&self) -> String {
        format!("*{}*", self.output_marker)
    }

    /// 文件名排除模式（空标记表示不排除）
    pub fn exclude_pattern(&self) -> String {
        if self.exclude_marker.is_empty() {
            String::new()
        } else {
            format!("*{}*", self.exclude_marker)
        }
    }
}
