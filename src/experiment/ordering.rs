//! # 类别排序
//!
//! 基组与理论方法的有序词表。聚合结果按 (理论方法秩, 基组秩) 排序，
//! 不在词表中的名字直接报错，不会被悄悄排到末尾。
//!
//! ## 依赖关系
//! - 被 `experiment/mod.rs`, `config.rs` 使用
//! - 使用 `models/calculation.rs`

use crate::error::{HarvestError, Result};
use crate::models::RunInfo;

use std::collections::HashSet;

/// 默认基组顺序（由小到大）
pub const ORDERED_BASIS: [&str; 10] = [
    "STO-3G",
    "3-21G",
    "6-31G",
    "6-311G",
    "6-311G*",
    "6-311G**",
    "6-311++G**",
    "6-311++G(2d,2p)",
    "6-311++G(2df,2pd)",
    "6-311++G(3df,3pd)",
];

/// 默认理论方法顺序（由低到高）
pub const ORDERED_THEORY: [&str; 6] = ["HF", "UHF", "QCISD", "CCSD", "QCISD(T)", "CCSD(T)"];

/// 基组 / 理论方法的有序词表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOrdering {
    basis: Vec<String>,
    theory: Vec<String>,
}

impl CategoryOrdering {
    /// 由两个词表构造，拒绝空词表和重复项
    pub fn new(basis: Vec<String>, theory: Vec<String>) -> Result<Self> {
        validate("basis", &basis)?;
        validate("theory", &theory)?;
        Ok(CategoryOrdering { basis, theory })
    }

    pub fn basis_rank(&self, name: &str) -> Result<usize> {
        rank("basis", &self.basis, name)
    }

    pub fn theory_rank(&self, name: &str) -> Result<usize> {
        rank("theory", &self.theory, name)
    }

    /// 排序键 (理论方法秩, 基组秩)
    pub fn key(&self, run: &RunInfo) -> Result<(usize, usize)> {
        Ok((self.theory_rank(&run.theory)?, self.basis_rank(&run.basis)?))
    }
}

impl Default for CategoryOrdering {
    fn default() -> Self {
        CategoryOrdering {
            basis: ORDERED_BASIS.iter().map(|s| s.to_string()).collect(),
            theory: ORDERED_THEORY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn validate(kind: &str, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(HarvestError::InvalidOrdering {
            kind: kind.to_string(),
            reason: "vocabulary is empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(HarvestError::InvalidOrdering {
                kind: kind.to_string(),
                reason: format!("'{}' is listed more than once", name),
            });
        }
    }
    Ok(())
}

fn rank(kind: &str, names: &[String], name: &str) -> Result<usize> {
    names
        .iter()
        .position(|n| n == name)
        .ok_or_else(|| HarvestError::UnknownCategory {
            kind: kind.to_string(),
            name: name.to_string(),
        })
}
