//! # 分子几何数据模型
//!
//! 输出文件中最终的笛卡尔坐标（Å），以及键长、键角、化学式等派生量。
//!
//! ## 依赖关系
//! - 被 `parsers/orca_out.rs` 使用
//! - 被 `models/calculation.rs` 使用

use serde::{Deserialize, Serialize};

/// 原子信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// 元素符号
    pub element: String,

    /// 笛卡尔坐标 [x, y, z]，单位 Å
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }
}

/// 分子几何（按输出顺序排列的原子）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub atoms: Vec<Atom>,
}

impl Geometry {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Geometry { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// 计算化学式（元素按字母序，如 `H2O`）
    pub fn formula(&self) -> String {
        use std::collections::BTreeMap;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// 两原子间距离 (Å)，索引越界返回 None
    pub fn bond_length(&self, i: usize, j: usize) -> Option<f64> {
        let a = self.atoms.get(i)?.position;
        let b = self.atoms.get(j)?.position;
        Some(norm(sub(b, a)))
    }

    /// 以 `center` 为顶点的键角（度）
    pub fn bond_angle(&self, center: usize, i: usize, j: usize) -> Option<f64> {
        let c = self.atoms.get(center)?.position;
        let v1 = sub(self.atoms.get(i)?.position, c);
        let v2 = sub(self.atoms.get(j)?.position, c);

        let denom = norm(v1) * norm(v2);
        if denom == 0.0 {
            return None;
        }
        let cos = (dot(v1, v2) / denom).clamp(-1.0, 1.0);
        Some(cos.acos().to_degrees())
    }
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}
