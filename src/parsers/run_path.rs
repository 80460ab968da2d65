//! # 运行目录命名约定解析
//!
//! 输入生成器按 `<slug>/<theory>/<spin>/<calc>/<basis>/` 布局写出每个运行，
//! 这里从路径末尾的目录名反推运行来源信息。
//!
//! ## 转义规则
//! - 基组：`+` 写成 `P`，`*` 写成 `8`（如 `6-311++G**` → `6-311PPG88`）
//! - 理论方法：空格写成 `_`（如 `RHF MP2` → `RHF_MP2`）
//!
//! ## 依赖关系
//! - 被 `parsers/orca_out.rs`, `commands/single.rs` 使用
//! - 使用 `models/calculation.rs`

use crate::error::{HarvestError, Result};
use crate::models::RunInfo;
use std::path::{Component, Path};

/// 需要的目录层数
pub const REQUIRED_SEGMENTS: usize = 5;

/// 从运行目录恢复来源信息（由近到远：basis, calc, spin, theory, slug）
///
/// 存在的目录先解析为绝对路径，`.` 这样的相对路径也能取到完整层级；
/// 不存在的路径按字面解析，其中的 `..` 无法解析，直接报错。
pub fn run_info(dir: &Path) -> Result<RunInfo> {
    let resolved = match dir.canonicalize() {
        Ok(path) => path,
        Err(_) => dir.to_path_buf(),
    };

    let mut segments: Vec<String> = Vec::new();
    for component in resolved.components() {
        match component {
            Component::Normal(s) => segments.push(s.to_string_lossy().to_string()),
            Component::ParentDir => {
                return Err(HarvestError::InvalidArgument(format!(
                    "cannot resolve '..' in run directory {}",
                    dir.display()
                )))
            }
            _ => {}
        }
    }

    if segments.len() < REQUIRED_SEGMENTS {
        return Err(HarvestError::PathStructure {
            path: dir.display().to_string(),
            expected: REQUIRED_SEGMENTS,
            found: segments.len(),
        });
    }

    // 倒数第 k 个目录名
    let n = segments.len();
    let nth_last = |k: usize| segments[n - 1 - k].as_str();

    Ok(RunInfo {
        basis: unescape_basis(nth_last(0)),
        calc: nth_last(1).to_string(),
        spin: nth_last(2).to_string(),
        theory: unescape_theory(nth_last(3)),
        slug: nth_last(4).to_string(),
    })
}

/// 输出文件所在目录的来源信息
pub fn run_info_for_file(file: &Path) -> Result<RunInfo> {
    match file.parent() {
        Some(parent) => run_info(parent),
        None => Err(HarvestError::PathStructure {
            path: file.display().to_string(),
            expected: REQUIRED_SEGMENTS,
            found: 0,
        }),
    }
}

/// 基组名 → 目录名
pub fn escape_basis(basis: &str) -> String {
    basis.replace('+', "P").replace('*', "8")
}

/// 目录名 → 基组名
pub fn unescape_basis(segment: &str) -> String {
    segment.replace('P', "+").replace('8', "*")
}

/// 理论方法 → 目录名
pub fn escape_theory(theory: &str) -> String {
    theory.replace(' ', "_")
}

/// 目录名 → 理论方法
pub fn unescape_theory(segment: &str) -> String {
    segment.replace('_', " ")
}
