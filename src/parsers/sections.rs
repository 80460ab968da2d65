//! # ORCA 输出段落匹配表
//!
//! 每个有名字的段落对应一个预编译的标记正则和一个固定形状的行提取器。
//! 这里只做定位和切分，数值转换与错误上下文由 `orca_out.rs` 负责。
//!
//! ## 依赖关系
//! - 被 `parsers/orca_out.rs` 使用
//! - 使用 `regex`

use crate::models::{PopulationMethod, SurfaceType};

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 浮点数（含 Fortran 风格 D 指数）
const FLOAT: &str = r"[-+]?(?:\d+\.\d*|\.\d+|\d+)(?:[eEdD][-+]?\d+)?";

// ─────────────────────────────────────────────────────────────
// 标量
// ─────────────────────────────────────────────────────────────

/// "FINAL SINGLE POINT ENERGY        -1.010100390000"
pub static FINAL_ENERGY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"FINAL SINGLE POINT ENERGY\s+({FLOAT})")).unwrap()
});

/// "There will be 33 energy evaluations"（参数扫描的头部声明）
pub static DECLARED_EVALUATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"There will be\s+(\d+)\s+energy evaluations").unwrap());

/// "Final Gibbs free energy         ...     -76.39624387 Eh"
pub static GIBBS_FREE_ENERGY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"Final Gibbs free energy\s*\.*\s*({FLOAT})\s*Eh")).unwrap()
});

// ─────────────────────────────────────────────────────────────
// 几何
// ─────────────────────────────────────────────────────────────

pub static GEOMETRY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CARTESIAN\s+COORDINATES\s+\(ANGSTROEM\)").unwrap());

/// "  H      0.000000    0.000000    0.370000"
static GEOMETRY_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*([A-Za-z]{{1,3}})\s+({FLOAT})\s+({FLOAT})\s+({FLOAT})\s*$"
    ))
    .unwrap()
});

/// 几何行: (元素, x, y, z) 原始文本
pub fn geometry_row(line: &str) -> Option<(&str, [&str; 3])> {
    let caps = GEOMETRY_ROW.captures(line)?;
    Some((
        caps.get(1)?.as_str(),
        [caps.get(2)?.as_str(), caps.get(3)?.as_str(), caps.get(4)?.as_str()],
    ))
}

// ─────────────────────────────────────────────────────────────
// 能量面
// ─────────────────────────────────────────────────────────────

/// 能量面标记行
///
/// ```text
///                     The Calculated Surface using the 'Actual Energy'
///                     The Calculated Surface using the SCF energy
///                     The Calculated Surface using the MDCI energy
///                     The Calculated Surface using the MDCI w/o Triples energy
/// ```
static SURFACE_MARKERS: LazyLock<HashMap<SurfaceType, Regex>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(
        SurfaceType::ActualEnergy,
        Regex::new(r"The Calculated Surface using the 'Actual Energy'").unwrap(),
    );
    m.insert(
        SurfaceType::ScfEnergy,
        Regex::new(r"The Calculated Surface using the SCF energy").unwrap(),
    );
    m.insert(
        SurfaceType::Mdci,
        Regex::new(r"The Calculated Surface using the MDCI energy").unwrap(),
    );
    m.insert(
        SurfaceType::MdciNoTriples,
        Regex::new(r"The Calculated Surface using the MDCI w/o Triples energy").unwrap(),
    );
    m
});

pub fn surface_marker(kind: SurfaceType) -> &'static Regex {
    &SURFACE_MARKERS[&kind]
}

/// 扫描点行: (坐标, 能量) 原始文本
pub fn surface_point(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line.split_whitespace();
    Some((tokens.next()?, tokens.next()?))
}

// ─────────────────────────────────────────────────────────────
// 布居分析
// ─────────────────────────────────────────────────────────────

/// 布居分析段落头，捕获组 1 为标题剩余部分（含 SPIN 时为开壳层）
///
/// ```text
/// MULLIKEN ATOMIC CHARGES AND SPIN POPULATIONS
/// LOEWDIN ATOMIC CHARGES
/// ```
static POPULATION_HEADERS: LazyLock<HashMap<PopulationMethod, Regex>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(
        PopulationMethod::Mulliken,
        Regex::new(r"^\s*MULLIKEN ATOMIC CHARGES(.*)$").unwrap(),
    );
    m.insert(
        PopulationMethod::Loewdin,
        Regex::new(r"^\s*LOEWDIN ATOMIC CHARGES(.*)$").unwrap(),
    );
    m
});

/// 匹配段落头，返回是否为开壳层
pub fn population_header(method: PopulationMethod, line: &str) -> Option<bool> {
    let caps = POPULATION_HEADERS[&method].captures(line)?;
    Some(caps.get(1).is_some_and(|rest| rest.as_str().contains("SPIN")))
}

/// "   0 H :    0.000000    0.000000"
static POPULATION_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(\d+)\s+([A-Za-z]+)\s*:\s*({FLOAT})(?:\s+({FLOAT}))?\s*$"
    ))
    .unwrap()
});

/// 布居行原始文本
pub struct PopulationLine<'a> {
    pub anum: &'a str,
    pub atype: &'a str,
    pub charge: &'a str,
    pub spin: Option<&'a str>,
}

pub fn population_row(line: &str) -> Option<PopulationLine<'_>> {
    let caps = POPULATION_ROW.captures(line)?;
    Some(PopulationLine {
        anum: caps.get(1)?.as_str(),
        atype: caps.get(2)?.as_str(),
        charge: caps.get(3)?.as_str(),
        spin: caps.get(4).map(|m| m.as_str()),
    })
}

/// 布居段落结束："Sum of atomic charges..."、分隔线或空行
pub fn is_population_footer(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("Sum") || is_separator(trimmed)
}

pub fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 5 && trimmed.chars().all(|c| c == '-')
}

// ─────────────────────────────────────────────────────────────
// IR 光谱
// ─────────────────────────────────────────────────────────────

pub static IR_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*IR SPECTRUM\s*$").unwrap());

/// 头部到第一行数据之间允许的最大行数
pub const IR_PREAMBLE_LINES: usize = 8;

/// ```text
///    6:      1639.47   78.465356  ( -0.000000 -8.858068  0.000000)
///    6:   1639.47   0.012345   62.39  0.003880  ( -0.000000 -0.062290  0.000000)
/// ```
static IR_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(\d+):\s+([^(]*)\(\s*({FLOAT})\s+({FLOAT})\s+({FLOAT})\s*\)"
    ))
    .unwrap()
});

/// IR 行原始文本；`values` 为括号前的所有数值
pub struct IrLine<'a> {
    pub mode: &'a str,
    pub values: Vec<&'a str>,
    pub dipole: [&'a str; 3],
}

pub fn ir_row(line: &str) -> Option<IrLine<'_>> {
    let caps = IR_ROW.captures(line)?;
    Some(IrLine {
        mode: caps.get(1)?.as_str(),
        values: caps.get(2)?.as_str().split_whitespace().collect(),
        dipole: [caps.get(3)?.as_str(), caps.get(4)?.as_str(), caps.get(5)?.as_str()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_energy_marker() {
        let caps = FINAL_ENERGY
            .captures("FINAL SINGLE POINT ENERGY        -1.010100390000")
            .unwrap();
        assert_eq!(&caps[1], "-1.010100390000");
    }

    #[test]
    fn test_surface_markers_do_not_overlap() {
        let triples = "   The Calculated Surface using the MDCI w/o Triples energy";
        assert!(surface_marker(SurfaceType::MdciNoTriples).is_match(triples));
        assert!(!surface_marker(SurfaceType::Mdci).is_match(triples));
        assert!(surface_marker(SurfaceType::ActualEnergy)
            .is_match("   The Calculated Surface using the 'Actual Energy'"));
    }

    #[test]
    fn test_population_header_shell() {
        assert_eq!(
            population_header(PopulationMethod::Mulliken, "MULLIKEN ATOMIC CHARGES"),
            Some(false)
        );
        assert_eq!(
            population_header(
                PopulationMethod::Loewdin,
                "LOEWDIN ATOMIC CHARGES AND SPIN POPULATIONS"
            ),
            Some(true)
        );
        assert_eq!(
            population_header(PopulationMethod::Mulliken, "LOEWDIN ATOMIC CHARGES"),
            None
        );
    }

    #[test]
    fn test_population_row() {
        let row = population_row("   1 H :   -0.123456    0.500000").unwrap();
        assert_eq!(row.anum, "1");
        assert_eq!(row.atype, "H");
        assert_eq!(row.charge, "-0.123456");
        assert_eq!(row.spin, Some("0.500000"));
        assert!(population_row("Sum of atomic charges:   -0.0000000").is_none());
    }

    #[test]
    fn test_population_footer() {
        assert!(is_population_footer("Sum of atomic charges:   -0.0000000"));
        assert!(is_population_footer("   "));
        assert!(is_population_footer("-----------------------"));
        assert!(!is_population_footer("   0 H :    0.000000"));
    }

    #[test]
    fn test_ir_row_layouts() {
        let v4 = ir_row("   6:      1639.47   78.465356  ( -0.000000 -8.858068  0.000000)").unwrap();
        assert_eq!(v4.mode, "6");
        assert_eq!(v4.values, vec!["1639.47", "78.465356"]);
        assert_eq!(v4.dipole, ["-0.000000", "-8.858068", "0.000000"]);

        let v5 = ir_row(
            "   7:   3807.28   0.000910    4.60  0.000075  ( -0.000000  0.008660  0.000000)",
        )
        .unwrap();
        assert_eq!(v5.values.len(), 4);
    }

    #[test]
    fn test_geometry_row() {
        let (el, xyz) = geometry_row("  O      0.000000    0.000000    0.119262").unwrap();
        assert_eq!(el, "O");
        assert_eq!(xyz[2], "0.119262");
        assert!(geometry_row("----------------------------").is_none());
    }
}
