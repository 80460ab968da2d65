//! 测试用 ORCA 输出样本与运行目录树构造

use std::fs;
use std::path::{Path, PathBuf};

/// H2 QCISD(T)/3-21G 键长扫描，33 个点，四种能量面，闭壳层布居
pub const QCISDT_SCAN: &str = include_str!("../tests/data/orca_qcisdt.out");

/// H2 UHF/3-21G 三重态扫描，只有 Actual Energy 和 SCF energy，开壳层布居
pub const UHF_SCAN: &str = include_str!("../tests/data/orca_uhf.out");

/// H2O B3LYP/6-31G* 频率计算（ORCA 4 IR 格式，含 Gibbs 自由能）
pub const H2O_FREQ: &str = include_str!("../tests/data/h2o_freq.out");

/// QCISD(T) 扫描的 MDCI 能量面
pub const QCISDT_MDCI: [f64; 33] = [
    -0.94138797, -1.01926347, -1.07121343, -1.10532121, -1.12693056, -1.13967221,
    -1.14606214, -1.1478773, -1.14639965, -1.14257386, -1.1371073, -1.13053326,
    -1.12325284, -1.11556491, -1.1076896, -1.09978747, -1.09197505, -1.08433716,
    -1.07693613, -1.06981843, -1.06301908, -1.05656468, -1.05047427, -1.04476152,
    -1.03943444, -1.03449586, -1.02994375, -1.02577148, -1.02196149, -1.01851026,
    -1.01539626, -1.0126, -1.01010039,
];

/// 扫描坐标 0.40, 0.45, ..., 2.00 Å
pub fn scan_coordinates() -> Vec<f64> {
    (0..33).map(|i| 0.4 + 0.05 * i as f64).collect()
}

/// 在 `root/run_dir/` 下写出 `orca.out`
pub fn write_run(root: &Path, run_dir: &str, content: &str) -> PathBuf {
    write_file(root, &format!("{run_dir}/orca.out"), content)
}

pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}
