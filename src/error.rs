//! # 统一错误处理模块
//!
//! 定义 qharvest 的所有错误类型，使用 `thiserror` 派生。
//!
//! 解析核心不吞掉任何错误：单个输出文件的失败原样向上传播，
//! 实验级聚合遇到第一个失败即中止。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// qharvest 统一错误类型
#[derive(Error, Debug)]
pub enum HarvestError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 路径约定错误
    // ─────────────────────────────────────────────────────────────
    #[error("Path '{path}' has {found} directory levels, expected at least {expected} (slug/theory/spin/calc/basis)")]
    PathStructure {
        path: String,
        expected: usize,
        found: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 输出文件内容错误
    // ─────────────────────────────────────────────────────────────
    #[error("No 'FINAL SINGLE POINT ENERGY' found in {path}")]
    EnergyNotFound { path: String },

    #[error("No 'CARTESIAN COORDINATES (ANGSTROEM)' block found in {path}")]
    GeometryNotFound { path: String },

    #[error("Unknown surface type '{0}' (expected one of: Actual Energy, MDCI, MDCI w/o Triples, SCF Energy)")]
    UnknownSurfaceType(String),

    #[error("Unknown population analysis method '{0}' (expected Mulliken or Loewdin)")]
    UnknownPopulationMethod(String),

    #[error("Energy surface '{surface}' not found in {path}")]
    SurfaceNotFound { surface: String, path: String },

    #[error("Energy surface '{surface}' in {path}: expected {expected} points, found {found}")]
    ShortSurface {
        surface: String,
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("No declared number of energy evaluations in {path}; pass the point count explicitly")]
    MissingEvaluationCount { path: String },

    #[error("{method} population analysis not found in {path}")]
    PopulationNotFound { method: String, path: String },

    #[error("{method} population analysis in {path} is inconsistent: {reason}")]
    InconsistentPopulation {
        method: String,
        path: String,
        reason: String,
    },

    #[error("IR spectrum not found in {path}")]
    SpectrumNotFound { path: String },

    #[error("No 'Final Gibbs free energy' found in {path}")]
    ThermoNotFound { path: String },

    #[error("Invalid number '{token}' in {path}")]
    InvalidNumber { token: String, path: String },

    // ─────────────────────────────────────────────────────────────
    // 排序 / 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("{kind} '{name}' is not part of the configured {kind} ordering")]
    UnknownCategory { kind: String, name: String },

    #[error("Invalid {kind} ordering: {reason}")]
    InvalidOrdering { kind: String, reason: String },

    #[error("Invalid configuration file: {path}\nReason: {reason}")]
    ConfigError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, HarvestError>;
