//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `experiment/`, `parsers/`, `export.rs`, `utils/`
//! - 子模块: energies, surface, population, spectra, single

pub mod energies;
pub mod population;
pub mod single;
pub mod spectra;
pub mod surface;

use crate::cli::experiment::ExperimentArgs;
use crate::cli::Commands;
use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::experiment::Experiment;
use crate::utils::output;

use tabled::builder::Builder;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Energies(args) => energies::execute(args),
        Commands::Surface(args) => surface::execute(args),
        Commands::Population(args) => population::execute(args),
        Commands::Spectra(args) => spectra::execute(args),
        Commands::Read(args) => single::execute_read(args),
        Commands::Runinfo(args) => single::execute_runinfo(args),
        Commands::Rates(args) => single::execute_rates(args),
    }
}

/// 配置文件（或默认值）+ 命令行覆盖
pub fn resolve_config(args: &ExperimentArgs) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };

    if !args.basis_order.is_empty() {
        config.basis_order = args.basis_order.clone();
    }
    if !args.theory_order.is_empty() {
        config.theory_order = args.theory_order.clone();
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    if args.decimals.is_some() {
        config.decimals = args.decimals;
    }

    config.validate()?;
    Ok(config)
}

/// 发现实验目录下的输出文件
fn open_experiment(args: &ExperimentArgs) -> Result<(Experiment, ExperimentConfig)> {
    let config = resolve_config(args)?;

    output::print_info(&format!("Scanning '{}' for ORCA outputs...", args.dir.display()));
    let experiment = Experiment::from_config(&args.dir, &config)?.with_progress(!args.quiet);

    if experiment.files().is_empty() {
        output::print_warning(&format!(
            "No files matching '{}' found under '{}'",
            config.include_pattern(),
            args.dir.display()
        ));
    } else {
        output::print_info(&format!(
            "Found {} output files under '{}'",
            experiment.files().len(),
            experiment.root().display()
        ));
    }

    Ok((experiment, config))
}

/// 打印列数不固定的表格
fn print_table(header: Vec<String>, rows: Vec<Vec<String>>) {
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }
    println!("{}", builder.build());
}

/// 写出 CSV（如请求）并提示
fn write_csv<F>(path: Option<&std::path::Path>, writer: F) -> Result<()>
where
    F: FnOnce(&std::path::Path) -> Result<()>,
{
    if let Some(path) = path {
        writer(path)?;
        output::print_success(&format!("Table saved to '{}'", path.display()));
    }
    Ok(())
}
