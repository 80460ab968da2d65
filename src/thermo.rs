//! # 过渡态理论速率常数
//!
//! 由反应物、产物和过渡态的 Gibbs 自由能计算谐振过渡态理论（HTST）
//! 正向和逆向速率常数：
//!
//! ```text
//! k = kB·T / h · exp(−ΔG‡ / kB·T)
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/single.rs` 使用
//! - 使用 `parsers/orca_out.rs` 读取 Gibbs 自由能

use crate::error::{HarvestError, Result};
use crate::models::{Quantity, Unit};
use crate::parsers::OrcaOutput;

use log::debug;

/// 1 Eh (J)
pub const HARTREE_TO_JOULE: f64 = 4.359_744_722_207_1e-18;

/// Boltzmann 常数 (J/K)
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Planck 常数 (J·s)
pub const PLANCK: f64 = 6.626_070_15e-34;

/// 正向 / 逆向速率常数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub forward: Quantity,
    pub backward: Quantity,
    /// 正向能垒 (hartree)
    pub forward_barrier: Quantity,
    /// 逆向能垒 (hartree)
    pub backward_barrier: Quantity,
}

/// 由三个 Gibbs 自由能 (hartree) 计算 HTST 速率常数 (1/s)
pub fn htst_rates(
    reactant: Quantity,
    product: Quantity,
    transition_state: Quantity,
    temperature: f64,
) -> Result<Rates> {
    for q in [reactant, product, transition_state] {
        if q.unit != Unit::Hartree {
            return Err(HarvestError::InvalidArgument(format!(
                "Gibbs free energy must be in hartree, got {}",
                q.unit
            )));
        }
    }
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(HarvestError::InvalidArgument(format!(
            "temperature must be positive, got {} K",
            temperature
        )));
    }

    let forward_barrier = transition_state.value - reactant.value;
    let backward_barrier = transition_state.value - product.value;

    Ok(Rates {
        forward: Quantity::new(rate(forward_barrier, temperature), Unit::PerSecond),
        backward: Quantity::new(rate(backward_barrier, temperature), Unit::PerSecond),
        forward_barrier: Quantity::hartree(forward_barrier),
        backward_barrier: Quantity::hartree(backward_barrier),
    })
}

/// 从三个输出文件读取 Gibbs 自由能并计算速率常数
pub fn htst_rates_from_outputs(
    reactant: &OrcaOutput,
    product: &OrcaOutput,
    transition_state: &OrcaOutput,
    temperature: f64,
) -> Result<Rates> {
    let g_r = reactant.gibbs_free_energy()?;
    let g_p = product.gibbs_free_energy()?;
    let g_ts = transition_state.gibbs_free_energy()?;

    debug!("G(R) = {}, G(P) = {}, G(TS) = {}", g_r, g_p, g_ts);

    htst_rates(g_r, g_p, g_ts, temperature)
}

/// k = kB·T/h · exp(−ΔG‡/kB·T)，ΔG‡ 单位 hartree
fn rate(barrier: f64, temperature: f64) -> f64 {
    let kt = BOLTZMANN * temperature;
    kt / PLANCK * (-barrier * HARTREE_TO_JOULE / kt).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_barrier_is_prefactor() {
        let g = Quantity::hartree(-1.0);
        let rates = htst_rates(g, g, g, 298.15).unwrap();
        let prefactor = BOLTZMANN * 298.15 / PLANCK;
        assert_relative_eq!(rates.forward.value, prefactor, max_relative = 1e-12);
        assert_relative_eq!(rates.forward.value, 6.2124e12, max_relative = 1e-4);
        assert_eq!(rates.forward.unit, Unit::PerSecond);
    }

    #[test]
    fn test_barrier_slows_rate() {
        let reactant = Quantity::hartree(-100.000);
        let product = Quantity::hartree(-100.010);
        let ts = Quantity::hartree(-99.970);
        let rates = htst_rates(reactant, product, ts, 298.15).unwrap();

        assert_relative_eq!(rates.forward_barrier.value, 0.030, epsilon = 1e-12);
        assert_relative_eq!(rates.backward_barrier.value, 0.040, epsilon = 1e-12);
        assert!(rates.backward.value < rates.forward.value);

        // ln(kf/kb) = (ΔG‡b − ΔG‡f)·Eh / kB·T
        let expected = 0.010 * HARTREE_TO_JOULE / (BOLTZMANN * 298.15);
        assert_relative_eq!(
            (rates.forward.value / rates.backward.value).ln(),
            expected,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        let g = Quantity::hartree(-1.0);
        assert!(htst_rates(g, g, g, 0.0).is_err());
        let wrong = Quantity::new(-1.0, Unit::Kelvin);
        assert!(htst_rates(wrong, g, g, 300.0).is_err());
    }
}
