// src/cell_step.rs - Per-cell exact cooling step
//
// The hot path: one closed-form TEF advance per cell per timestep, a
// bounded descending interval scan, and one closed-form inversion. No
// allocation, no iteration beyond the scan, no panics in release builds.

use crate::constants::{BOLTZMANN_ERG_PER_K, GAMMA_MONATOMIC, MEAN_MOLECULAR_WEIGHT,
    ELECTRON_ION_WEIGHT_PRODUCT};
use crate::cooling_table::PiecewiseCoolingTable;
use crate::tef::{tef, tef_inverse};
use crate::temp_utils::number_density_cm3;
use serde::{Deserialize, Serialize};

/// Fixed gas composition entering the cooling-time and internal-energy
/// bookkeeping. Molecular weights are held constant over a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GasComposition {
    /// Adiabatic index.
    pub gamma: f64,
    /// Mean (total) molecular weight mu.
    pub mean_molecular_weight: f64,
    /// Product mu_e * mu_i of the electron and ion molecular weights.
    pub electron_ion_weight_product: f64,
}

impl Default for GasComposition {
    fn default() -> Self {
        Self {
            gamma: GAMMA_MONATOMIC,
            mean_molecular_weight: MEAN_MOLECULAR_WEIGHT,
            electron_ion_weight_product: ELECTRON_ION_WEIGHT_PRODUCT,
        }
    }
}

impl GasComposition {
    /// Heat-capacity factor C_V = 1 / (gamma - 1).
    pub fn heat_capacity_factor(&self) -> f64 {
        1.0 / (self.gamma - 1.0)
    }
}

/// Outcome of one cooling step at constant density.
#[derive(Debug, Clone, Copy)]
pub struct CoolingStepResult {
    /// New temperature, floor-clamped at the table's t_min.
    pub temp_new_k: f64,
    /// Internal energy density before the step, erg / cm^3.
    pub eint_old_erg_cm3: f64,
    /// Internal energy density after the step, erg / cm^3.
    pub eint_new_erg_cm3: f64,
    /// Mean radiated power over the step, erg / cm^3 / s; zero for a
    /// zero-length step.
    pub dedt_mean_erg_cm3_s: f64,
    /// Interval the new temperature landed in.
    pub interval: usize,
}

/// Cooling rate at `temp_k` under interval `k`'s local power law.
pub fn local_cooling_rate(table: &PiecewiseCoolingTable, temp_k: f64, k: usize) -> f64 {
    table.lambda(k) * (temp_k / table.sample_temp_k(k)).powf(table.alpha(k))
}

/// Local cooling time t_cool = C_V * k_B * mu_e mu_i * T / (n * mu * Lambda).
pub fn cooling_time_s(
    gas: &GasComposition,
    number_density_cm3: f64,
    temp_k: f64,
    lambda_erg_cm3_s: f64,
) -> f64 {
    gas.heat_capacity_factor() * BOLTZMANN_ERG_PER_K * gas.electron_ion_weight_product * temp_k
        / (number_density_cm3 * gas.mean_molecular_weight * lambda_erg_cm3_s)
}

/// Advance one cell's temperature over `dt_s` of optically-thin cooling.
///
/// `temp_k` must already be floor-clamped to at least the table's t_min by
/// the caller's temperature conversion; density must be positive and all
/// inputs finite. Those contracts are asserted in debug builds only.
///
/// The step is exact for the table's piecewise power-law rate: the TEF is
/// advanced by the closed-form increment, the destination interval is
/// found by a descending scan (at most the interval count), and the
/// temperature is recovered by the closed-form inverse. Cooling past the
/// tabulated floor clamps to t_min.
pub fn cool_cell(
    table: &PiecewiseCoolingTable,
    gas: &GasComposition,
    density_g_cm3: f64,
    temp_k: f64,
    dt_s: f64,
) -> CoolingStepResult {
    debug_assert!(density_g_cm3.is_finite() && density_g_cm3 > 0.0);
    debug_assert!(temp_k.is_finite() && temp_k > 0.0);
    debug_assert!(dt_s.is_finite() && dt_s >= 0.0);

    let n_cm3 = number_density_cm3(density_g_cm3);
    let cv = gas.heat_capacity_factor();
    let eint_old = cv * BOLTZMANN_ERG_PER_K * n_cm3 * temp_k;

    // (1) interval holding the current temperature
    let k = table.interval_for_temp(temp_k);

    // (2) local rate and cooling time
    let lambda_local = local_cooling_rate(table, temp_k, k);
    let t_cool = cooling_time_s(gas, n_cm3, temp_k, lambda_local);

    // (3) closed-form TEF advance
    let top = table.sample_count() - 1;
    let y_new = tef(table, temp_k, k)
        + (temp_k / table.t_ref_k()) * (table.lambda(top) / lambda_local) * (dt_s / t_cool);

    // (4) descending re-locate; no match means the gas dropped below the
    // tabulated floor
    let mut temp_new = table.t_min_k();
    let mut interval = 0;
    for i in (0..=k).rev() {
        if y_new < table.y_const(i) {
            // (5) closed-form inversion inside the matched interval
            interval = i;
            temp_new = tef_inverse(table, y_new, i);
            break;
        }
    }

    // (6) energy bookkeeping at constant density
    let eint_new = cv * BOLTZMANN_ERG_PER_K * n_cm3 * temp_new;
    let dedt_mean = if dt_s > 0.0 {
        -(eint_new - eint_old) / dt_s
    } else {
        0.0
    };

    CoolingStepResult {
        temp_new_k: temp_new,
        eint_old_erg_cm3: eint_old,
        eint_new_erg_cm3: eint_new,
        dedt_mean_erg_cm3_s: dedt_mean,
        interval,
    }
}
