/// Source-term operation wrapping the exact cooling step for batch use.
///
/// Owns the published cooling table and advances any slice of independent
/// gas cells over a timestep. The table is shared as an `Arc` so parallel
/// workers can read it while the op keeps ownership of the publish point:
/// `rebuild` swaps in a freshly built table wholesale and never mutates
/// the published one.

use crate::cell_step::{cool_cell, CoolingStepResult, GasComposition};
use crate::config::ExactCoolingConfig;
use crate::cooling_rate::{CoolingRate, SutherlandDopitaFit};
use crate::cooling_table::{CoolingTableConfig, PiecewiseCoolingTable};
use std::sync::Arc;

/// One cell's transient state for the batch path; temperature is updated
/// in place, density is constant over the step.
#[derive(Debug, Clone, Copy)]
pub struct GasCell {
    pub density_g_cm3: f64,
    pub temp_k: f64,
}

/// Parameters for the cooling operation
#[derive(Debug, Clone, Copy)]
pub struct CoolingOpParams {
    /// Enable periodic progress reporting
    pub enable_reporting: bool,
    /// Report every N calls to `advance`
    pub report_every: usize,
}

impl Default for CoolingOpParams {
    fn default() -> Self {
        Self {
            enable_reporting: false,
            report_every: 100,
        }
    }
}

pub struct ExactCoolingOp {
    params: CoolingOpParams,
    gas: GasComposition,
    table: Arc<PiecewiseCoolingTable>,
    step_count: usize,
    cells_processed: usize,
    total_energy_lost_erg_cm3: f64,
}

impl ExactCoolingOp {
    /// Build the table from an explicit model and publish it.
    pub fn new(
        params: CoolingOpParams,
        gas: GasComposition,
        table_config: &CoolingTableConfig,
        model: &impl CoolingRate,
    ) -> Result<Self, String> {
        let table = PiecewiseCoolingTable::build(table_config, model)?;
        Ok(Self {
            params,
            gas,
            table: Arc::new(table),
            step_count: 0,
            cells_processed: 0,
            total_energy_lost_erg_cm3: 0.0,
        })
    }

    /// Build from a configuration record with the default analytic fit.
    pub fn from_config(config: &ExactCoolingConfig) -> Result<Self, String> {
        config.validate()?;
        let fit = SutherlandDopitaFit::new(config.metallicity_zsun);
        Self::new(
            CoolingOpParams::default(),
            config.gas,
            &config.table,
            &fit,
        )
    }

    /// Rebuild hook for the host's parameter-change signal: construct a
    /// fresh table and swap it in. On failure the previously published
    /// table stays in place.
    pub fn rebuild(
        &mut self,
        table_config: &CoolingTableConfig,
        model: &impl CoolingRate,
    ) -> Result<(), String> {
        let table = PiecewiseCoolingTable::build(table_config, model)?;
        self.table = Arc::new(table);
        Ok(())
    }

    /// Advance every cell by `dt_s`, updating temperatures in place.
    /// Returns the total internal energy radiated, erg / cm^3 summed over
    /// cells.
    pub fn advance(&mut self, cells: &mut [GasCell], dt_s: f64) -> f64 {
        let mut energy_lost = 0.0;

        for cell in cells.iter_mut() {
            let result = cool_cell(&self.table, &self.gas, cell.density_g_cm3, cell.temp_k, dt_s);
            energy_lost += result.eint_old_erg_cm3 - result.eint_new_erg_cm3;
            cell.temp_k = result.temp_new_k;
        }

        self.step_count += 1;
        self.cells_processed += cells.len();
        self.total_energy_lost_erg_cm3 += energy_lost;

        if self.params.enable_reporting && self.step_count % self.params.report_every == 0 {
            println!(
                "ExactCoolingOp step {}: {} cells, {:.3e} erg/cm^3 radiated this step",
                self.step_count,
                cells.len(),
                energy_lost
            );
        }

        energy_lost
    }

    /// Step a single cell without touching the counters; the pure per-cell
    /// capability the host registers as its source term.
    pub fn step_cell(&self, density_g_cm3: f64, temp_k: f64, dt_s: f64) -> CoolingStepResult {
        cool_cell(&self.table, &self.gas, density_g_cm3, temp_k, dt_s)
    }

    /// The currently published table, shareable with parallel workers.
    pub fn table(&self) -> Arc<PiecewiseCoolingTable> {
        Arc::clone(&self.table)
    }

    pub fn gas(&self) -> &GasComposition {
        &self.gas
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn cells_processed(&self) -> usize {
        self.cells_processed
    }

    pub fn total_energy_lost_erg_cm3(&self) -> f64 {
        self.total_energy_lost_erg_cm3
    }
}

/// Convenience function: cool a batch of cells against an existing table
/// without keeping an op around. Returns the total energy radiated.
pub fn apply_exact_cooling(
    cells: &mut [GasCell],
    dt_s: f64,
    table: &PiecewiseCoolingTable,
    gas: &GasComposition,
) -> f64 {
    let mut energy_lost = 0.0;
    for cell in cells.iter_mut() {
        let result = cool_cell(table, gas, cell.density_g_cm3, cell.temp_k, dt_s);
        energy_lost += result.eint_old_erg_cm3 - result.eint_new_erg_cm3;
        cell.temp_k = result.temp_new_k;
    }
    energy_lost
}
