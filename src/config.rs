// src/config.rs - Runtime configuration record for the cooling source term

use crate::cell_step::GasComposition;
use crate::constants::DEFAULT_METALLICITY_ZSUN;
use crate::cooling_table::CoolingTableConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything needed to build (or rebuild) the cooling table and run the
/// per-cell step: table geometry, gas composition, and the metallicity of
/// the analytic fit. Loaded once at startup and again whenever the host
/// signals a parameter change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactCoolingConfig {
    pub table: CoolingTableConfig,
    pub gas: GasComposition,
    /// Metallicity in solar units for the default analytic fit.
    pub metallicity_zsun: f64,
}

impl Default for ExactCoolingConfig {
    fn default() -> Self {
        Self {
            table: CoolingTableConfig::default(),
            gas: GasComposition::default(),
            metallicity_zsun: DEFAULT_METALLICITY_ZSUN,
        }
    }
}

impl ExactCoolingConfig {
    /// Parse a configuration from a JSON string. Missing fields take their
    /// defaults.
    pub fn from_json_str(json_str: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json_str)
            .map_err(|e| format!("Failed to parse cooling config JSON: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file on disk.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let json_str = fs::read_to_string(path.as_ref()).map_err(|e| {
            format!(
                "Failed to read cooling config {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        Self::from_json_str(&json_str)
    }

    pub fn to_json_string(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize cooling config: {}", e))
    }

    /// Check the fields the table builder does not see itself.
    pub fn validate(&self) -> Result<(), String> {
        if self.gas.gamma <= 1.0 {
            return Err(format!(
                "adiabatic index must exceed 1, got {}",
                self.gas.gamma
            ));
        }
        if self.gas.mean_molecular_weight <= 0.0 || self.gas.electron_ion_weight_product <= 0.0 {
            return Err(format!(
                "molecular weights must be positive, got mu = {}, mu_e*mu_i = {}",
                self.gas.mean_molecular_weight, self.gas.electron_ion_weight_product
            ));
        }
        Ok(())
    }
}
