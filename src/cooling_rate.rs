// src/cooling_rate.rs - Optically-thin cooling-rate models Lambda(T)

use crate::constants::{DEFAULT_METALLICITY_ZSUN, LOG10_LAMBDA_FLOOR, PROTON_MASS_G};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A specific cooling rate Lambda(T) in erg cm^3 / s.
///
/// Implementations must be deterministic, continuous, and strictly positive
/// for every T > 0. The table builder samples the curve at arbitrary
/// temperatures and takes log-log slopes between samples, so a zero or
/// negative value is a contract violation the builder rejects.
pub trait CoolingRate {
    fn lambda_erg_cm3_s(&self, temp_k: f64) -> f64;
}

/// Sutherland-Dopita style two-component fit: a metallicity-independent
/// branch plus a metallicity-scaled branch, each a clamped piecewise
/// function of log10(T), combined as `Lambda0 + Z * Lambda1`.
///
/// Valid over the full tabulated range; both branches are floored at
/// 10^-30 erg cm^3/s so the combined rate never reaches zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SutherlandDopitaFit {
    /// Metallicity in solar units; negative values are treated as zero.
    pub metallicity_zsun: f64,
}

impl Default for SutherlandDopitaFit {
    fn default() -> Self {
        Self {
            metallicity_zsun: DEFAULT_METALLICITY_ZSUN,
        }
    }
}

// Fit constants for the metallicity-scaled branch
const TLOG_C: f64 = 5.65;
const QLOG_C: f64 = -21.566;
const QLOG_INFTY: f64 = -23.1;
const HIGH_T_SLOPE: f64 = 0.8;
const TLOG_M: f64 = 5.1;
const QLOG_M: f64 = -20.85;
const BUMP_SIGMA: f64 = 0.65;

impl SutherlandDopitaFit {
    pub fn new(metallicity_zsun: f64) -> Self {
        Self { metallicity_zsun }
    }

    /// Metallicity-independent branch, returned as log10(Lambda).
    fn qlog_primordial(tlog: f64, temp_k: f64) -> f64 {
        let qlog = if tlog >= 6.1 {
            -26.39 + 0.471 * (temp_k + 3.1623e6).log10()
        } else if tlog >= 4.9 {
            let arg = 10f64.powf(-(tlog - 4.9) / 0.5) + 0.077302;
            -22.16 + arg.log10()
        } else if tlog >= 4.25 {
            // two overlapping bumps; take the stronger one
            let bump1 = -21.98 - ((tlog - 4.25) / 0.55);
            let bump2 = -22.16 - ((tlog - 4.9) / 0.284).powi(2);
            bump1.max(bump2)
        } else {
            -21.98 - ((tlog - 4.25) / 0.2).powi(2)
        };
        qlog.max(LOG10_LAMBDA_FLOOR)
    }

    /// Metal-line branch, returned as log10(Lambda).
    fn qlog_metals(tlog: f64) -> f64 {
        let qlog = if tlog >= TLOG_C {
            (QLOG_C - HIGH_T_SLOPE * (tlog - TLOG_C)).max(QLOG_INFTY)
        } else {
            QLOG_M - ((tlog - TLOG_M) / BUMP_SIGMA).powi(2)
        };
        qlog.max(LOG10_LAMBDA_FLOOR)
    }
}

impl CoolingRate for SutherlandDopitaFit {
    fn lambda_erg_cm3_s(&self, temp_k: f64) -> f64 {
        let tlog = temp_k.log10();
        let lambda0 = 10f64.powf(Self::qlog_primordial(tlog, temp_k));
        let lambda1 = 10f64.powf(Self::qlog_metals(tlog));
        let z = self.metallicity_zsun.max(0.0);
        lambda0 + z * lambda1
    }
}

/// Single power law `coeff * T^index`.
///
/// Useful for validation against the closed-form single-power-law cooling
/// solution, and as an explicit stand-in for simplified rate laws such as
/// the bremsstrahlung-like `3.2217e-27 * sqrt(T)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerLawRate {
    pub coeff: f64,
    pub index: f64,
}

impl PowerLawRate {
    pub fn new(coeff: f64, index: f64) -> Self {
        Self { coeff, index }
    }

    /// Free-free-like sqrt(T) law with a thermal bremsstrahlung
    /// normalization.
    pub fn bremsstrahlung_like() -> Self {
        Self::new(3.2217e-27, 0.5)
    }
}

impl CoolingRate for PowerLawRate {
    fn lambda_erg_cm3_s(&self, temp_k: f64) -> f64 {
        self.coeff * temp_k.powf(self.index)
    }
}

/// Volumetric emissivity n_e * n_i * Lambda in erg / cm^3 / s, for a gas of
/// mass density `density_g_cm3` with the given mu_e * mu_i product.
pub fn emissivity_erg_cm3_s(
    density_g_cm3: f64,
    lambda_erg_cm3_s: f64,
    electron_ion_weight_product: f64,
) -> f64 {
    let ne_ni =
        (density_g_cm3 * density_g_cm3) / (electron_ion_weight_product * PROTON_MASS_G * PROTON_MASS_G);
    ne_ni * lambda_erg_cm3_s
}

/// Named abundance environments with ready-made fit parameterizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbundanceSet {
    Primordial,
    SubSolar,
    IntraclusterMedium,
    Solar,
}

impl AbundanceSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbundanceSet::Primordial => "primordial",
            AbundanceSet::SubSolar => "sub_solar",
            AbundanceSet::IntraclusterMedium => "intracluster_medium",
            AbundanceSet::Solar => "solar",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "primordial" => Some(AbundanceSet::Primordial),
            "sub_solar" => Some(AbundanceSet::SubSolar),
            "intracluster_medium" => Some(AbundanceSet::IntraclusterMedium),
            "solar" => Some(AbundanceSet::Solar),
            _ => None,
        }
    }
}

pub static ABUNDANCE_FITS: Lazy<HashMap<AbundanceSet, SutherlandDopitaFit>> = Lazy::new(|| {
    use AbundanceSet::*;
    let mut m = HashMap::new();

    m.insert(Primordial, SutherlandDopitaFit::new(0.0));
    m.insert(SubSolar, SutherlandDopitaFit::new(0.1));
    m.insert(IntraclusterMedium, SutherlandDopitaFit::new(0.3));
    m.insert(Solar, SutherlandDopitaFit::new(1.0));

    m
});

pub fn get_fit(set: AbundanceSet) -> Option<&'static SutherlandDopitaFit> {
    ABUNDANCE_FITS.get(&set)
}
