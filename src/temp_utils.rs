//! Conversions between mass density, number density, temperature, and
//! internal energy for a fixed-composition ideal gas, in CGS.

use crate::constants::{BOLTZMANN_ERG_PER_K, PROTON_MASS_G};

/// Gas number density from mass density, n = rho / m_p.
pub fn number_density_cm3(density_g_cm3: f64) -> f64 {
    density_g_cm3 / PROTON_MASS_G
}

/// Mass density giving the target number density, rho = n * m_p.
pub fn mass_density_g_cm3(number_density_cm3: f64) -> f64 {
    number_density_cm3 * PROTON_MASS_G
}

/// Internal energy density of an ideal gas, erg / cm^3.
pub fn internal_energy_erg_cm3(number_density_cm3: f64, temp_k: f64, gamma: f64) -> f64 {
    BOLTZMANN_ERG_PER_K * number_density_cm3 * temp_k / (gamma - 1.0)
}

/// Temperature recovered from internal energy density at fixed number
/// density.
pub fn kelvin_from_internal_energy(
    eint_erg_cm3: f64,
    number_density_cm3: f64,
    gamma: f64,
) -> f64 {
    eint_erg_cm3 * (gamma - 1.0) / (BOLTZMANN_ERG_PER_K * number_density_cm3)
}

/// Thermal pressure, erg / cm^3.
pub fn pressure_erg_cm3(number_density_cm3: f64, temp_k: f64) -> f64 {
    number_density_cm3 * BOLTZMANN_ERG_PER_K * temp_k
}

/// Mass density of a uniform test parcel specified by its hydrogen number
/// density, rho = n_H * m_p * mu.
pub fn parcel_mass_density_g_cm3(hydrogen_number_density_cm3: f64, mean_molecular_weight: f64) -> f64 {
    hydrogen_number_density_cm3 * PROTON_MASS_G * mean_molecular_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GAMMA_MONATOMIC;
    use approx::assert_relative_eq;

    #[test]
    fn test_number_density_round_trip() {
        for n in [1.0e-4, 1.0, 250.0] {
            let density = mass_density_g_cm3(n);
            assert_relative_eq!(number_density_cm3(density), n, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_internal_energy_round_trip() {
        let test_densities = [0.01, 1.0, 100.0];
        let test_temperatures = [1.0e4, 3.0e5, 1.0e7];

        for &n in &test_densities {
            for &temp_k in &test_temperatures {
                let eint = internal_energy_erg_cm3(n, temp_k, GAMMA_MONATOMIC);
                let recovered = kelvin_from_internal_energy(eint, n, GAMMA_MONATOMIC);
                assert_relative_eq!(recovered, temp_k, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_energy_scales_linearly() {
        let e1 = internal_energy_erg_cm3(1.0, 1.0e6, GAMMA_MONATOMIC);
        let e2 = internal_energy_erg_cm3(2.0, 1.0e6, GAMMA_MONATOMIC);
        let e3 = internal_energy_erg_cm3(1.0, 2.0e6, GAMMA_MONATOMIC);
        assert_relative_eq!(e2, 2.0 * e1, max_relative = 1e-12);
        assert_relative_eq!(e3, 2.0 * e1, max_relative = 1e-12);
    }

    #[test]
    fn test_monatomic_energy_pressure_relation() {
        // For gamma = 5/3, Eint = 1.5 * P
        let n = 1.0;
        let temp_k = 1.0e6;
        let eint = internal_energy_erg_cm3(n, temp_k, GAMMA_MONATOMIC);
        let pres = pressure_erg_cm3(n, temp_k);
        assert_relative_eq!(eint, 1.5 * pres, max_relative = 1e-12);
    }

    #[test]
    fn test_parcel_density_includes_molecular_weight() {
        let density = parcel_mass_density_g_cm3(1.0, 0.61);
        assert_relative_eq!(density, 0.61 * PROTON_MASS_G, max_relative = 1e-12);
    }
}
