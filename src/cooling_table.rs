// src/cooling_table.rs - Piecewise power-law cooling table and its builder

use crate::constants::{DEFAULT_TEF_SAMPLE_COUNT, DEFAULT_T_MIN_K, DEFAULT_T_REF_K};
use crate::cooling_rate::CoolingRate;
use serde::{Deserialize, Serialize};

/// Construction parameters for a [`PiecewiseCoolingTable`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CoolingTableConfig {
    /// Number of temperature samples (>= 2). The table has
    /// `sample_count - 1` power-law intervals.
    pub sample_count: usize,
    /// Floor temperature in Kelvin; cooling results clamp here.
    pub t_min_k: f64,
    /// Reference temperature in Kelvin, the highest sample and the
    /// normalization point where the TEF is zero.
    pub t_ref_k: f64,
}

impl Default for CoolingTableConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_TEF_SAMPLE_COUNT,
            t_min_k: DEFAULT_T_MIN_K,
            t_ref_k: DEFAULT_T_REF_K,
        }
    }
}

/// Piecewise power-law approximation of a cooling curve, with the
/// per-interval integration constants that make the temporal evolution
/// function (TEF) continuous and strictly decreasing in temperature.
///
/// Immutable once built: a parameter change means building a fresh table,
/// never mutating a published one. Sample `k` sits at
/// `10^(log10(t_min) + k * dlog_temp)`; interval `k` spans
/// `[T_k, T_{k+1})` and approximates the rate there as
/// `lambda[k] * (T / T_k)^alpha[k]`.
#[derive(Debug, Clone)]
pub struct PiecewiseCoolingTable {
    sample_count: usize,
    t_min_k: f64,
    t_ref_k: f64,
    dlog_temp: f64,
    lambda: Vec<f64>,
    alpha: Vec<f64>,
    y_const: Vec<f64>,
}

impl PiecewiseCoolingTable {
    /// Sample a cooling-rate model on the geometric grid and run the
    /// backward recurrences for the slopes and the TEF integration
    /// constants.
    ///
    /// Fails (publishing nothing) on an invalid configuration or a model
    /// that returns a non-positive or non-finite rate at any sample.
    pub fn build(
        config: &CoolingTableConfig,
        model: &impl CoolingRate,
    ) -> Result<Self, String> {
        let n = config.sample_count;
        if n < 2 {
            return Err(format!(
                "cooling table needs at least 2 samples, got {}",
                n
            ));
        }
        if !(config.t_min_k.is_finite() && config.t_ref_k.is_finite()) || config.t_min_k <= 0.0 {
            return Err(format!(
                "cooling table bounds must be finite and positive: t_min = {:?}, t_ref = {:?}",
                config.t_min_k, config.t_ref_k
            ));
        }
        if config.t_min_k >= config.t_ref_k {
            return Err(format!(
                "cooling table needs t_min < t_ref, got t_min = {:.6e}, t_ref = {:.6e}",
                config.t_min_k, config.t_ref_k
            ));
        }

        let log_t_min = config.t_min_k.log10();
        let dlog_temp = (config.t_ref_k.log10() - log_t_min) / (n - 1) as f64;
        let temp_at = |k: usize| 10f64.powf(log_t_min + k as f64 * dlog_temp);

        let sample_rate = |temp_k: f64| -> Result<f64, String> {
            let lambda = model.lambda_erg_cm3_s(temp_k);
            if !lambda.is_finite() || lambda <= 0.0 {
                return Err(format!(
                    "cooling-rate model returned {:?} at T = {:.6e} K; rates must be positive",
                    lambda, temp_k
                ));
            }
            Ok(lambda)
        };

        let mut lambda = vec![0.0; n];
        let mut alpha = vec![0.0; n];
        let mut y_const = vec![0.0; n];

        // Reference point; the top slope slot is a sentinel that evaluation
        // never dereferences for interior temperatures.
        lambda[n - 1] = sample_rate(config.t_ref_k)?;
        alpha[n - 1] = 0.0;

        // Local log-log slopes, highest interval first.
        for k in (0..n - 1).rev() {
            let t_k = temp_at(k);
            let t_k1 = temp_at(k + 1);
            lambda[k] = sample_rate(t_k)?;
            alpha[k] =
                (lambda[k + 1].log10() - lambda[k].log10()) / (t_k1.log10() - t_k.log10());
        }

        // Integration constants, fixed by continuity with the next-higher
        // interval. Y(T_ref) = 0 anchors the recurrence.
        y_const[n - 1] = 0.0;
        for k in (0..n - 1).rev() {
            let t_k = temp_at(k);
            let t_k1 = temp_at(k + 1);
            let rate_ratio = lambda[n - 1] / lambda[k];
            y_const[k] = if alpha[k] != 1.0 {
                y_const[k + 1]
                    - (1.0 / (1.0 - alpha[k]))
                        * rate_ratio
                        * (t_k / config.t_ref_k)
                        * (1.0 - (t_k / t_k1).powf(alpha[k] - 1.0))
            } else {
                y_const[k + 1] - rate_ratio * (t_k / config.t_ref_k) * (t_k / t_k1).ln()
            };
        }

        Ok(Self {
            sample_count: n,
            t_min_k: config.t_min_k,
            t_ref_k: config.t_ref_k,
            dlog_temp,
            lambda,
            alpha,
            y_const,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn t_min_k(&self) -> f64 {
        self.t_min_k
    }

    pub fn t_ref_k(&self) -> f64 {
        self.t_ref_k
    }

    pub fn dlog_temp(&self) -> f64 {
        self.dlog_temp
    }

    /// Temperature of sample `k` on the geometric grid.
    pub fn sample_temp_k(&self, k: usize) -> f64 {
        10f64.powf(self.t_min_k.log10() + k as f64 * self.dlog_temp)
    }

    /// Cooling rate at sample `k`.
    pub fn lambda(&self, k: usize) -> f64 {
        self.lambda[k]
    }

    /// Power-law slope of interval `k`. The top slot is a sentinel.
    pub fn alpha(&self, k: usize) -> f64 {
        self.alpha[k]
    }

    /// TEF integration constant of interval `k`; equals the TEF value at
    /// the interval's left edge.
    pub fn y_const(&self, k: usize) -> f64 {
        self.y_const[k]
    }

    /// Index of the interval containing `temp_k`, clamped to the table.
    pub fn interval_for_temp(&self, temp_k: f64) -> usize {
        let raw = ((temp_k.log10() - self.t_min_k.log10()) / self.dlog_temp).floor();
        raw.clamp(0.0, (self.sample_count - 1) as f64) as usize
    }

    /// The three table arrays in sample order, for a host that mirrors the
    /// table into accelerator memory. Each slice has `sample_count`
    /// elements; the mirror must never be mutated independently.
    pub fn raw_arrays(&self) -> (&[f64], &[f64], &[f64]) {
        (&self.lambda, &self.alpha, &self.y_const)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooling_rate::{PowerLawRate, SutherlandDopitaFit};
    use approx::assert_relative_eq;
    use more_asserts::assert_gt;

    fn small_config() -> CoolingTableConfig {
        CoolingTableConfig {
            sample_count: 5,
            t_min_k: 1.0e4,
            t_ref_k: 1.0e8,
        }
    }

    #[test]
    fn test_build_rejects_bad_configs() {
        let model = SutherlandDopitaFit::default();

        let mut config = small_config();
        config.sample_count = 1;
        assert!(PiecewiseCoolingTable::build(&config, &model).is_err());

        let mut config = small_config();
        config.t_min_k = 1.0e8;
        assert!(PiecewiseCoolingTable::build(&config, &model).is_err());

        let mut config = small_config();
        config.t_min_k = -5.0;
        assert!(PiecewiseCoolingTable::build(&config, &model).is_err());
    }

    #[test]
    fn test_build_rejects_non_positive_rates() {
        let config = small_config();
        let zero_rate = PowerLawRate::new(0.0, 1.0);
        let err = PiecewiseCoolingTable::build(&config, &zero_rate).unwrap_err();
        assert!(err.contains("positive"), "unexpected error: {}", err);
    }

    #[test]
    fn test_grid_and_slopes_for_pure_power_law() {
        // Lambda = T^-0.5 has constant log-log slope, so every interval's
        // alpha must recover the index exactly.
        let config = small_config();
        let model = PowerLawRate::new(1.0, -0.5);
        let table = PiecewiseCoolingTable::build(&config, &model).unwrap();

        assert_eq!(table.sample_count(), 5);
        assert_relative_eq!(table.dlog_temp(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(table.sample_temp_k(0), 1.0e4, max_relative = 1e-12);
        assert_relative_eq!(table.sample_temp_k(4), 1.0e8, max_relative = 1e-12);

        for k in 0..4 {
            assert_relative_eq!(table.alpha(k), -0.5, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_y_const_anchored_and_ordered() {
        let config = small_config();
        let model = PowerLawRate::new(1.0, -0.5);
        let table = PiecewiseCoolingTable::build(&config, &model).unwrap();

        // anchored at the reference point
        assert_eq!(table.y_const(4), 0.0);
        // the TEF grows toward lower temperatures, so the left-edge values
        // must increase as the interval index decreases
        for k in 0..4 {
            assert_gt!(table.y_const(k), table.y_const(k + 1));
        }
    }

    #[test]
    fn test_interval_lookup_clamps() {
        let config = small_config();
        let model = SutherlandDopitaFit::default();
        let table = PiecewiseCoolingTable::build(&config, &model).unwrap();

        assert_eq!(table.interval_for_temp(1.0e4), 0);
        assert_eq!(table.interval_for_temp(5.0e4), 0);
        assert_eq!(table.interval_for_temp(1.0e5), 1);
        assert_eq!(table.interval_for_temp(3.0e6), 2);
        // below the floor and above the reference clamp into range
        assert_eq!(table.interval_for_temp(1.0e2), 0);
        assert_eq!(table.interval_for_temp(1.0e12), 4);
    }

    #[test]
    fn test_raw_arrays_expose_full_table() {
        let config = small_config();
        let model = SutherlandDopitaFit::default();
        let table = PiecewiseCoolingTable::build(&config, &model).unwrap();

        let (lambda, alpha, y_const) = table.raw_arrays();
        assert_eq!(lambda.len(), 5);
        assert_eq!(alpha.len(), 5);
        assert_eq!(y_const.len(), 5);
        assert_eq!(lambda[3], table.lambda(3));
        assert_eq!(alpha[2], table.alpha(2));
        assert_eq!(y_const[0], table.y_const(0));
    }
}
