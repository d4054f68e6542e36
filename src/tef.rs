// src/tef.rs - Closed-form temporal evolution function and its inverse
//
// Both functions are pure and operate only on the table arrays and their
// scalar arguments, so the same definitions serve any execution target.
// The caller supplies the interval index; out-of-range pairs are a caller
// contract violation and are only checked in debug builds.

use crate::cooling_table::PiecewiseCoolingTable;

/// TEF value at `temp_k`, assuming `temp_k` lies in interval `k`.
///
/// Zero at the reference temperature and strictly decreasing in T, which is
/// what makes the inversion below well posed without iteration. The
/// `alpha == 1` interval uses the logarithmic antiderivative.
pub fn tef(table: &PiecewiseCoolingTable, temp_k: f64, k: usize) -> f64 {
    debug_assert!(k < table.sample_count(), "interval index out of range");
    debug_assert!(temp_k.is_finite() && temp_k > 0.0);

    let t_k = table.sample_temp_k(k);
    let alpha = table.alpha(k);
    let rate_ratio = table.lambda(table.sample_count() - 1) / table.lambda(k);
    let edge_scale = rate_ratio * (t_k / table.t_ref_k());

    if alpha != 1.0 {
        table.y_const(k)
            + (1.0 / (1.0 - alpha)) * edge_scale * (1.0 - (t_k / temp_k).powf(alpha - 1.0))
    } else {
        table.y_const(k) + edge_scale * (t_k / temp_k).ln()
    }
}

/// Temperature at which the TEF takes the value `y`, assuming that
/// temperature lies in interval `k`. Exact closed-form inverse of [`tef`].
pub fn tef_inverse(table: &PiecewiseCoolingTable, y: f64, k: usize) -> f64 {
    debug_assert!(k < table.sample_count(), "interval index out of range");
    debug_assert!(y.is_finite());

    let t_k = table.sample_temp_k(k);
    let alpha = table.alpha(k);
    let rate_ratio = table.lambda(k) / table.lambda(table.sample_count() - 1);
    let edge_scale = rate_ratio * (table.t_ref_k() / t_k);

    if alpha != 1.0 {
        t_k * (1.0 - (1.0 - alpha) * edge_scale * (y - table.y_const(k)))
            .powf(1.0 / (1.0 - alpha))
    } else {
        t_k * (-edge_scale * (y - table.y_const(k))).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooling_rate::{CoolingRate, PowerLawRate, SutherlandDopitaFit};
    use crate::cooling_table::CoolingTableConfig;
    use approx::assert_relative_eq;
    use more_asserts::assert_gt;
    use rand::Rng;

    fn build_table(sample_count: usize, model: &impl CoolingRate) -> PiecewiseCoolingTable {
        let config = CoolingTableConfig {
            sample_count,
            t_min_k: 1.0e4,
            t_ref_k: 1.0e8,
        };
        PiecewiseCoolingTable::build(&config, model).unwrap()
    }

    #[test]
    fn test_round_trip_over_every_interval() {
        let table = build_table(33, &SutherlandDopitaFit::default());
        let mut rng = rand::rng();

        for k in 0..table.sample_count() - 1 {
            let t_lo = table.sample_temp_k(k);
            let t_hi = table.sample_temp_k(k + 1);

            // endpoints plus randomized interior samples
            let mut probes = vec![t_lo, t_hi];
            for _ in 0..8 {
                probes.push(t_lo + rng.random_range(0.0..1.0) * (t_hi - t_lo));
            }

            for temp_k in probes {
                let recovered = tef_inverse(&table, tef(&table, temp_k, k), k);
                assert_relative_eq!(recovered, temp_k, max_relative = 1e-10);
            }
        }
    }

    #[test]
    fn test_continuity_at_interval_boundaries() {
        let table = build_table(17, &SutherlandDopitaFit::default());

        for k in 0..table.sample_count() - 2 {
            let boundary = table.sample_temp_k(k + 1);
            let from_below = tef(&table, boundary, k);
            let from_above = tef(&table, boundary, k + 1);
            assert_relative_eq!(from_below, from_above, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_left_edge_equals_interval_constant() {
        let table = build_table(9, &SutherlandDopitaFit::default());
        for k in 0..table.sample_count() - 1 {
            let edge = tef(&table, table.sample_temp_k(k), k);
            assert_relative_eq!(edge, table.y_const(k), max_relative = 1e-12, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_strictly_decreasing_in_temperature() {
        let table = build_table(17, &SutherlandDopitaFit::default());

        for k in 0..table.sample_count() - 1 {
            let t_lo = table.sample_temp_k(k);
            let t_hi = table.sample_temp_k(k + 1);
            let mut prev = tef(&table, t_lo, k);
            for step in 1..=16 {
                let temp_k = t_lo + (t_hi - t_lo) * step as f64 / 16.0;
                let y = tef(&table, temp_k, k);
                assert_gt!(
                    prev,
                    y,
                    "TEF must strictly decrease in T (interval {}, T = {:.4e})",
                    k,
                    temp_k
                );
                prev = y;
            }
        }
    }

    #[test]
    fn test_zero_at_reference_temperature() {
        let table = build_table(9, &SutherlandDopitaFit::default());
        let top = table.sample_count() - 2;
        let y = tef(&table, table.t_ref_k(), top);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_slope_interval_is_finite_and_matches_limit() {
        // Lambda = T makes the sampled log-log slope bit-exactly 1 on
        // every interval, exercising the logarithmic branch. The TEF only
        // ever sees rate ratios, so the unit coefficient is harmless.
        let exact = build_table(9, &PowerLawRate::new(1.0, 1.0));
        for k in 0..exact.sample_count() - 1 {
            assert_eq!(exact.alpha(k), 1.0);
        }

        // and the logarithmic branch must agree with the general formula
        // in the limit alpha -> 1, approached from both sides
        for nudge in [1.0 + 1.0e-7, 1.0 - 1.0e-7] {
            let near = build_table(9, &PowerLawRate::new(1.0, nudge));
            for k in 0..exact.sample_count() - 1 {
                let t_mid = (exact.sample_temp_k(k) * exact.sample_temp_k(k + 1)).sqrt();
                let y_exact = tef(&exact, t_mid, k);
                let y_near = tef(&near, t_mid, k);
                assert!(y_exact.is_finite());
                assert_relative_eq!(y_exact, y_near, max_relative = 1e-5);

                let roundtrip = tef_inverse(&exact, y_exact, k);
                assert_relative_eq!(roundtrip, t_mid, max_relative = 1e-10);
            }
        }
    }
}
