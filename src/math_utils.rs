/// Small numeric helpers shared by the table builder, the demos, and the
/// tolerance-based tests.

/// Assert that the percentage deviation between two values stays below a
/// threshold. Wraps [`deviation`] so tests can state tolerances in percent.
#[macro_export]
macro_rules! assert_deviation {
    ($actual:expr, $expected:expr, $max_deviation:expr) => {
        $crate::assert_deviation!($actual, $expected, $max_deviation, "")
    };
    ($actual:expr, $expected:expr, $max_deviation:expr, $($arg:tt)+) => {{
        let actual_val = $actual;
        let expected_val = $expected;
        let max_dev = $max_deviation;
        let dev = $crate::math_utils::deviation(actual_val, expected_val);
        assert!(
            dev < max_dev,
            "deviation {:.4}% >= {:.4}%: {}  (actual: {:?}, expected: {:?})",
            dev,
            max_dev,
            format_args!($($arg)+),
            actual_val,
            expected_val
        );
    }};
}

/// Percentage deviation of `actual` from `expected`, always non-negative.
/// A zero expectation with a nonzero actual reports infinite deviation.
pub fn deviation(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        if actual.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((actual - expected).abs() / expected.abs()) * 100.0
    }
}

/// Interpolate between two positive values in log10 space.
/// Used wherever a quantity varies as a power law between samples.
pub fn log_lerp(a: f64, b: f64, ratio: f64) -> f64 {
    10f64.powf(a.log10() + ratio * (b.log10() - a.log10()))
}

/// `count` samples geometrically spaced from `min` to `max` inclusive.
pub fn geometric_samples(min: f64, max: f64, count: usize) -> Vec<f64> {
    assert!(count >= 2, "geometric_samples needs at least two points");
    (0..count)
        .map(|i| log_lerp(min, max, i as f64 / (count - 1) as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deviation() {
        assert_eq!(deviation(105.0, 100.0), 5.0);
        assert_eq!(deviation(95.0, 100.0), 5.0);
        assert_eq!(deviation(100.0, 100.0), 0.0);
        assert_eq!(deviation(0.0, 0.0), 0.0);
        assert_eq!(deviation(10.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn test_assert_deviation_macro() {
        assert_deviation!(105.0, 100.0, 10.0);
        assert_deviation!(1530.0, 1500.0, 5.0, "temperature within 5%");
    }

    #[test]
    #[should_panic(expected = "deviation")]
    fn test_assert_deviation_macro_fails() {
        assert_deviation!(120.0, 100.0, 10.0);
    }

    #[test]
    fn test_log_lerp_endpoints_and_midpoint() {
        assert_relative_eq!(log_lerp(1.0, 100.0, 0.0), 1.0, max_relative = 1e-12);
        assert_relative_eq!(log_lerp(1.0, 100.0, 1.0), 100.0, max_relative = 1e-12);
        assert_relative_eq!(log_lerp(1.0, 100.0, 0.5), 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_geometric_samples_spacing() {
        let samples = geometric_samples(1.0e4, 1.0e8, 5);
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[0], 1.0e4, max_relative = 1e-12);
        assert_relative_eq!(samples[2], 1.0e6, max_relative = 1e-12);
        assert_relative_eq!(samples[4], 1.0e8, max_relative = 1e-12);
    }
}
