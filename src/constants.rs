// Physical constants and default parameters for optically-thin radiative cooling.
// All quantities are CGS unless the name says otherwise.

pub const BOLTZMANN_ERG_PER_K: f64 = 1.38064852e-16;
pub const PROTON_MASS_G: f64 = 1.6726219e-24;

pub const SECONDS_PER_YEAR: f64 = 3.15569252e7;
pub const SECONDS_PER_MYR: f64 = SECONDS_PER_YEAR * 1.0e6;
pub const SECONDS_PER_GYR: f64 = SECONDS_PER_YEAR * 1.0e9;

// Ideal monatomic gas
pub const GAMMA_MONATOMIC: f64 = 5.0 / 3.0;

// Fixed-composition molecular weights for a fully ionized plasma
pub const MEAN_MOLECULAR_WEIGHT: f64 = 0.61;
pub const ELECTRON_ION_WEIGHT_PRODUCT: f64 = 1.464; // mu_e * mu_i

// Default metallicity for the analytic cooling fit (in solar units)
pub const DEFAULT_METALLICITY_ZSUN: f64 = 0.3;

// Cooling-table defaults. The reference temperature is chosen well above any
// temperature the caller will ever hand in; the floor matches the lower edge
// of the analytic fit's well-resolved range.
pub const DEFAULT_TEF_SAMPLE_COUNT: usize = 512;
pub const DEFAULT_T_REF_K: f64 = 1.0e14;
pub const DEFAULT_T_MIN_K: f64 = 1.0e4;

// Lower clamp applied to both branches of the analytic fit, in log10 space
pub const LOG10_LAMBDA_FLOOR: f64 = -30.0;
