/// Evolve a single uniform gas parcel under exact cooling: hot gas at
/// 1e6 K and 1 cm^-3. Shows a single closed-form step handling any
/// timestep without sub-cycling, then a resolved cooling track.
use exact_cooling_rust::cell_step::{cooling_time_s, local_cooling_rate};
use exact_cooling_rust::config::ExactCoolingConfig;
use exact_cooling_rust::constants::{ELECTRON_ION_WEIGHT_PRODUCT, SECONDS_PER_MYR};
use exact_cooling_rust::cooling_op::{ExactCoolingOp, GasCell};
use exact_cooling_rust::cooling_rate::{CoolingRate, SutherlandDopitaFit, emissivity_erg_cm3_s};
use exact_cooling_rust::math_utils::geometric_samples;
use exact_cooling_rust::temp_utils::{mass_density_g_cm3, pressure_erg_cm3};

fn main() {
    println!("Single-parcel exact cooling");
    println!("===========================");

    let config = ExactCoolingConfig::default();
    let mut op = ExactCoolingOp::from_config(&config).expect("default config must build");

    let number_density = 1.0; // cm^-3
    let start_temp_k = 1.0e6;
    let density = mass_density_g_cm3(number_density);

    let fit = SutherlandDopitaFit::new(config.metallicity_zsun);
    let table = op.table();
    let k = table.interval_for_temp(start_temp_k);
    let lambda_local = local_cooling_rate(&table, start_temp_k, k);
    let t_cool = cooling_time_s(op.gas(), number_density, start_temp_k, lambda_local);

    println!(
        "n = {:.2} cm^-3, T0 = {:.3e} K, P0 = {:.3e} erg/cm^3, Z = {} Zsun",
        number_density,
        start_temp_k,
        pressure_erg_cm3(number_density, start_temp_k),
        config.metallicity_zsun
    );
    println!(
        "Lambda(T0) = {:.4e} erg cm^3/s, emissivity = {:.4e} erg/cm^3/s",
        fit.lambda_erg_cm3_s(start_temp_k),
        emissivity_erg_cm3_s(density, fit.lambda_erg_cm3_s(start_temp_k), ELECTRON_ION_WEIGHT_PRODUCT)
    );
    println!("local cooling time: {:.4e} s ({:.3} Myr)\n", t_cool, t_cool / SECONDS_PER_MYR);

    // One exact step per timestep, no sub-cycling, across four decades of
    // step size; overshooting the floor just clamps.
    println!("single-step sweep:");
    println!("{:>16} {:>14} {:>18}", "dt [t_cool]", "T_new [K]", "<dE/dt> [erg/cm^3/s]");
    for dt_s in geometric_samples(0.01 * t_cool, 100.0 * t_cool, 9) {
        let result = op.step_cell(density, start_temp_k, dt_s);
        println!(
            "{:>16.4} {:>14.5e} {:>18.5e}",
            dt_s / t_cool,
            result.temp_new_k,
            result.dedt_mean_erg_cm3_s
        );
    }

    // Resolved track at a tenth of the initial cooling time per step.
    println!("\nresolved track (dt = t_cool / 10):");
    println!("{:>12} {:>14}", "t [Myr]", "T [K]");
    let dt_s = t_cool / 10.0;
    let mut cells = vec![GasCell { density_g_cm3: density, temp_k: start_temp_k }];
    let mut elapsed_s = 0.0;
    println!("{:>12.4} {:>14.5e}", 0.0, cells[0].temp_k);

    for step in 1..=400 {
        op.advance(&mut cells, dt_s);
        elapsed_s += dt_s;
        if step % 20 == 0 || cells[0].temp_k <= op.table().t_min_k() {
            println!("{:>12.4} {:>14.5e}", elapsed_s / SECONDS_PER_MYR, cells[0].temp_k);
        }
        if cells[0].temp_k <= op.table().t_min_k() {
            println!("\nparcel reached the {:.1e} K floor", op.table().t_min_k());
            break;
        }
    }

    println!(
        "total energy radiated: {:.4e} erg/cm^3 over {} steps",
        op.total_energy_lost_erg_cm3(),
        op.step_count()
    );
}
