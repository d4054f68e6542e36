/// Build cooling tables for the bundled abundance presets and print their
/// summaries, then spot-check how faithfully a table reproduces its model
/// at random off-node temperatures.
use exact_cooling_rust::cooling_rate::{
    ABUNDANCE_FITS, AbundanceSet, CoolingRate, PowerLawRate,
};
use exact_cooling_rust::cooling_table::{CoolingTableConfig, PiecewiseCoolingTable};
use exact_cooling_rust::cell_step::local_cooling_rate;
use exact_cooling_rust::math_utils::deviation;
use exact_cooling_rust::table_report::print_table_summary;
use rand::Rng;

fn main() {
    let config = CoolingTableConfig {
        sample_count: 257,
        t_min_k: 1.0e4,
        t_ref_k: 1.0e12,
    };

    for set in [
        AbundanceSet::Primordial,
        AbundanceSet::SubSolar,
        AbundanceSet::IntraclusterMedium,
        AbundanceSet::Solar,
    ] {
        let fit = &ABUNDANCE_FITS[&set];
        let table = PiecewiseCoolingTable::build(&config, fit).expect("fit table must build");
        println!("\n--- {} (Z = {} Zsun) ---", set.as_str(), fit.metallicity_zsun);
        print_table_summary(&table);
    }

    let law = PowerLawRate::bremsstrahlung_like();
    let table = PiecewiseCoolingTable::build(&config, &law).expect("power-law table must build");
    println!("\n--- bremsstrahlung-like power law ---");
    print_table_summary(&table);

    // off-node fidelity check: the sqrt(T) law is a single power law, so
    // the table should reproduce it to rounding error anywhere
    let mut rng = rand::rng();
    let mut worst = 0.0f64;
    for _ in 0..10_000 {
        let temp_k = 10f64.powf(rng.random_range(4.0..12.0));
        let k = table.interval_for_temp(temp_k);
        let dev = deviation(
            local_cooling_rate(&table, temp_k, k),
            law.lambda_erg_cm3_s(temp_k),
        );
        worst = worst.max(dev);
    }
    println!("\nworst off-node rate deviation over 10000 draws: {:.3e}%", worst);
}
