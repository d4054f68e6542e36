// src/table_report.rs - Terminal summary of a built cooling table

use crate::cooling_table::PiecewiseCoolingTable;
use colored::Colorize;

/// Aggregate numbers a quick look at a table needs.
#[derive(Debug, Clone, Copy)]
pub struct TableSummary {
    pub sample_count: usize,
    pub t_min_k: f64,
    pub t_ref_k: f64,
    pub alpha_min: f64,
    pub alpha_max: f64,
    /// Intervals with a slope inside (0.9, 1.1), near the logarithmic
    /// special case.
    pub near_unit_slope_intervals: usize,
    /// Whether the left-edge TEF constants decrease strictly with index,
    /// the invariant the descending interval search relies on.
    pub y_const_strictly_ordered: bool,
}

pub fn summarize_table(table: &PiecewiseCoolingTable) -> TableSummary {
    let n = table.sample_count();
    let mut alpha_min = f64::INFINITY;
    let mut alpha_max = f64::NEG_INFINITY;
    let mut near_unit = 0;
    let mut ordered = true;

    for k in 0..n - 1 {
        let alpha = table.alpha(k);
        alpha_min = alpha_min.min(alpha);
        alpha_max = alpha_max.max(alpha);
        if (alpha - 1.0).abs() < 0.1 {
            near_unit += 1;
        }
        if table.y_const(k) <= table.y_const(k + 1) {
            ordered = false;
        }
    }

    TableSummary {
        sample_count: n,
        t_min_k: table.t_min_k(),
        t_ref_k: table.t_ref_k(),
        alpha_min,
        alpha_max,
        near_unit_slope_intervals: near_unit,
        y_const_strictly_ordered: ordered,
    }
}

/// Print a table overview: bounds, slope extremes, ordering check, and a
/// handful of evenly spaced interval rows.
pub fn print_table_summary(table: &PiecewiseCoolingTable) {
    let summary = summarize_table(table);

    println!("{}", "Piecewise cooling table".bold());
    println!(
        "  {} samples, T = [{:.3e}, {:.3e}] K, dlogT = {:.4}",
        summary.sample_count,
        summary.t_min_k,
        summary.t_ref_k,
        table.dlog_temp()
    );
    println!(
        "  slope range: [{:.3}, {:.3}], {} interval(s) near the unit slope",
        summary.alpha_min, summary.alpha_max, summary.near_unit_slope_intervals
    );

    if summary.y_const_strictly_ordered {
        println!("  TEF constants: {}", "strictly ordered".green());
    } else {
        println!(
            "  TEF constants: {}",
            "NOT strictly ordered - inversion unsafe".red().bold()
        );
    }

    println!(
        "  {:>6} {:>13} {:>13} {:>9} {:>13}",
        "k".dimmed(),
        "T_k [K]".dimmed(),
        "lambda".dimmed(),
        "alpha".dimmed(),
        "Y_k".dimmed()
    );
    let rows = 8.min(summary.sample_count - 1);
    for row in 0..=rows {
        let k = (row * (summary.sample_count - 2)) / rows.max(1);
        println!(
            "  {:>6} {:>13.4e} {:>13.4e} {:>9.4} {:>13.5e}",
            k,
            table.sample_temp_k(k),
            table.lambda(k),
            table.alpha(k),
            table.y_const(k)
        );
    }
}
