//! Layer Sorter: base load at the bottom, peak load on top.

use crate::models::TimeseriesTable;
use crate::stats::population_std;

/// Reorder columns by ascending population standard deviation.
///
/// Ties keep their input order. Values are never changed and single-column
/// tables are returned as-is.
pub fn sort_by_variance(mut table: TimeseriesTable) -> TimeseriesTable {
    if table.n_columns() <= 1 {
        return table;
    }
    let stds: Vec<f64> = table
        .columns()
        .iter()
        .map(|s| population_std(&s.values))
        .collect();
    let mut order: Vec<usize> = (0..stds.len()).collect();
    // sort_by is stable
    order.sort_by(|a, b| stds[*a].total_cmp(&stds[*b]));
    table.reorder(&order);
    table
}

/// Sort both sides of a balance for plotting.
pub fn sort_plot_elements(
    created: TimeseriesTable,
    consumed: TimeseriesTable,
) -> (TimeseriesTable, TimeseriesTable) {
    (sort_by_variance(created), sort_by_variance(consumed))
}
