//! Stack Composer: turns sorted created/consumed tables into stacked bands.

use super::color::{CONSUMED_OUTLINE, ColorMap, DECORATION, DEMAND, Rgb};
use super::types::{LineOverlay, StackLayer};
use crate::models::{Series, TimeseriesTable};

/// Stack `table` column by column, bottom to top in column order.
///
/// With `negate` the stack grows downward from zero (consumed side).
fn stack_layers(
    table: &TimeseriesTable,
    colors: &ColorMap,
    outline: Rgb,
    negate: bool,
) -> Vec<StackLayer> {
    let sign = if negate { -1.0 } else { 1.0 };
    let mut cum = vec![0.0f64; table.n_rows()];
    let mut layers = Vec::with_capacity(table.n_columns());
    for series in table.columns() {
        let lower = cum.clone();
        for (c, v) in cum.iter_mut().zip(&series.values) {
            *c += sign * v;
        }
        layers.push(StackLayer {
            name: series.name.clone(),
            fill: colors.to_color(&series.name),
            outline,
            lower,
            upper: cum.clone(),
        });
    }
    layers
}

/// Positive stack of created flows, outlined in the decoration color.
pub fn created_layers(created: &TimeseriesTable, colors: &ColorMap) -> Vec<StackLayer> {
    stack_layers(created, colors, colors.to_color(DECORATION), false)
}

/// Negative stack of consumed flows, outlined in neutral gray.
pub fn consumed_layers(consumed: &TimeseriesTable, colors: &ColorMap) -> Vec<StackLayer> {
    stack_layers(consumed, colors, CONSUMED_OUTLINE, true)
}

/// Demand drawn as a thin line at its true (positive) values.
///
/// Thinner than the width-2 price curves of the lower panel.
pub fn demand_line(demand: &Series, colors: &ColorMap) -> LineOverlay {
    LineOverlay {
        name: DEMAND.to_string(),
        color: colors.to_color(DEMAND),
        width: 1,
        values: demand.values.clone(),
    }
}

/// Outer envelope of a stack: the last layer's `upper`, or zeros when empty.
pub fn envelope(layers: &[StackLayer], n_rows: usize) -> Vec<f64> {
    layers
        .last()
        .map(|l| l.upper.clone())
        .unwrap_or_else(|| vec![0.0; n_rows])
}
