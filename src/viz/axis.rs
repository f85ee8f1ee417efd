//! Axis Scaler: horizon-dependent tick spacing and shared axis cosmetics.

use super::color::{ColorMap, DECORATION, GRID};
use super::types::AxisSpec;
use crate::error::{PlotError, Result};
use crate::models::Timestep;

const DAY: usize = 24;
const WEEK: usize = 7 * DAY;

/// Steps between x ticks for a horizon of `len` steps (one step = one hour).
pub fn tick_stride(len: usize) -> usize {
    if len > 26 * WEEK {
        4 * WEEK
    } else if len > 3 * WEEK {
        WEEK
    } else if len > 2 * DAY {
        DAY
    } else if len > DAY {
        6
    } else {
        3
    }
}

/// Every `tick_stride`-th timestep, starting with the first.
pub fn x_ticks(timesteps: &[Timestep]) -> Vec<Timestep> {
    let stride = tick_stride(timesteps.len());
    timesteps.iter().step_by(stride).copied().collect()
}

/// Axis configuration for both panels: ticks, fixed x-limits and colors.
pub fn axis_spec(timesteps: &[Timestep], colors: &ColorMap) -> Result<AxisSpec> {
    let (first, last) = match (timesteps.first(), timesteps.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(PlotError::EmptyHorizon),
    };
    Ok(AxisSpec {
        stride: tick_stride(timesteps.len()),
        x_ticks: x_ticks(timesteps),
        x_range: (first, last),
        decoration: colors.to_color(DECORATION),
        grid: colors.to_color(GRID),
    })
}
