//! Public types for the composed chart.

use super::color::Rgb;
use crate::models::Timestep;
use serde::{Deserialize, Serialize};

/// What the lower panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryKind {
    /// Buy/sell price curves (default).
    #[default]
    Prices,
    /// Storage state of charge.
    Storage,
}

/// Options for [`super::figure`].
#[derive(Debug, Clone, PartialEq)]
pub struct FigureOptions {
    pub power_unit: String,
    pub energy_unit: String,
    pub secondary: SecondaryKind,
    /// Prepended to the chart title, e.g. a scenario name.
    pub title_prefix: Option<String>,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            power_unit: "MW".to_string(),
            energy_unit: "MWh".to_string(),
            secondary: SecondaryKind::default(),
            title_prefix: None,
        }
    }
}

/// One filled band of a stack, between `lower` and `upper` at each timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayer {
    pub name: String,
    pub fill: Rgb,
    pub outline: Rgb,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// A line drawn over a panel. Empty `values` draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOverlay {
    pub name: String,
    pub color: Rgb,
    pub width: u32,
    pub values: Vec<f64>,
}

impl LineOverlay {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A colored legend swatch with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
    pub outline: Rgb,
}

/// A drawable region: stacked layers, line overlays and axis labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: String,
    pub layers: Vec<StackLayer>,
    pub lines: Vec<LineOverlay>,
    /// Fixed y-range; `None` means auto-range from the data.
    pub y_limits: Option<(f64, f64)>,
    pub show_x_labels: bool,
}

/// Tick and cosmetic configuration shared by both panels.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub stride: usize,
    pub x_ticks: Vec<Timestep>,
    pub x_range: (Timestep, Timestep),
    pub decoration: Rgb,
    pub grid: Rgb,
}

/// A fully composed two-panel chart. Rendering and saving is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub timesteps: Vec<Timestep>,
    pub primary: Panel,
    pub secondary: Panel,
    pub legend: Vec<LegendEntry>,
    pub axis: AxisSpec,
}
