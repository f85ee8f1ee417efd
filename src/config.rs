//! Chart configuration loaded from JSON.
//!
//! Every field is optional:
//!
//! ```json
//! {
//!   "width": 1600,
//!   "height": 800,
//!   "secondary": "storage",
//!   "colors": { "Wind park": [0, 82, 147] },
//!   "plots": [{ "commodity": "Elec", "site": "Mid" }],
//!   "periods": { "aut": [5000, 5168] }
//! }
//! ```

use crate::models::Timestep;
use crate::viz::{ColorMap, FigureOptions, Rgb, SecondaryKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One (commodity, site) chart to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotTarget {
    pub commodity: String,
    pub site: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub power_unit: String,
    pub energy_unit: String,
    /// Locale tag for y tick labels, e.g. `en` or `de`.
    pub locale: String,
    pub secondary: SecondaryKind,
    pub title_prefix: Option<String>,
    /// Color overrides as `[r, g, b]`, keyed by series name.
    pub colors: BTreeMap<String, [u8; 3]>,
    pub plots: Vec<PlotTarget>,
    /// Named inclusive timestep ranges.
    pub periods: BTreeMap<String, (Timestep, Timestep)>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
            power_unit: "MW".to_string(),
            energy_unit: "MWh".to_string(),
            locale: "en".to_string(),
            secondary: SecondaryKind::Prices,
            title_prefix: None,
            colors: BTreeMap::new(),
            plots: Vec::new(),
            periods: BTreeMap::new(),
        }
    }
}

impl ChartConfig {
    pub fn color_map(&self) -> ColorMap {
        ColorMap::with_overrides(
            self.colors
                .iter()
                .map(|(name, [r, g, b])| (name.clone(), Rgb(*r, *g, *b))),
        )
    }

    pub fn figure_options(&self) -> FigureOptions {
        FigureOptions {
            power_unit: self.power_unit.clone(),
            energy_unit: self.energy_unit.clone(),
            secondary: self.secondary,
            title_prefix: self.title_prefix.clone(),
        }
    }

    /// Named periods as timestep lists; `all` covering `horizon` when none are configured.
    pub fn period_timesteps(&self, horizon: &[Timestep]) -> Vec<(String, Vec<Timestep>)> {
        if self.periods.is_empty() {
            return vec![("all".to_string(), horizon.to_vec())];
        }
        self.periods
            .iter()
            .map(|(name, (start, end))| (name.clone(), (*start..=*end).collect()))
            .collect()
    }
}
