//! Color Resolver: maps series names to display colors.
//!
//! Lookup order is caller overrides, then the built-in table, then a stable
//! pick from the Office palette so unknown names still get a fixed color.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Plain 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Outline color for consumed layers.
pub const CONSUMED_OUTLINE: Rgb = Rgb(128, 128, 128);

pub const DECORATION: &str = "Decoration";
pub const GRID: &str = "Grid";
pub const DEMAND: &str = "Demand";
pub const STORAGE: &str = "Storage";
pub const PURCHASE: &str = "Purchase";
pub const FEED_IN: &str = "Feed-In";

const DEFAULT_COLORS: &[(&str, Rgb)] = &[
    ("Biomass plant", Rgb(0, 122, 55)),
    ("Coal plant", Rgb(100, 100, 100)),
    ("Gas plant", Rgb(237, 227, 0)),
    ("Gud plant", Rgb(153, 153, 0)),
    ("Hydro plant", Rgb(198, 188, 240)),
    ("Lignite plant", Rgb(116, 66, 65)),
    ("Photovoltaics", Rgb(243, 174, 0)),
    ("Slack powerplant", Rgb(163, 74, 130)),
    ("Wind park", Rgb(122, 179, 225)),
    (DECORATION, Rgb(128, 128, 128)),
    (GRID, Rgb(240, 240, 240)),
    (DEMAND, Rgb(25, 25, 25)),
    ("Overproduction", Rgb(190, 0, 99)),
    (STORAGE, Rgb(60, 36, 154)),
    ("Stock", Rgb(222, 222, 222)),
    (PURCHASE, Rgb(0, 51, 89)),
    (FEED_IN, Rgb(255, 204, 0)),
];

/// Microsoft Office (2013+) chart series palette, used for unknown names.
const OFFICE10: [Rgb; 10] = [
    Rgb(68, 114, 196),  // blue      (#4472C4)
    Rgb(237, 125, 49),  // orange    (#ED7D31)
    Rgb(165, 165, 165), // gray      (#A5A5A5)
    Rgb(255, 192, 0),   // gold      (#FFC000)
    Rgb(91, 155, 213),  // light blue(#5B9BD5)
    Rgb(112, 173, 71),  // green     (#70AD47)
    Rgb(38, 68, 120),   // dark blue (#264478)
    Rgb(158, 72, 14),   // dark org. (#9E480E)
    Rgb(99, 99, 99),    // dark gray (#636363)
    Rgb(153, 115, 0),   // brownish  (#997300)
];

/// Name → color lookup with optional per-render overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    overrides: HashMap<String, Rgb>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides<I, S>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, Rgb)>,
        S: Into<String>,
    {
        Self {
            overrides: overrides.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, color: Rgb) {
        self.overrides.insert(name.into(), color);
    }

    /// Color for `name`. Total: every name maps to some color.
    pub fn to_color(&self, name: &str) -> Rgb {
        if let Some(c) = self.overrides.get(name) {
            return *c;
        }
        DEFAULT_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
            .unwrap_or_else(|| fallback_color(name))
    }
}

fn fallback_color(name: &str) -> Rgb {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    OFFICE10[(hasher.finish() % OFFICE10.len() as u64) as usize]
}
