//! Error types for chart composition.

use crate::models::{CommodityKind, Timestep};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    /// A required named series is absent from a table. Aborts the render.
    #[error("missing series '{series}' in {table} table")]
    MissingSeries { series: String, table: String },

    /// No price column for the given key. Absorbed by the secondary panel.
    #[error("no price data for ({site}, {commodity}, {kind})")]
    MissingMetadata {
        site: String,
        commodity: String,
        kind: CommodityKind,
    },

    /// No storage capacity for (site, commodity). Absorbed by the storage panel.
    #[error("no storage capacity for {commodity} in {site}")]
    EmptyCapacityLookup { site: String, commodity: String },

    #[error("no balance for commodity {commodity} in site {site}")]
    UnknownBalance { commodity: String, site: String },

    #[error("timestep {0} is outside the simulated horizon")]
    UnknownTimestep(Timestep),

    #[error("no timesteps to plot")]
    EmptyHorizon,

    #[error("series '{name}' has {actual} values, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("series '{0}' appears twice in one table")]
    DuplicateSeries(String),

    #[error("tables do not share the same timestep index")]
    IndexMismatch,

    #[error("render error: {0}")]
    Render(String),
}

impl PlotError {
    pub(crate) fn missing(series: &str, table: &str) -> Self {
        PlotError::MissingSeries {
            series: series.to_string(),
            table: table.to_string(),
        }
    }

    pub(crate) fn render<E: std::fmt::Debug>(e: E) -> Self {
        PlotError::Render(format!("{:?}", e))
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
