//! ebplot
//!
//! Turn energy-system optimization results into commodity balance charts.
//! Pairs with the `ebplot` CLI.
//!
//! ### Features
//! - Stacked created/consumed flows per (commodity, site), base load at the bottom
//! - Demand line overlay and a one-row color legend
//! - Lower panel with buy/sell prices or storage state of charge
//! - Tick spacing adapted to the plotted horizon (hours up to months)
//! - SVG/PNG output, CSV/JSON export of the reshaped balance
//!
//! ### Example
//! ```no_run
//! use ebplot::viz::{self, ColorMap, FigureOptions};
//!
//! let results = ebplot::storage::load_results("results.json")?;
//! let fig = viz::figure(
//!     &results,
//!     &ColorMap::new(),
//!     "Elec",
//!     "Mid",
//!     None,
//!     &FigureOptions::default(),
//! )?;
//! fig.save("elec-mid.png", 1600, 800, "en")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod results;
pub mod stats;
pub mod storage;
pub mod viz;

pub use error::PlotError;
pub use models::{Series, Timestep, TimeseriesTable};
pub use results::{ModelResults, ResultSource};
