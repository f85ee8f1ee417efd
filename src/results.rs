//! Access to optimization results.
//!
//! Chart composition only talks to [`ResultSource`]. [`ModelResults`] is the
//! bundled implementation, deserialized from a JSON results file (see
//! [`crate::storage::load_results`]). All series in the file are aligned to
//! its `timesteps` list.
//!
//! ```no_run
//! use ebplot::results::ResultSource;
//!
//! let results = ebplot::storage::load_results("results.json")?;
//! let horizon = results.timesteps();
//! let raw = results.get_timeseries("Elec", "Mid", &horizon[..24])?;
//! println!("{} created series", raw.created.n_columns());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::error::{PlotError, Result};
use crate::models::{
    CommodityKind, CommodityTuple, Constants, PriceTable, RawBalance, Series, StorageCapacity,
    Timestep, TimeseriesTable,
};
use crate::viz::reshape::{LEVEL, RETRIEVED, STORED};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read access to a solved model, as needed for plotting.
pub trait ResultSource {
    /// The full simulated horizon, sorted.
    fn timesteps(&self) -> Vec<Timestep>;

    /// Raw created/consumed/stored/imported/exported tables over `timesteps`.
    fn get_timeseries(
        &self,
        commodity: &str,
        site: &str,
        timesteps: &[Timestep],
    ) -> Result<RawBalance>;

    fn get_constants(&self) -> Constants;

    fn commodity_tuples(&self) -> &[CommodityTuple];

    /// Names of all commodities of the given type (e.g. the buy set).
    fn commodity_names(&self, kind: CommodityKind) -> BTreeSet<String> {
        self.commodity_tuples()
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.commodity.clone())
            .collect()
    }

    /// Price timeseries for every tuple that has one.
    fn get_com_price(&self, tuples: &[CommodityTuple]) -> PriceTable;
}

/// Commodity tuples whose commodity name is in `names`.
pub fn commodity_subset(tuples: &[CommodityTuple], names: &BTreeSet<String>) -> Vec<CommodityTuple> {
    tuples
        .iter()
        .filter(|t| names.contains(&t.commodity))
        .cloned()
        .collect()
}

/// Timeseries of one (commodity, site) balance, aligned to the model horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceRecord {
    pub commodity: String,
    pub site: String,
    pub created: Vec<Series>,
    pub consumed: Vec<Series>,
    /// `Stored`, `Retrieved`, `Level`. Empty when the site has no storage.
    #[serde(default)]
    pub stored: Vec<Series>,
    #[serde(default)]
    pub imported: Vec<Series>,
    #[serde(default)]
    pub exported: Vec<Series>,
}

/// Price timeseries of one buy/sell commodity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    pub site: String,
    pub commodity: String,
    pub kind: CommodityKind,
    pub values: Vec<f64>,
}

impl PriceRecord {
    fn key(&self) -> CommodityTuple {
        CommodityTuple::new(&self.site, &self.commodity, self.kind)
    }
}

/// Results of one solved model run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ModelResults {
    pub timesteps: Vec<Timestep>,
    pub balances: Vec<BalanceRecord>,
    #[serde(default)]
    pub commodities: Vec<CommodityTuple>,
    #[serde(default)]
    pub prices: Vec<PriceRecord>,
    #[serde(default)]
    pub storage_capacity: Vec<StorageCapacity>,
}

impl ModelResults {
    /// Check that every series has one value per timestep.
    pub fn validate(&self) -> Result<()> {
        let n = self.timesteps.len();
        let check = |name: &str, len: usize| {
            if len == n {
                Ok(())
            } else {
                Err(PlotError::LengthMismatch {
                    name: name.to_string(),
                    expected: n,
                    actual: len,
                })
            }
        };
        for b in &self.balances {
            for s in b
                .created
                .iter()
                .chain(&b.consumed)
                .chain(&b.stored)
                .chain(&b.imported)
                .chain(&b.exported)
            {
                check(&s.name, s.values.len())?;
            }
        }
        for p in &self.prices {
            check(&p.commodity, p.values.len())?;
        }
        Ok(())
    }

    fn balance(&self, commodity: &str, site: &str) -> Result<&BalanceRecord> {
        self.balances
            .iter()
            .find(|b| b.commodity == commodity && b.site == site)
            .ok_or_else(|| PlotError::UnknownBalance {
                commodity: commodity.to_string(),
                site: site.to_string(),
            })
    }

    fn table(&self, columns: &[Series], timesteps: &[Timestep]) -> Result<TimeseriesTable> {
        TimeseriesTable::from_columns(self.timesteps.clone(), columns.to_vec())?.slice_to(timesteps)
    }
}

impl ResultSource for ModelResults {
    fn timesteps(&self) -> Vec<Timestep> {
        let mut tm = self.timesteps.clone();
        tm.sort_unstable();
        tm
    }

    fn get_timeseries(
        &self,
        commodity: &str,
        site: &str,
        timesteps: &[Timestep],
    ) -> Result<RawBalance> {
        let b = self.balance(commodity, site)?;
        let stored = if b.stored.is_empty() {
            let zeros = vec![0.0; timesteps.len()];
            TimeseriesTable::from_columns(
                timesteps.to_vec(),
                vec![
                    Series::new(STORED, zeros.clone()),
                    Series::new(RETRIEVED, zeros.clone()),
                    Series::new(LEVEL, zeros),
                ],
            )?
        } else {
            self.table(&b.stored, timesteps)?
        };
        Ok(RawBalance {
            created: self.table(&b.created, timesteps)?,
            consumed: self.table(&b.consumed, timesteps)?,
            stored,
            imported: self.table(&b.imported, timesteps)?,
            exported: self.table(&b.exported, timesteps)?,
        })
    }

    fn get_constants(&self) -> Constants {
        Constants {
            csto: self.storage_capacity.clone(),
        }
    }

    fn commodity_tuples(&self) -> &[CommodityTuple] {
        &self.commodities
    }

    fn get_com_price(&self, tuples: &[CommodityTuple]) -> PriceTable {
        let columns = self
            .prices
            .iter()
            .filter(|p| tuples.contains(&p.key()))
            .map(|p| (p.key(), p.values.clone()))
            .collect();
        PriceTable {
            index: self.timesteps.clone(),
            columns,
        }
    }
}
