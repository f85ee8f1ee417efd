use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One simulation time step (one hour).
pub type Timestep = u32;

/// A named column of a [`TimeseriesTable`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// All-zero across the horizon (an empty series counts as all-zero).
    pub fn is_all_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

/// Timestamps mapped to an ordered set of named series.
///
/// Every column holds exactly one value per index entry. Column order is
/// significant: it is the draw order of stacked layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(try_from = "TableFields")]
pub struct TimeseriesTable {
    index: Vec<Timestep>,
    columns: Vec<Series>,
}

/// Wire form of a table, checked through [`TimeseriesTable::from_columns`].
#[derive(Deserialize)]
struct TableFields {
    index: Vec<Timestep>,
    #[serde(default)]
    columns: Vec<Series>,
}

impl TryFrom<TableFields> for TimeseriesTable {
    type Error = PlotError;

    fn try_from(fields: TableFields) -> Result<Self> {
        Self::from_columns(fields.index, fields.columns)
    }
}

impl TimeseriesTable {
    /// Empty table (no columns) over `index`.
    pub fn new(index: Vec<Timestep>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    pub fn from_columns(index: Vec<Timestep>, columns: Vec<Series>) -> Result<Self> {
        let mut table = Self::new(index);
        for s in columns {
            table.push(s)?;
        }
        Ok(table)
    }

    pub fn index(&self) -> &[Timestep] {
        &self.index
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a column; its length must match the index and its name must be new.
    pub fn push(&mut self, series: Series) -> Result<()> {
        if series.values.len() != self.index.len() {
            return Err(PlotError::LengthMismatch {
                name: series.name,
                expected: self.index.len(),
                actual: series.values.len(),
            });
        }
        if self.contains(&series.name) {
            return Err(PlotError::DuplicateSeries(series.name));
        }
        self.columns.push(series);
        Ok(())
    }

    /// Remove and return a column by name.
    pub fn pop(&mut self, name: &str) -> Option<Series> {
        let pos = self.columns.iter().position(|s| s.name == name)?;
        Some(self.columns.remove(pos))
    }

    /// Append every column of `other` (same index required).
    pub fn join(&mut self, other: TimeseriesTable) -> Result<()> {
        if other.index != self.index && !other.columns.is_empty() {
            return Err(PlotError::IndexMismatch);
        }
        for s in other.columns {
            self.push(s)?;
        }
        Ok(())
    }

    /// Reorder columns by a permutation of column positions.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.columns.len());
        let mut old: Vec<Option<Series>> = self.columns.drain(..).map(Some).collect();
        self.columns = order.iter().filter_map(|i| old[*i].take()).collect();
    }

    /// Keep only the rows whose timestep is in `timesteps`, in that order.
    pub fn slice_to(&self, timesteps: &[Timestep]) -> Result<Self> {
        let positions = timesteps
            .iter()
            .map(|t| {
                self.index
                    .iter()
                    .position(|i| i == t)
                    .ok_or(PlotError::UnknownTimestep(*t))
            })
            .collect::<Result<Vec<usize>>>()?;
        let columns = self
            .columns
            .iter()
            .map(|s| {
                let values = positions
                    .iter()
                    .map(|p| {
                        s.values.get(*p).copied().ok_or_else(|| PlotError::LengthMismatch {
                            name: s.name.clone(),
                            expected: self.index.len(),
                            actual: s.values.len(),
                        })
                    })
                    .collect::<Result<Vec<f64>>>()?;
                Ok(Series::new(s.name.clone(), values))
            })
            .collect::<Result<Vec<Series>>>()?;
        Ok(Self {
            index: timesteps.to_vec(),
            columns,
        })
    }
}

/// Commodity type as used by the optimization model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CommodityKind {
    SupIm,
    Stock,
    Demand,
    Buy,
    Sell,
    Env,
}

impl fmt::Display for CommodityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CommodityKind::SupIm => "SupIm",
            CommodityKind::Stock => "Stock",
            CommodityKind::Demand => "Demand",
            CommodityKind::Buy => "Buy",
            CommodityKind::Sell => "Sell",
            CommodityKind::Env => "Env",
        };
        f.write_str(s)
    }
}

/// (site, commodity, type) as in the model's commodity index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommodityTuple {
    pub site: String,
    pub commodity: String,
    pub kind: CommodityKind,
}

impl CommodityTuple {
    pub fn new(site: &str, commodity: &str, kind: CommodityKind) -> Self {
        Self {
            site: site.to_string(),
            commodity: commodity.to_string(),
            kind,
        }
    }
}

/// Price timeseries keyed by commodity tuple.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    pub index: Vec<Timestep>,
    pub columns: Vec<(CommodityTuple, Vec<f64>)>,
}

impl PriceTable {
    /// Price column for an exact key.
    pub fn column(&self, key: &CommodityTuple) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| PlotError::MissingMetadata {
                site: key.site.clone(),
                commodity: key.commodity.clone(),
                kind: key.kind,
            })
    }

    /// Price column for `key`, restricted to `timesteps`.
    pub fn values_at(&self, key: &CommodityTuple, timesteps: &[Timestep]) -> Result<Vec<f64>> {
        let column = self.column(key)?;
        timesteps
            .iter()
            .map(|t| {
                self.index
                    .iter()
                    .position(|i| i == t)
                    .and_then(|p| column.get(p).copied())
                    .ok_or(PlotError::UnknownTimestep(*t))
            })
            .collect()
    }
}

/// Installed storage capacity (`C Total`) for one storage technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageCapacity {
    pub site: String,
    pub storage: String,
    pub commodity: String,
    pub c_total: f64,
}

/// Scalar result tables. Only the storage capacity table is consumed by charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constants {
    pub csto: Vec<StorageCapacity>,
}

/// The five raw tables of one (commodity, site) balance over a timestep range.
///
/// `stored` carries the `Stored`, `Retrieved` and `Level` series.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBalance {
    pub created: TimeseriesTable,
    pub consumed: TimeseriesTable,
    pub stored: TimeseriesTable,
    pub imported: TimeseriesTable,
    pub exported: TimeseriesTable,
}
