//! Timeseries Reshaper: folds the five raw balance tables into stackable
//! `created` / `consumed` tables plus a standalone demand series.

use crate::error::{PlotError, Result};
use crate::models::{RawBalance, Series, TimeseriesTable};

pub const STORED: &str = "Stored";
pub const RETRIEVED: &str = "Retrieved";
pub const LEVEL: &str = "Level";
pub const STORAGE: &str = "Storage";
pub const DEMAND: &str = "Demand";

/// Result of reshaping one (commodity, site) balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    /// Supply side: processes, storage retrieval, imports.
    pub created: TimeseriesTable,
    /// Demand side without `Demand`: processes, storage charging, exports.
    pub consumed: TimeseriesTable,
    pub demand: Series,
    /// Storage state of charge.
    pub level: Series,
}

/// Reshape a raw balance. Takes ownership, so the caller's tables are never touched.
pub fn reshape(raw: RawBalance) -> Result<Balance> {
    let RawBalance {
        mut created,
        mut consumed,
        mut stored,
        imported,
        exported,
    } = raw;

    // storage flows share the name "Storage" on both sides for color mapping
    let mut retrieved = stored
        .pop(RETRIEVED)
        .ok_or_else(|| PlotError::missing(RETRIEVED, "stored"))?;
    let mut charged = stored
        .pop(STORED)
        .ok_or_else(|| PlotError::missing(STORED, "stored"))?;
    retrieved.name = STORAGE.to_string();
    charged.name = STORAGE.to_string();
    created.push(retrieved)?;
    consumed.push(charged)?;

    let level = stored
        .pop(LEVEL)
        .ok_or_else(|| PlotError::missing(LEVEL, "stored"))?;

    created.join(imported)?;
    consumed.join(exported)?;

    let demand = consumed
        .pop(DEMAND)
        .ok_or_else(|| PlotError::missing(DEMAND, "consumed"))?;

    prune_created(&mut created, &consumed);

    Ok(Balance {
        created,
        consumed,
        demand,
        level,
    })
}

/// Drop created columns that are all-zero in both tables.
///
/// Columns are checked in order and a column is only dropped while more than
/// one created column remains, so the table never ends up empty. A column
/// that is zero in `created` but non-zero in `consumed` stays.
pub fn prune_created(created: &mut TimeseriesTable, consumed: &TimeseriesTable) {
    let names: Vec<String> = created
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    for name in names {
        if created.n_columns() <= 1 {
            break;
        }
        let zero_created = created.get(&name).is_some_and(Series::is_all_zero);
        let zero_consumed = consumed.get(&name).is_none_or(Series::is_all_zero);
        if zero_created && zero_consumed {
            log::debug!("pruning all-zero series '{}'", name);
            created.pop(&name);
        }
    }
}
