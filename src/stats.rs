use crate::models::{Series, TimeseriesTable};
use serde::{Deserialize, Serialize};

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub name: String,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Population standard deviation (divides by `count`, not `count - 1`).
    pub std: Option<f64>,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Population standard deviation; `0.0` for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    match mean(values) {
        Some(m) => {
            let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
            var.sqrt()
        }
        None => 0.0,
    }
}

pub fn summarize(series: &Series) -> Summary {
    let vals = &series.values;
    let min = vals.iter().cloned().reduce(f64::min);
    let max = vals.iter().cloned().reduce(f64::max);
    let mean = mean(vals);
    let std = mean.map(|_| population_std(vals));
    Summary {
        name: series.name.clone(),
        count: vals.len(),
        min,
        max,
        mean,
        std,
    }
}

/// One summary per column, in column order.
pub fn table_summary(table: &TimeseriesTable) -> Vec<Summary> {
    table.columns().iter().map(summarize).collect()
}
