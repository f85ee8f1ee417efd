use crate::config::ChartConfig;
use crate::results::ModelResults;
use crate::viz::Balance;
use anyhow::{Context, Result};
use chrono::Local;
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load and validate a JSON results file.
pub fn load_results<P: AsRef<Path>>(path: P) -> Result<ModelResults> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let results: ModelResults =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    results
        .validate()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(results)
}

/// Load a JSON chart configuration.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ChartConfig> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Save a reshaped balance as tidy CSV (`timestep,side,series,value`).
///
/// Consumed values keep their stored (positive) sign.
pub fn save_balance_csv<P: AsRef<Path>>(balance: &Balance, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("timestep", "side", "series", "value"))?;
    let sides = [("created", &balance.created), ("consumed", &balance.consumed)];
    for (side, table) in sides {
        for series in table.columns() {
            for (t, v) in table.index().iter().zip(&series.values) {
                wtr.serialize((t, side, &series.name, v))?;
            }
        }
    }
    for (t, v) in balance.created.index().iter().zip(&balance.demand.values) {
        wtr.serialize((t, "demand", &balance.demand.name, v))?;
    }
    for (t, v) in balance.created.index().iter().zip(&balance.level.values) {
        wtr.serialize((t, "storage", &balance.level.name, v))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the created/consumed tables of a balance as pretty JSON.
pub fn save_balance_json<P: AsRef<Path>>(balance: &Balance, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&serde_json::json!({
        "created": balance.created,
        "consumed": balance.consumed,
        "demand": balance.demand,
        "level": balance.level,
    }))?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Create `<base>/<name>-<YYYYMMDDTHHMM>` if it does not exist yet.
pub fn prepare_result_directory<P: AsRef<Path>>(base: P, name: &str) -> Result<PathBuf> {
    let now = Local::now().format("%Y%m%dT%H%M");
    let dir = base.as_ref().join(format!("{}-{}", name, now));
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir)
}
