//! Secondary Panel Builder: the lower panel below the balance.
//!
//! Two variants exist. The price panel shows the electricity buy and sell
//! price curves of the site. The storage panel shows the state of charge,
//! with the y-axis capped just above the installed storage capacity.

use super::color::{ColorMap, DECORATION, FEED_IN, PURCHASE, STORAGE};
use super::types::{LineOverlay, Panel, StackLayer};
use crate::error::{PlotError, Result};
use crate::models::{
    CommodityKind, CommodityTuple, Constants, PriceTable, Series, StorageCapacity, Timestep,
};
use crate::results::{ResultSource, commodity_subset};

pub const ELEC_BUY: &str = "Elec buy";
pub const ELEC_SELL: &str = "Elec sell";

const X_LABEL: &str = "Time in year (h)";

/// Price curve for `key`, or an empty line when the key has no price data.
fn price_line(
    prices: &PriceTable,
    key: &CommodityTuple,
    timesteps: &[Timestep],
    name: &str,
    color_name: &str,
    colors: &ColorMap,
) -> Result<LineOverlay> {
    let values = match prices.values_at(key, timesteps) {
        Ok(v) => v,
        Err(e @ PlotError::MissingMetadata { .. }) => {
            log::debug!("{}; drawing empty {} curve", e, name);
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    Ok(LineOverlay {
        name: name.to_string(),
        color: colors.to_color(color_name),
        width: 2,
        values,
    })
}

/// Buy and sell price curves for `site`.
///
/// Missing price keys never fail the panel; the curve is just left empty.
pub fn price_panel<S: ResultSource + ?Sized>(
    source: &S,
    site: &str,
    timesteps: &[Timestep],
    colors: &ColorMap,
) -> Result<Panel> {
    let tuples = source.commodity_tuples();

    let buy_tuples = commodity_subset(tuples, &source.commodity_names(CommodityKind::Buy));
    let buy_prices = source.get_com_price(&buy_tuples);
    let buy_key = CommodityTuple::new(site, ELEC_BUY, CommodityKind::Buy);
    let buy = price_line(&buy_prices, &buy_key, timesteps, "Buy", PURCHASE, colors)?;

    let sell_tuples = commodity_subset(tuples, &source.commodity_names(CommodityKind::Sell));
    let sell_prices = source.get_com_price(&sell_tuples);
    let sell_key = CommodityTuple::new(site, ELEC_SELL, CommodityKind::Sell);
    let sell = price_line(&sell_prices, &sell_key, timesteps, "Sell", FEED_IN, colors)?;

    Ok(Panel {
        title: None,
        x_label: Some(X_LABEL.to_string()),
        y_label: "Costs (Euro/MWh)".to_string(),
        layers: Vec::new(),
        lines: vec![buy, sell],
        y_limits: None,
        show_x_labels: true,
    })
}

/// Total installed storage capacity for (site, commodity).
pub fn storage_capacity(csto: &[StorageCapacity], site: &str, commodity: &str) -> Result<f64> {
    let matching: Vec<f64> = csto
        .iter()
        .filter(|c| c.site == site && c.commodity == commodity)
        .map(|c| c.c_total)
        .collect();
    if matching.is_empty() {
        return Err(PlotError::EmptyCapacityLookup {
            site: site.to_string(),
            commodity: commodity.to_string(),
        });
    }
    Ok(matching.iter().sum())
}

/// Storage state of charge as a single filled area.
///
/// The y-range is `0..capacity + 0.5` when the capacity is known, else automatic.
pub fn storage_panel(
    level: &Series,
    constants: &Constants,
    site: &str,
    commodity: &str,
    energy_unit: &str,
    colors: &ColorMap,
) -> Panel {
    let y_limits = match storage_capacity(&constants.csto, site, commodity) {
        Ok(cap) => Some((0.0, 0.5 + cap)),
        Err(e) => {
            log::debug!("{}; using automatic y-range", e);
            None
        }
    };
    let layer = StackLayer {
        name: STORAGE.to_string(),
        fill: colors.to_color(STORAGE),
        outline: colors.to_color(DECORATION),
        lower: vec![0.0; level.values.len()],
        upper: level.values.clone(),
    };
    Panel {
        title: None,
        x_label: Some(X_LABEL.to_string()),
        y_label: format!("Energy ({})", energy_unit),
        layers: vec![layer],
        lines: Vec::new(),
        y_limits,
        show_x_labels: true,
    }
}
