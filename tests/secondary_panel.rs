use ebplot::PlotError;
use ebplot::models::{CommodityKind, CommodityTuple, Constants, Series, StorageCapacity};
use ebplot::results::{ModelResults, PriceRecord};
use ebplot::viz::color::{FEED_IN, PURCHASE, STORAGE};
use ebplot::viz::secondary::{price_panel, storage_capacity, storage_panel};
use ebplot::viz::ColorMap;

fn results_with_prices(prices: Vec<PriceRecord>) -> ModelResults {
    let commodities = prices
        .iter()
        .map(|p| CommodityTuple::new(&p.site, &p.commodity, p.kind))
        .collect();
    ModelResults {
        timesteps: vec![0, 1, 2, 3],
        commodities,
        prices,
        ..Default::default()
    }
}

fn capacity(site: &str, storage: &str, commodity: &str, c_total: f64) -> StorageCapacity {
    StorageCapacity {
        site: site.to_string(),
        storage: storage.to_string(),
        commodity: commodity.to_string(),
        c_total,
    }
}

#[test]
fn missing_price_keys_leave_curves_empty() {
    let results = results_with_prices(Vec::new());
    let panel = price_panel(&results, "Mid", &[0, 1, 2], &ColorMap::new()).unwrap();
    assert_eq!(panel.lines.len(), 2);
    assert!(panel.lines.iter().all(|l| l.is_empty()));
    assert!(panel.layers.is_empty());
    assert_eq!(panel.y_label, "Costs (Euro/MWh)");
}

#[test]
fn buy_and_sell_curves_follow_chart_timesteps() {
    let results = results_with_prices(vec![
        PriceRecord {
            site: "Mid".into(),
            commodity: "Elec buy".into(),
            kind: CommodityKind::Buy,
            values: vec![40.0, 41.0, 42.0, 43.0],
        },
        PriceRecord {
            site: "Mid".into(),
            commodity: "Elec sell".into(),
            kind: CommodityKind::Sell,
            values: vec![5.0, 6.0, 7.0, 8.0],
        },
    ]);
    let colors = ColorMap::new();
    let panel = price_panel(&results, "Mid", &[1, 2], &colors).unwrap();
    let buy = &panel.lines[0];
    let sell = &panel.lines[1];
    assert_eq!(buy.values, vec![41.0, 42.0]);
    assert_eq!(buy.color, colors.to_color(PURCHASE));
    assert_eq!(sell.values, vec![6.0, 7.0]);
    assert_eq!(sell.color, colors.to_color(FEED_IN));
}

#[test]
fn prices_of_other_sites_are_ignored() {
    let results = results_with_prices(vec![PriceRecord {
        site: "North".into(),
        commodity: "Elec buy".into(),
        kind: CommodityKind::Buy,
        values: vec![1.0, 1.0, 1.0, 1.0],
    }]);
    let panel = price_panel(&results, "Mid", &[0, 1], &ColorMap::new()).unwrap();
    assert!(panel.lines[0].is_empty());
    assert!(panel.lines[1].is_empty());
}

#[test]
fn price_outside_horizon_is_an_error() {
    let results = results_with_prices(vec![PriceRecord {
        site: "Mid".into(),
        commodity: "Elec buy".into(),
        kind: CommodityKind::Buy,
        values: vec![1.0, 1.0, 1.0, 1.0],
    }]);
    assert!(matches!(
        price_panel(&results, "Mid", &[2, 9], &ColorMap::new()),
        Err(PlotError::UnknownTimestep(9))
    ));
}

#[test]
fn storage_capacity_sums_matching_storages() {
    let csto = vec![
        capacity("Mid", "Pump", "Elec", 100.0),
        capacity("Mid", "Battery", "Elec", 20.0),
        capacity("Mid", "Tank", "Heat", 7.0),
        capacity("North", "Pump", "Elec", 50.0),
    ];
    assert_eq!(storage_capacity(&csto, "Mid", "Elec").unwrap(), 120.0);
    match storage_capacity(&csto, "South", "Elec") {
        Err(PlotError::EmptyCapacityLookup { site, commodity }) => {
            assert_eq!(site, "South");
            assert_eq!(commodity, "Elec");
        }
        other => panic!("expected EmptyCapacityLookup, got {:?}", other),
    }
}

#[test]
fn storage_panel_caps_y_axis_above_capacity() {
    let level = Series::new("Level", vec![10.0, 80.0, 40.0]);
    let constants = Constants {
        csto: vec![capacity("Mid", "Pump", "Elec", 100.0)],
    };
    let colors = ColorMap::new();
    let panel = storage_panel(&level, &constants, "Mid", "Elec", "MWh", &colors);
    assert_eq!(panel.y_limits, Some((0.0, 100.5)));
    assert_eq!(panel.y_label, "Energy (MWh)");
    assert_eq!(panel.layers.len(), 1);
    assert_eq!(panel.layers[0].fill, colors.to_color(STORAGE));
    assert_eq!(panel.layers[0].upper, level.values);
    assert_eq!(panel.layers[0].lower, vec![0.0; 3]);
}

#[test]
fn storage_panel_without_capacity_auto_scales() {
    let level = Series::new("Level", vec![1.0, 2.0]);
    let panel = storage_panel(
        &level,
        &Constants::default(),
        "Mid",
        "Elec",
        "MWh",
        &ColorMap::new(),
    );
    assert_eq!(panel.y_limits, None);
}
