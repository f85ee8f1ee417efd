use ebplot::PlotError;
use ebplot::models::{CommodityKind, CommodityTuple};
use ebplot::results::{ModelResults, ResultSource, commodity_subset};
use ebplot::storage;
use serde_json::json;
use std::collections::BTreeSet;
use std::io::Write;

fn results_json() -> serde_json::Value {
    json!({
        "timesteps": [3, 1, 2],
        "balances": [{
            "commodity": "Elec",
            "site": "Mid",
            "created": [{ "name": "Wind park", "values": [3.0, 1.0, 2.0] }],
            "consumed": [{ "name": "Demand", "values": [30.0, 10.0, 20.0] }],
            "stored": [
                { "name": "Stored", "values": [0.0, 1.0, 0.0] },
                { "name": "Retrieved", "values": [1.0, 0.0, 0.0] },
                { "name": "Level", "values": [5.0, 6.0, 5.5] }
            ],
            "imported": [{ "name": "North", "values": [0.5, 0.5, 0.5] }]
        }, {
            "commodity": "Heat",
            "site": "Mid",
            "created": [{ "name": "Boiler", "values": [1.0, 1.0, 1.0] }],
            "consumed": [{ "name": "Demand", "values": [1.0, 1.0, 1.0] }]
        }],
        "commodities": [
            { "site": "Mid", "commodity": "Elec buy", "kind": "Buy" },
            { "site": "North", "commodity": "Elec buy", "kind": "Buy" },
            { "site": "Mid", "commodity": "Elec sell", "kind": "Sell" },
            { "site": "Mid", "commodity": "Elec", "kind": "Demand" }
        ],
        "prices": [
            { "site": "Mid", "commodity": "Elec buy", "kind": "Buy", "values": [3.0, 1.0, 2.0] },
            { "site": "Mid", "commodity": "Elec sell", "kind": "Sell", "values": [0.3, 0.1, 0.2] }
        ]
    })
}

fn results() -> ModelResults {
    serde_json::from_value(results_json()).unwrap()
}

#[test]
fn loads_and_validates_results_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", results_json()).unwrap();
    let loaded = storage::load_results(file.path()).unwrap();
    assert_eq!(loaded, results());
    assert_eq!(loaded.timesteps(), vec![1, 2, 3]);
}

#[test]
fn rejects_series_with_wrong_length() {
    let mut value = results_json();
    value["balances"][0]["created"][0]["values"] = json!([1.0]);
    let bad: ModelResults = serde_json::from_value(value).unwrap();
    match bad.validate() {
        Err(PlotError::LengthMismatch {
            name,
            expected,
            actual,
        }) => {
            assert_eq!(name, "Wind park");
            assert_eq!((expected, actual), (3, 1));
        }
        other => panic!("expected LengthMismatch, got {:?}", other),
    }

    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut value = results_json();
    value["prices"][0]["values"] = json!([]);
    write!(file, "{}", value).unwrap();
    assert!(storage::load_results(file.path()).is_err());
}

#[test]
fn timeseries_follow_requested_timesteps() {
    let r = results();
    let raw = r.get_timeseries("Elec", "Mid", &[1, 3]).unwrap();
    assert_eq!(raw.created.index(), &[1, 3]);
    assert_eq!(raw.created.get("Wind park").unwrap().values, vec![1.0, 3.0]);
    assert_eq!(raw.consumed.get("Demand").unwrap().values, vec![10.0, 30.0]);
    assert_eq!(raw.stored.get("Level").unwrap().values, vec![6.0, 5.0]);
    assert_eq!(raw.imported.column_names(), vec!["North"]);
    assert_eq!(raw.exported.n_columns(), 0);
    assert_eq!(raw.exported.n_rows(), 2);
}

#[test]
fn sites_without_storage_get_zero_storage_flows() {
    let r = results();
    let raw = r.get_timeseries("Heat", "Mid", &[2]).unwrap();
    assert_eq!(raw.stored.column_names(), vec!["Stored", "Retrieved", "Level"]);
    assert!(raw.stored.columns().iter().all(|s| s.values == vec![0.0]));
}

#[test]
fn unknown_lookups_are_errors() {
    let r = results();
    assert!(matches!(
        r.get_timeseries("Elec", "South", &[1]),
        Err(PlotError::UnknownBalance { .. })
    ));
    assert!(matches!(
        r.get_timeseries("Elec", "Mid", &[1, 4]),
        Err(PlotError::UnknownTimestep(4))
    ));
}

#[test]
fn commodity_sets_and_prices() {
    let r = results();
    let buy = r.commodity_names(CommodityKind::Buy);
    assert_eq!(buy, BTreeSet::from(["Elec buy".to_string()]));

    let subset = commodity_subset(r.commodity_tuples(), &buy);
    assert_eq!(subset.len(), 2);
    assert!(subset.iter().all(|t| t.kind == CommodityKind::Buy));

    let prices = r.get_com_price(&subset);
    assert_eq!(prices.columns.len(), 1);
    let key = CommodityTuple::new("Mid", "Elec buy", CommodityKind::Buy);
    assert_eq!(prices.values_at(&key, &[1, 2, 3]).unwrap(), vec![1.0, 2.0, 3.0]);

    let missing = CommodityTuple::new("North", "Elec buy", CommodityKind::Buy);
    assert!(matches!(
        prices.column(&missing),
        Err(PlotError::MissingMetadata { .. })
    ));
}

#[test]
fn constants_carry_storage_capacity() {
    let mut value = results_json();
    value["storage_capacity"] = json!([
        { "site": "Mid", "storage": "Pump", "commodity": "Elec", "c_total": 12.5 }
    ]);
    let r: ModelResults = serde_json::from_value(value).unwrap();
    let constants = r.get_constants();
    assert_eq!(constants.csto.len(), 1);
    assert_eq!(constants.csto[0].c_total, 12.5);
}
