use ebplot::config::{ChartConfig, PlotTarget};
use ebplot::viz::{Rgb, SecondaryKind};

#[test]
fn empty_config_uses_defaults() {
    let cfg: ChartConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, ChartConfig::default());
    assert_eq!((cfg.width, cfg.height), (1600, 800));
    assert_eq!(cfg.secondary, SecondaryKind::Prices);

    let opts = cfg.figure_options();
    assert_eq!(opts.power_unit, "MW");
    assert_eq!(opts.energy_unit, "MWh");
    assert_eq!(opts.title_prefix, None);
}

#[test]
fn parses_full_config() {
    let cfg: ChartConfig = serde_json::from_str(
        r#"{
            "width": 1200,
            "secondary": "storage",
            "title_prefix": "Base case",
            "colors": { "Wind park": [1, 2, 3] },
            "plots": [{ "commodity": "Elec", "site": "Mid" }],
            "periods": { "spr": [100, 103] }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.width, 1200);
    assert_eq!(cfg.height, 800);
    assert_eq!(cfg.secondary, SecondaryKind::Storage);
    assert_eq!(
        cfg.plots,
        vec![PlotTarget {
            commodity: "Elec".into(),
            site: "Mid".into()
        }]
    );

    let colors = cfg.color_map();
    assert_eq!(colors.to_color("Wind park"), Rgb(1, 2, 3));
    assert_eq!(colors.to_color("Demand"), Rgb(25, 25, 25));

    let opts = cfg.figure_options();
    assert_eq!(opts.secondary, SecondaryKind::Storage);
    assert_eq!(opts.title_prefix.as_deref(), Some("Base case"));
}

#[test]
fn unknown_secondary_kind_is_rejected() {
    let res: Result<ChartConfig, _> = serde_json::from_str(r#"{ "secondary": "costs" }"#);
    assert!(res.is_err());
}

#[test]
fn periods_default_to_full_horizon() {
    let cfg = ChartConfig::default();
    let horizon: Vec<u32> = (0..5).collect();
    let periods = cfg.period_timesteps(&horizon);
    assert_eq!(periods, vec![("all".to_string(), horizon.clone())]);
}

#[test]
fn period_ranges_are_inclusive() {
    let mut cfg = ChartConfig::default();
    cfg.periods.insert("win".into(), (10, 12));
    cfg.periods.insert("aut".into(), (5, 5));
    let periods = cfg.period_timesteps(&[]);
    assert_eq!(
        periods,
        vec![
            ("aut".to_string(), vec![5]),
            ("win".to_string(), vec![10, 11, 12]),
        ]
    );
}
