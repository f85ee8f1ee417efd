use ebplot::models::{Series, TimeseriesTable};
use ebplot::viz::sort::{sort_by_variance, sort_plot_elements};

fn table(cols: &[(&str, &[f64])]) -> TimeseriesTable {
    let n = cols.first().map(|(_, v)| v.len()).unwrap_or(0);
    TimeseriesTable::from_columns(
        (0..n as u32).collect(),
        cols.iter()
            .map(|(name, vals)| Series::new(*name, vals.to_vec()))
            .collect(),
    )
    .unwrap()
}

#[test]
fn base_load_first_peak_load_last() {
    let t = table(&[
        ("Peak", &[0.0, 10.0, 0.0, 10.0]),
        ("Base", &[5.0, 5.0, 5.0, 5.0]),
        ("Mid", &[2.0, 4.0, 2.0, 4.0]),
    ]);
    let sorted = sort_by_variance(t);
    assert_eq!(sorted.column_names(), vec!["Base", "Mid", "Peak"]);
}

#[test]
fn sorting_keeps_values_and_index() {
    let t = table(&[("Peak", &[0.0, 10.0, 0.0]), ("Base", &[5.0, 5.0, 5.0])]);
    let sorted = sort_by_variance(t.clone());
    assert_eq!(sorted.index(), t.index());
    for s in t.columns() {
        assert_eq!(sorted.get(&s.name), Some(s));
    }
}

#[test]
fn equal_variance_keeps_input_order() {
    let t = table(&[
        ("B", &[1.0, 2.0]),
        ("A", &[2.0, 1.0]),
        ("C", &[0.0, 0.0]),
        ("D", &[3.0, 4.0]),
    ]);
    let sorted = sort_by_variance(t);
    assert_eq!(sorted.column_names(), vec!["C", "B", "A", "D"]);
}

#[test]
fn sorting_is_idempotent() {
    let t = table(&[
        ("Wind", &[3.0, 9.0, 1.0, 7.0]),
        ("Hydro", &[4.0, 4.0, 4.5, 4.0]),
        ("Gas", &[0.0, 2.0, 6.0, 1.0]),
        ("Solar", &[0.0, 5.0, 5.0, 0.0]),
    ]);
    let once = sort_by_variance(t);
    let twice = sort_by_variance(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn single_column_is_identity() {
    let t = table(&[("Only", &[1.0, 7.0, 3.0])]);
    assert_eq!(sort_by_variance(t.clone()), t);
}

#[test]
fn plot_elements_sort_both_sides() {
    let created = table(&[("Peak", &[0.0, 8.0]), ("Base", &[4.0, 4.0])]);
    let consumed = table(&[("Export", &[0.0, 6.0]), ("Heat pump", &[1.0, 1.0])]);
    let (created, consumed) = sort_plot_elements(created, consumed);
    assert_eq!(created.column_names(), vec!["Base", "Peak"]);
    assert_eq!(consumed.column_names(), vec!["Heat pump", "Export"]);
}
