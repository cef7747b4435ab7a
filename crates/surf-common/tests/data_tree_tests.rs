//! Tests for table loading and plot discovery against an on-disk data tree.

use surf_common::{
    ArtifactLocator, DataLayout, ForecastModel, ForecastTable, LocationRegistry, ModelTables,
    SurfError, ViewerState, NO_PLOTS_AVAILABLE,
};
use test_utils::{assert_approx_eq, plots, tables, DataTree};

// ============================================================================
// Location registry
// ============================================================================

#[test]
fn test_every_location_has_four_anchors_per_axis() {
    let registry = LocationRegistry::builtin();
    for entry in registry.iter() {
        assert_eq!(entry.arrows.wave_anchors().count(), 4, "{}", entry.key);
        assert_eq!(entry.arrows.wind_anchors().count(), 4, "{}", entry.key);
    }
}

#[test]
fn test_registry_lookup_by_every_key() {
    let registry = LocationRegistry::builtin();
    for key in registry.keys() {
        let entry = registry.get(key).expect("registered key must resolve");
        assert_eq!(entry.key, key);
        assert!((-90.0..=90.0).contains(&entry.lat));
        assert!((-180.0..=180.0).contains(&entry.lon));
    }
}

// ============================================================================
// Forecast table loader
// ============================================================================

#[test]
fn test_load_table_from_tree() {
    let tree = DataTree::with_location("jbay");
    let layout = DataLayout::new(tree.root());

    let table = ForecastTable::load(&layout, ForecastModel::Corrected, "jbay").unwrap();
    assert_eq!(table.timestamps, tables::CORRECTED_TIMESTAMPS);
    assert_eq!(table.records.len(), 3);
    assert_approx_eq!(table.records[0].hsig.unwrap(), 1.456, 1e-9);
    assert_approx_eq!(table.records[2].tpeak.unwrap(), 13.6, 1e-9);
    for (ts, record) in table.timestamps.iter().zip(&table.records) {
        assert_eq!(ts, &record.timestamp);
    }
}

#[test]
fn test_missing_table_is_upstream_error() {
    let tree = DataTree::with_location("jbay").remove("static/forecast_dfs/ecmwf/jbay.csv");
    let layout = DataLayout::new(tree.root());

    match ModelTables::load(&layout, "jbay") {
        Err(SurfError::UpstreamDataMissing { path }) => {
            assert!(path.ends_with("static/forecast_dfs/ecmwf/jbay.csv"));
        }
        other => panic!("expected UpstreamDataMissing, got {:?}", other),
    }
}

#[test]
fn test_unknown_location_has_no_tables() {
    let tree = DataTree::with_location("jbay");
    let layout = DataLayout::new(tree.root());
    let err = ModelTables::load(&layout, "pipeline").unwrap_err();
    assert!(err.is_upstream());
    assert_eq!(err.http_status_code(), 500);
}

#[test]
fn test_malformed_table_is_upstream_error() {
    let tree = DataTree::with_location("jbay").add_table(
        "gfs",
        "jbay",
        &format!("{}\n2024-01-01 00:00:00,flat,,,,\n", tables::HEADER),
    );
    let layout = DataLayout::new(tree.root());
    let err = ForecastTable::load(&layout, ForecastModel::GfsWave, "jbay").unwrap_err();
    assert!(matches!(err, SurfError::UpstreamDataInvalid { .. }));
}

#[test]
fn test_model_tables_are_independent() {
    let tree = DataTree::with_location("jbay");
    let layout = DataLayout::new(tree.root());
    let loaded = ModelTables::load(&layout, "jbay").unwrap();

    assert_eq!(loaded.get(ForecastModel::Corrected).len(), 3);
    assert_eq!(loaded.get(ForecastModel::GfsWave).len(), 2);
    assert_eq!(
        loaded.get(ForecastModel::Ecmwf).first_timestamp(),
        Some("2024-01-01 03:00:00")
    );
}

#[test]
fn test_loading_twice_is_identical() {
    let tree = DataTree::with_location("jbay");
    let layout = DataLayout::new(tree.root());
    let registry = LocationRegistry::builtin();
    let arrows = registry.get("jbay").unwrap().arrows;

    let first = ModelTables::load(&layout, "jbay").unwrap();
    let second = ModelTables::load(&layout, "jbay").unwrap();
    assert_eq!(first, second);

    let a = ViewerState::initial(&first).overlay(&arrows, &first).unwrap();
    let b = ViewerState::initial(&second).overlay(&arrows, &second).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Artifact locator
// ============================================================================

#[test]
fn test_find_forecast_plot_by_prefix() {
    let tree = DataTree::new()
        .add_forecast_plot("corrected", "oahu_20240101.html", plots::PLOT_HTML)
        .add_forecast_plot("corrected", "bells_20240101.html", plots::PLOT_HTML);
    let locator = ArtifactLocator::new(DataLayout::new(tree.root()));

    assert_eq!(
        locator
            .find_forecast_plot(ForecastModel::Corrected, "oahu")
            .unwrap()
            .as_deref(),
        Some("oahu_20240101.html")
    );
    assert_eq!(
        locator
            .find_forecast_plot(ForecastModel::Corrected, "margies")
            .unwrap(),
        None
    );
}

#[test]
fn test_plots_are_per_model() {
    let tree = DataTree::new().add_forecast_plot("gfs", "oahu_20240101.html", plots::PLOT_HTML);
    let locator = ArtifactLocator::new(DataLayout::new(tree.root()));

    assert!(locator
        .find_forecast_plot(ForecastModel::GfsWave, "oahu")
        .unwrap()
        .is_some());
    assert!(locator
        .find_forecast_plot(ForecastModel::Corrected, "oahu")
        .unwrap()
        .is_none());
}

#[test]
fn test_find_tide_plot() {
    let tree = DataTree::with_location("jbay");
    let locator = ArtifactLocator::new(DataLayout::new(tree.root()));
    assert_eq!(
        locator.find_tide_plot("jbay").unwrap().as_deref(),
        Some(plots::JBAY_TIDE)
    );
    assert_eq!(locator.find_tide_plot("bells").unwrap(), None);
}

#[test]
fn test_forecast_date_from_first_plot() {
    let tree = DataTree::with_location("jbay");
    let locator = ArtifactLocator::new(DataLayout::new(tree.root()));
    assert_eq!(locator.forecast_date().unwrap(), plots::DATE);
}

#[test]
fn test_forecast_date_without_plots() {
    let tree = DataTree::new();
    let locator = ArtifactLocator::new(DataLayout::new(tree.root()));
    assert_eq!(locator.forecast_date().unwrap(), NO_PLOTS_AVAILABLE);
}
