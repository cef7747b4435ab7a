//! Direction arrow overlay and the model/timestep viewer state.
//!
//! The location page lets the user toggle between models and pick a timestep;
//! each change recomputes the eight arrows from the tables already on the page.
//! [`render_overlay`] is that computation and [`ViewerState`] holds the two
//! pieces of state it depends on. The page script mirrors both exactly.

use serde::Serialize;
use thiserror::Error;

use crate::forecast::{ForecastRecord, ForecastTable, ModelTables};
use crate::location::{ArrowLayout, ARROWS_PER_KIND};
use crate::model::ForecastModel;

/// Arrows point toward the direction the swell or wind is coming from.
pub const SOURCE_ROTATION_OFFSET_DEG: f64 = 180.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    #[error("No data found for timestep: {0}")]
    MissingTimestep(String),

    #[error("No timestep selected")]
    NoTimestep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowKind {
    Wave,
    Wind,
}

/// One arrow positioned over the location photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowPlacement {
    pub kind: ArrowKind,
    pub left_pct: f64,
    pub top_pct: f64,
    pub rotation_deg: f64,
    pub tooltip: String,
}

/// The arrows drawn for one (model, timestep) selection: wave arrows, then wind arrows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub timestep: String,
    pub arrows: Vec<ArrowPlacement>,
}

/// Compute the overlay for `timestep` from `table`.
///
/// The record is found by exact string equality; a miss is reported instead of
/// falling back to some other row. Arrows whose direction is missing from the
/// record are left out, and missing values read `n/a` in the tooltips.
pub fn render_overlay(
    layout: &ArrowLayout,
    table: &ForecastTable,
    timestep: &str,
) -> Result<Overlay, OverlayError> {
    let record = table
        .find(timestep)
        .ok_or_else(|| OverlayError::MissingTimestep(timestep.to_string()))?;

    let mut arrows = Vec::with_capacity(2 * ARROWS_PER_KIND);
    if let Some(direction) = record.wave_dir {
        arrows.extend(placements(
            ArrowKind::Wave,
            layout.wave_anchors(),
            direction,
            wave_tooltip(record),
        ));
    }
    if let Some(direction) = record.wind_dir {
        arrows.extend(placements(
            ArrowKind::Wind,
            layout.wind_anchors(),
            direction,
            wind_tooltip(record),
        ));
    }

    Ok(Overlay {
        timestep: record.timestamp.clone(),
        arrows,
    })
}

fn placements(
    kind: ArrowKind,
    anchors: impl Iterator<Item = (f64, f64)>,
    direction: f64,
    tooltip: String,
) -> impl Iterator<Item = ArrowPlacement> {
    anchors.map(move |(left, top)| ArrowPlacement {
        kind,
        left_pct: left,
        top_pct: top,
        rotation_deg: direction + SOURCE_ROTATION_OFFSET_DEG,
        tooltip: tooltip.clone(),
    })
}

/// Placeholder for a value the forecast row does not have.
pub const NOT_AVAILABLE: &str = "n/a";

fn fixed(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.*}{}", decimals, v, unit),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn wave_tooltip(record: &ForecastRecord) -> String {
    format!(
        "Hs: {}, Tp: {}, Wdir {}",
        fixed(record.hsig, 2, "m"),
        fixed(record.tpeak, 0, "s"),
        fixed(record.wave_dir, 0, "°")
    )
}

pub fn wind_tooltip(record: &ForecastRecord) -> String {
    format!(
        "Wind Speed: {}, Wind Direction: {}",
        fixed(record.wind_speed, 0, " kts"),
        fixed(record.wind_dir, 0, "°")
    )
}

/// Selected model and timestep on a location page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerState {
    pub model: ForecastModel,
    pub timestep: Option<String>,
}

impl ViewerState {
    /// Corrected model, first corrected timestep.
    pub fn initial(tables: &ModelTables) -> Self {
        let model = ForecastModel::default();
        Self {
            model,
            timestep: tables.get(model).first_timestamp().map(str::to_string),
        }
    }

    /// Switch model, keeping the timestep if the new model has it.
    pub fn select_model(&mut self, model: ForecastModel, tables: &ModelTables) {
        let table = tables.get(model);
        let keep = self
            .timestep
            .as_deref()
            .is_some_and(|ts| table.contains(ts));
        if !keep {
            self.timestep = table.first_timestamp().map(str::to_string);
        }
        self.model = model;
    }

    pub fn select_timestep(&mut self, timestep: impl Into<String>) {
        self.timestep = Some(timestep.into());
    }

    /// Timesteps offered by the selector for the current model.
    pub fn timesteps<'a>(&self, tables: &'a ModelTables) -> &'a [String] {
        &tables.get(self.model).timestamps
    }

    pub fn overlay(&self, layout: &ArrowLayout, tables: &ModelTables) -> Result<Overlay, OverlayError> {
        let timestep = self.timestep.as_deref().ok_or(OverlayError::NoTimestep)?;
        render_overlay(layout, tables.get(self.model), timestep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str, wave_dir: f64, wind_dir: f64) -> ForecastRecord {
        ForecastRecord {
            timestamp: ts.to_string(),
            hsig: Some(1.456),
            tpeak: Some(12.4),
            wave_dir: Some(wave_dir),
            wind_speed: Some(9.6),
            wind_dir: Some(wind_dir),
        }
    }

    fn layout() -> ArrowLayout {
        ArrowLayout::new(
            [56.0, 52.0, 48.0, 44.0],
            [50.0, 50.0, 50.0, 50.0],
            [56.0, 52.0, 48.0, 44.0],
            [10.0, 10.0, 10.0, 10.0],
        )
    }

    fn tables() -> ModelTables {
        ModelTables {
            corrected: ForecastTable::from_records(vec![
                record("t0", 200.0, 90.0),
                record("t1", 210.0, 100.0),
            ]),
            gfs: ForecastTable::from_records(vec![
                record("t1", 220.0, 110.0),
                record("t2", 230.0, 120.0),
            ]),
            ecmwf: ForecastTable::from_records(vec![record("t3", 240.0, 130.0)]),
        }
    }

    #[test]
    fn test_render_eight_arrows() {
        let table = ForecastTable::from_records(vec![record("t0", 200.0, 90.0)]);
        let overlay = render_overlay(&layout(), &table, "t0").unwrap();

        assert_eq!(overlay.arrows.len(), 8);
        assert!(overlay.arrows[..4].iter().all(|a| a.kind == ArrowKind::Wave));
        assert!(overlay.arrows[4..].iter().all(|a| a.kind == ArrowKind::Wind));
        assert_eq!(overlay.arrows[1].left_pct, 52.0);
        assert_eq!(overlay.arrows[5].top_pct, 10.0);
    }

    #[test]
    fn test_rotation_offsets_by_180() {
        let table = ForecastTable::from_records(vec![record("t0", 200.0, 90.0)]);
        let overlay = render_overlay(&layout(), &table, "t0").unwrap();
        assert_eq!(overlay.arrows[0].rotation_deg, 380.0);
        assert_eq!(overlay.arrows[4].rotation_deg, 270.0);
    }

    #[test]
    fn test_tooltips_rounding() {
        let r = record("t0", 225.4, 181.6);
        assert_eq!(wave_tooltip(&r), "Hs: 1.46m, Tp: 12s, Wdir 225°");
        assert_eq!(wind_tooltip(&r), "Wind Speed: 10 kts, Wind Direction: 182°");
    }

    #[test]
    fn test_missing_values_read_not_available() {
        let mut r = record("t0", 225.4, 181.6);
        r.hsig = None;
        r.wind_speed = None;
        assert_eq!(wave_tooltip(&r), "Hs: n/a, Tp: 12s, Wdir 225°");
        assert_eq!(wind_tooltip(&r), "Wind Speed: n/a, Wind Direction: 182°");
    }

    #[test]
    fn test_missing_direction_skips_those_arrows() {
        let mut r = record("t0", 200.0, 90.0);
        r.wind_dir = None;
        let table = ForecastTable::from_records(vec![r]);
        let overlay = render_overlay(&layout(), &table, "t0").unwrap();
        assert_eq!(overlay.arrows.len(), 4);
        assert!(overlay.arrows.iter().all(|a| a.kind == ArrowKind::Wave));
    }

    #[test]
    fn test_missing_timestep_is_error() {
        let table = ForecastTable::from_records(vec![record("t0", 200.0, 90.0)]);
        assert_eq!(
            render_overlay(&layout(), &table, "t9"),
            Err(OverlayError::MissingTimestep("t9".to_string()))
        );
    }

    #[test]
    fn test_initial_state() {
        let tables = tables();
        let state = ViewerState::initial(&tables);
        assert_eq!(state.model, ForecastModel::Corrected);
        assert_eq!(state.timestep.as_deref(), Some("t0"));
        assert_eq!(state.timesteps(&tables), ["t0", "t1"]);
    }

    #[test]
    fn test_toggle_preserves_shared_timestep() {
        let tables = tables();
        let mut state = ViewerState::initial(&tables);
        state.select_timestep("t1");
        state.select_model(ForecastModel::GfsWave, &tables);
        assert_eq!(state.timestep.as_deref(), Some("t1"));
        state.select_model(ForecastModel::Corrected, &tables);
        assert_eq!(state.timestep.as_deref(), Some("t1"));
    }

    #[test]
    fn test_toggle_falls_back_to_first() {
        let tables = tables();
        let mut state = ViewerState::initial(&tables);
        state.select_model(ForecastModel::GfsWave, &tables);
        assert_eq!(state.timestep.as_deref(), Some("t1"));
        state.select_model(ForecastModel::Ecmwf, &tables);
        assert_eq!(state.timestep.as_deref(), Some("t3"));
        assert!(state.overlay(&layout(), &tables).is_ok());
    }

    #[test]
    fn test_empty_table_clears_timestep() {
        let mut tables = tables();
        tables.ecmwf = ForecastTable::default();
        let mut state = ViewerState::initial(&tables);
        state.select_model(ForecastModel::Ecmwf, &tables);
        assert_eq!(state.timestep, None);
        assert_eq!(
            state.overlay(&layout(), &tables),
            Err(OverlayError::NoTimestep)
        );
    }

    #[test]
    fn test_selected_timestep_missing_from_model() {
        let tables = tables();
        let mut state = ViewerState::initial(&tables);
        state.select_timestep("t2");
        assert_eq!(
            state.overlay(&layout(), &tables),
            Err(OverlayError::MissingTimestep("t2".to_string()))
        );
    }
}
