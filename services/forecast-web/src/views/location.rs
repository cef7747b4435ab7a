//! Location page: forecast and tide plots plus the direction arrow overlay.
//!
//! The initial selection (corrected model, first timestep) is rendered here.
//! Later toggles run in the page script, which follows the same transitions
//! as [`ViewerState`] over the tables embedded in the page.

use serde::Serialize;
use tracing::warn;

use surf_common::{
    ArrowKind, ArrowPlacement, ForecastModel, LocationEntry, ModelTables, Overlay, ViewerState,
};

use super::{encode_segment, escape_html, script_json};

/// Forecast plot file names per model, as found on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelPlots {
    pub corrected: Option<String>,
    pub gfs: Option<String>,
    pub ecmwf: Option<String>,
}

impl ModelPlots {
    pub fn get(&self, model: ForecastModel) -> Option<&str> {
        match model {
            ForecastModel::Corrected => self.corrected.as_deref(),
            ForecastModel::GfsWave => self.gfs.as_deref(),
            ForecastModel::Ecmwf => self.ecmwf.as_deref(),
        }
    }

    /// The same plots as URLs under `/forecast_plots`.
    pub fn urls(&self) -> ModelPlots {
        let url = |model: ForecastModel| self.get(model).map(|name| forecast_plot_url(model, name));
        ModelPlots {
            corrected: url(ForecastModel::Corrected),
            gfs: url(ForecastModel::GfsWave),
            ecmwf: url(ForecastModel::Ecmwf),
        }
    }
}

pub fn forecast_plot_url(model: ForecastModel, file_name: &str) -> String {
    format!("/forecast_plots/{}/{}", model.dir_name(), encode_segment(file_name))
}

pub fn tide_plot_url(file_name: &str) -> String {
    format!("/tide_plots/{}", encode_segment(file_name))
}

/// Location photos are named after the display name.
pub fn location_image_url(entry: &LocationEntry) -> String {
    format!("/static/location_images/{}.png", encode_segment(&entry.name))
}

pub fn model_message(model: ForecastModel) -> String {
    format!("You are viewing the {} forecast model.", model.label())
}

/// Everything shown on one location page.
#[derive(Debug, Clone)]
pub struct LocationPage {
    pub entry: LocationEntry,
    pub tables: ModelTables,
    pub plots: ModelPlots,
    pub tide_plot: Option<String>,
}

/// Per-model values keyed like the model directories, for the page script.
#[derive(Serialize)]
struct ByModel<T> {
    corrected: T,
    gfs: T,
    ecmwf: T,
}

impl<T> ByModel<T> {
    fn from_fn(f: impl Fn(ForecastModel) -> T) -> Self {
        Self {
            corrected: f(ForecastModel::Corrected),
            gfs: f(ForecastModel::GfsWave),
            ecmwf: f(ForecastModel::Ecmwf),
        }
    }
}

impl LocationPage {
    pub fn initial_state(&self) -> ViewerState {
        ViewerState::initial(&self.tables)
    }

    /// Overlay for the initial selection, if it can be drawn.
    pub fn initial_overlay(&self) -> Option<Overlay> {
        match self.initial_state().overlay(&self.entry.arrows, &self.tables) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                warn!(location = %self.entry.key, error = %e, "Initial overlay not drawn");
                None
            }
        }
    }

    pub fn render(&self) -> Result<String, serde_json::Error> {
        let state = self.initial_state();
        let name = escape_html(&self.entry.name);

        let forecast = script_json(&self.tables)?;
        let arrows = script_json(&self.entry.arrows)?;
        let plots = script_json(&self.plots.urls())?;
        let labels = script_json(&ByModel::from_fn(|m| m.label()))?;
        let initial = script_json(&state)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{name} Forecast</title>
    <style>{style}</style>
</head>
<body>
    <h1>{name}</h1>
    <p class="local-time">Local time: {timezone} ({offset})</p>

    <h2>Below is the wave forecast, tide and wind forecast for the closest grid point to the specified surf location (or nearest wave buoy if accessible).</h2>
    <h3>Please note that the wave forecasts are for deep-water wave conditions, and so do not account for near-shore dynamics.</h3>
    <p>The user can toggle between the Corrected, GFSWave-v16 or ECMWF-WAM forecasts.
    Wave height is visualised by the height of the column. Columns are coloured based on wave period, and the blue arrows above indicate wave direction.
    The size of wind arrows indicate the forecasted wind speed. This forecast is not corrected, and is obtained from the ECMWF weather model for the closest grid point to the surf location.</p>

    {forecast_plot}
    {tide_plot}

    <p>Below the user can visualise the forecasted wind and wave direction for the specific location for a given timestep in a given forecast.
    Green arrows visualise wind direction, while red arrows visualise wave direction.
    The user can choose which model to visualise the data from by toggling between them. The timestep can be selected from the drop-down menu.</p>

    <div>
{buttons}
    </div>
    <div id="model-message" class="model-message">{message}</div>
    <select id="timestep-selector">
{options}
    </select>
    <div id="location-image-container">
        <img src="{image}" alt="{name}">
        <div class="key">
            <div class="key-item"><div class="key-color" style="background: red;"></div><div class="key-text">Wave Direction</div></div>
            <div class="key-item"><div class="key-color" style="background: chartreuse;"></div><div class="key-text">Wind Direction</div></div>
        </div>
        <div id="arrows">
{arrows_html}
        </div>
    </div>

    <p><a href="/">Back to All Locations</a></p>

    <script>
        const FORECAST = {forecast};
        const ARROWS = {arrows};
        const PLOTS = {plots};
        const LABELS = {labels};
        const INITIAL = {initial};
    </script>
    <script>{script}</script>
</body>
</html>
"#,
            name = name,
            style = STYLE,
            timezone = escape_html(&self.entry.timezone),
            offset = format_utc_offset(self.entry.utc_offset),
            forecast_plot = self.forecast_plot_html(state.model),
            tide_plot = self.tide_plot_html(),
            buttons = toggle_buttons_html(),
            message = escape_html(&model_message(state.model)),
            options = timestep_options_html(state.timesteps(&self.tables), state.timestep.as_deref()),
            image = escape_html(&location_image_url(&self.entry)),
            arrows_html = self
                .initial_overlay()
                .map(|overlay| arrows_html(&overlay))
                .unwrap_or_default(),
            forecast = forecast,
            arrows = arrows,
            plots = plots,
            labels = labels,
            initial = initial,
            script = SCRIPT,
        ))
    }

    fn forecast_plot_html(&self, model: ForecastModel) -> String {
        match self.plots.get(model) {
            Some(file) => format!(
                concat!(
                    r#"<iframe id="forecast-iframe" src="{}"></iframe>"#,
                    "\n    ",
                    r#"<p id="no-forecast-plot" hidden>No forecast plot available.</p>"#
                ),
                escape_html(&forecast_plot_url(model, file))
            ),
            None => concat!(
                r#"<iframe id="forecast-iframe" hidden></iframe>"#,
                "\n    ",
                r#"<p id="no-forecast-plot">No forecast plot available.</p>"#
            )
            .to_string(),
        }
    }

    fn tide_plot_html(&self) -> String {
        match &self.tide_plot {
            Some(file) => format!(
                r#"<iframe src="{}"></iframe>"#,
                escape_html(&tide_plot_url(file))
            ),
            None => "<p>No tide plot available.</p>".to_string(),
        }
    }
}

/// `UTC+2`, `UTC-10`, `UTC+0`.
pub fn format_utc_offset(hours: i32) -> String {
    format!("UTC{:+}", hours)
}

fn toggle_buttons_html() -> String {
    ForecastModel::ALL
        .iter()
        .map(|model| {
            format!(
                r#"        <button type="button" class="toggle-button" data-model="{}">{}</button>"#,
                model.dir_name(),
                model.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn timestep_options_html(timesteps: &[String], selected: Option<&str>) -> String {
    timesteps
        .iter()
        .map(|ts| {
            let value = escape_html(ts);
            let selected = if selected == Some(ts.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"        <option value="{}"{}>{}</option>"#,
                value, selected, value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn arrow_html(arrow: &ArrowPlacement) -> String {
    let class = match arrow.kind {
        ArrowKind::Wave => "arrow",
        ArrowKind::Wind => "arrow wind-arrow",
    };
    format!(
        r#"            <div class="{}" style="left: {}%; top: {}%; transform: rotate({}deg);" title="{}"></div>"#,
        class,
        arrow.left_pct,
        arrow.top_pct,
        arrow.rotation_deg,
        escape_html(&arrow.tooltip)
    )
}

pub fn arrows_html(overlay: &Overlay) -> String {
    overlay
        .arrows
        .iter()
        .map(arrow_html)
        .collect::<Vec<_>>()
        .join("\n")
}

const STYLE: &str = r#"
        iframe { width: 100%; height: 600px; border: none; margin-bottom: 20px; }
        .toggle-button {
            display: inline-block; margin: 10px; padding: 10px;
            background-color: #007bff; color: white; border: none;
            border-radius: 5px; cursor: pointer;
        }
        .toggle-button:hover { background-color: #0056b3; }
        #location-image-container { position: relative; display: inline-block; }
        .arrow {
            position: absolute; width: 0; height: 0;
            border-left: 15px solid transparent;
            border-right: 15px solid transparent;
            border-bottom: 30px solid red;
            transform-origin: bottom center;
        }
        .arrow::after {
            content: ''; position: absolute; width: 2px; height: 50px;
            background: red; top: 100%; left: 50%; transform: translateX(-50%);
        }
        .wind-arrow { border-bottom-color: chartreuse; }
        .wind-arrow::after { background: chartreuse; }
        .key {
            position: absolute; top: 40px; right: 40px;
            background: rgba(255, 255, 255, 0.8); padding: 10px;
            border-radius: 5px; box-shadow: 0 0 10px rgba(0, 0, 0, 0.1); z-index: 10;
        }
        .key-item { display: flex; align-items: center; margin-bottom: 5px; }
        .key-item:last-child { margin-bottom: 0; }
        .key-color { width: 20px; height: 20px; margin-right: 10px; border-radius: 3px; }
        .key-text { font-size: 14px; color: #333; }
        .model-message {
            margin-top: 20px; padding: 10px; background-color: #f7f7f7;
            border: 1px solid #ddd; border-radius: 5px; font-size: 16px; color: #333;
        }
"#;

// Same transitions as ViewerState and render_overlay.
const SCRIPT: &str = r#"
        const ROTATION_OFFSET = 180;
        const state = { model: INITIAL.model, timestep: INITIAL.timestep };

        // Missing cells arrive as null.
        function hasValue(value) {
            return typeof value === 'number' && isFinite(value);
        }

        function fixed(value, decimals, unit) {
            return hasValue(value) ? `${value.toFixed(decimals)}${unit}` : 'n/a';
        }

        function renderOverlay(model, timestep) {
            const record = FORECAST[model].records.find(r => r.DateTime === timestep);
            if (!record) {
                return null;
            }
            const arrows = [];
            if (hasValue(record.Wdir_forecast)) {
                const tooltip = `Hs: ${fixed(record.Hsig_forecast, 2, 'm')}, Tp: ${fixed(record.Tpeak_forecast, 0, 's')}, Wdir ${fixed(record.Wdir_forecast, 0, '°')}`;
                ARROWS.wave_left.forEach((left, i) => arrows.push({
                    cls: 'arrow', left, top: ARROWS.wave_top[i],
                    rotation: record.Wdir_forecast + ROTATION_OFFSET, tooltip
                }));
            }
            if (hasValue(record.wind_direction)) {
                const tooltip = `Wind Speed: ${fixed(record.wind_speed, 0, ' kts')}, Wind Direction: ${fixed(record.wind_direction, 0, '°')}`;
                ARROWS.wind_left.forEach((left, i) => arrows.push({
                    cls: 'arrow wind-arrow', left, top: ARROWS.wind_top[i],
                    rotation: record.wind_direction + ROTATION_OFFSET, tooltip
                }));
            }
            return arrows;
        }

        function draw() {
            const layer = document.getElementById('arrows');
            layer.replaceChildren();
            if (state.timestep === null) {
                console.error('No timestep selected');
                return;
            }
            const arrows = renderOverlay(state.model, state.timestep);
            if (!arrows) {
                console.error('No data found for timestep:', state.timestep);
                return;
            }
            arrows.forEach(a => {
                const el = document.createElement('div');
                el.className = a.cls;
                el.style.left = `${a.left}%`;
                el.style.top = `${a.top}%`;
                el.style.transform = `rotate(${a.rotation}deg)`;
                el.title = a.tooltip;
                layer.appendChild(el);
            });
        }

        function fillSelector() {
            const selector = document.getElementById('timestep-selector');
            selector.replaceChildren();
            FORECAST[state.model].timestamps.forEach(ts => {
                const option = document.createElement('option');
                option.value = ts;
                option.textContent = ts;
                selector.appendChild(option);
            });
            if (state.timestep !== null) {
                selector.value = state.timestep;
            }
        }

        function showPlot() {
            const iframe = document.getElementById('forecast-iframe');
            const missing = document.getElementById('no-forecast-plot');
            const url = PLOTS[state.model];
            if (url) {
                iframe.src = url;
                iframe.hidden = false;
                missing.hidden = true;
            } else {
                iframe.removeAttribute('src');
                iframe.hidden = true;
                missing.hidden = false;
            }
        }

        function selectModel(model) {
            const timestamps = FORECAST[model].timestamps;
            if (state.timestep === null || !timestamps.includes(state.timestep)) {
                state.timestep = timestamps.length > 0 ? timestamps[0] : null;
            }
            state.model = model;
            document.getElementById('model-message').textContent =
                `You are viewing the ${LABELS[model]} forecast model.`;
            showPlot();
            fillSelector();
            draw();
        }

        function selectTimestep(timestep) {
            state.timestep = timestep;
            draw();
        }

        document.querySelectorAll('.toggle-button').forEach(button => {
            button.addEventListener('click', () => selectModel(button.dataset.model));
        });
        document.getElementById('timestep-selector').addEventListener('change', event => {
            selectTimestep(event.target.value);
        });
"#;
