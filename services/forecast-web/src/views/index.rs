//! Index page: a world map with one marker per location.

use serde::Serialize;

use surf_common::LocationRegistry;

use super::{encode_segment, escape_html, script_json};

/// One map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexPage {
    /// Date token of the current forecast run, or the no-plots placeholder.
    pub date: String,
    pub markers: Vec<Marker>,
}

impl IndexPage {
    pub fn new(date: String, registry: &LocationRegistry) -> Self {
        let markers = registry
            .iter()
            .map(|entry| Marker {
                name: entry.name.clone(),
                lat: entry.lat,
                lon: entry.lon,
                url: format!("/location/{}", encode_segment(&entry.key)),
            })
            .collect();
        Self { date, markers }
    }

    pub fn render(&self) -> Result<String, serde_json::Error> {
        let markers = script_json(&self.markers)?;
        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Surf Forecasts Map</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet/dist/leaflet.css" />
    <style>
        #map {{ height: 600px; width: 100%; }}
    </style>
</head>
<body>
    <h1>Surf Forecasts for {date} UTC</h1>
    <h2>Click on a location to view the forecast.</h2>
    <div id="map"></div>

    <script src="https://unpkg.com/leaflet/dist/leaflet.js"></script>
    <script>
        var map = L.map('map').setView([0, 0], 2);
        L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
            attribution: '&copy; OpenStreetMap contributors'
        }}).addTo(map);

        var locations = {markers};
        locations.forEach(function (loc) {{
            var popup = document.createElement('div');
            var name = document.createElement('b');
            name.textContent = loc.name;
            var link = document.createElement('a');
            link.href = loc.url;
            link.textContent = 'View Forecast';
            popup.appendChild(name);
            popup.appendChild(document.createElement('br'));
            popup.appendChild(link);
            L.marker([loc.lat, loc.lon]).addTo(map).bindPopup(popup);
        }});
    </script>
</body>
</html>
"#,
            date = escape_html(&self.date),
            markers = markers,
        ))
    }
}
