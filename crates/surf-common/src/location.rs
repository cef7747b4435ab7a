//! Surf locations and their arrow overlay layouts.
//!
//! The registry is an immutable table built once at startup, either from the
//! built-in table or from a YAML file. Every entry carries its
//! own [`ArrowLayout`], so a lookup that finds a location also finds its layout.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{SurfError, SurfResult};

/// Number of arrows of each kind drawn over a location photo.
pub const ARROWS_PER_KIND: usize = 4;

/// Percentage anchor positions for the wave and wind arrows of one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowLayout {
    pub wave_left: [f64; ARROWS_PER_KIND],
    pub wave_top: [f64; ARROWS_PER_KIND],
    pub wind_left: [f64; ARROWS_PER_KIND],
    pub wind_top: [f64; ARROWS_PER_KIND],
}

impl ArrowLayout {
    pub const fn new(
        wave_left: [f64; ARROWS_PER_KIND],
        wave_top: [f64; ARROWS_PER_KIND],
        wind_left: [f64; ARROWS_PER_KIND],
        wind_top: [f64; ARROWS_PER_KIND],
    ) -> Self {
        Self {
            wave_left,
            wave_top,
            wind_left,
            wind_top,
        }
    }

    /// Wave arrow anchors as (left, top) percentages.
    pub fn wave_anchors(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wave_left.iter().copied().zip(self.wave_top.iter().copied())
    }

    /// Wind arrow anchors as (left, top) percentages.
    pub fn wind_anchors(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wind_left.iter().copied().zip(self.wind_top.iter().copied())
    }
}

/// A surf location with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    /// Short identifier, also the prefix of every artifact for this location.
    pub key: String,

    /// Human-readable name (also the location image file stem).
    pub name: String,

    /// Timezone abbreviation, e.g. "SAST".
    pub timezone: String,

    /// UTC offset in whole hours.
    pub utc_offset: i32,

    pub lat: f64,
    pub lon: f64,

    /// Overlay arrow anchors.
    pub arrows: ArrowLayout,
}

/// Immutable lookup table of locations, in display order.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    entries: Vec<LocationEntry>,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    locations: Vec<LocationEntry>,
}

impl LocationRegistry {
    /// Build a registry, rejecting invalid or duplicate keys.
    pub fn new(entries: Vec<LocationEntry>) -> SurfResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !is_valid_key(&entry.key) {
                return Err(SurfError::Config(format!(
                    "invalid location key {:?}",
                    entry.key
                )));
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(SurfError::Config(format!(
                    "duplicate location key {:?}",
                    entry.key
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a registry from YAML (`locations: [...]`).
    pub fn from_yaml_str(yaml: &str) -> SurfResult<Self> {
        let file: RegistryFile = serde_yaml::from_str(yaml)?;
        Self::new(file.locations)
    }

    /// Load a registry from a YAML file.
    pub fn from_yaml_file(path: &Path) -> SurfResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SurfError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let registry = Self::from_yaml_str(&content)?;
        tracing::info!(
            count = registry.len(),
            path = %path.display(),
            "Loaded location registry"
        );
        Ok(registry)
    }

    /// The built-in table of 15 locations.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Find a location by key (exact match).
    pub fn get(&self, key: &str) -> Option<&LocationEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Location keys are restricted to ASCII alphanumerics, `_` and `-`.
///
/// Keys end up in file paths, so anything else is refused before touching disk.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn entry(
    key: &str,
    name: &str,
    timezone: &str,
    utc_offset: i32,
    lat: f64,
    lon: f64,
    arrows: ArrowLayout,
) -> LocationEntry {
    LocationEntry {
        key: key.to_string(),
        name: name.to_string(),
        timezone: timezone.to_string(),
        utc_offset,
        lat,
        lon,
        arrows,
    }
}

fn builtin_entries() -> Vec<LocationEntry> {
    vec![
        entry(
            "ballito",
            "Ballito, Dolphin Coast, South Africa",
            "SAST",
            2,
            -29.532778,
            31.224722,
            ArrowLayout::new(
                [65.0, 65.0, 65.0, 65.0],
                [35.0, 45.0, 55.0, 65.0],
                [50.0, 48.0, 46.0, 44.0],
                [35.0, 45.0, 55.0, 65.0],
            ),
        ),
        entry(
            "bells",
            "Bells Beach, Victoria, Australia",
            "AEST",
            10,
            -38.372778,
            144.28,
            ArrowLayout::new(
                [55.0, 52.0, 49.0, 46.0],
                [40.0, 50.0, 60.0, 70.0],
                [40.0, 45.0, 50.0, 55.0],
                [40.0, 30.0, 20.0, 10.0],
            ),
        ),
        entry(
            "cloudbreak",
            "Cloudbreak, Fiji",
            "FST",
            12,
            -17.885833,
            177.186667,
            ArrowLayout::new(
                [40.0, 41.0, 42.0, 43.0],
                [35.0, 45.0, 55.0, 65.0],
                [60.0, 61.0, 62.0, 63.0],
                [25.0, 35.0, 45.0, 55.0],
            ),
        ),
        entry(
            "el_salvador",
            "Surf City, El Salvador",
            "CST",
            -6,
            13.491389,
            -89.381111,
            ArrowLayout::new(
                [45.0, 48.0, 51.0, 54.0],
                [50.0, 50.0, 50.0, 50.0],
                [40.0, 45.0, 50.0, 55.0],
                [12.0, 12.0, 12.0, 12.0],
            ),
        ),
        entry(
            "gland",
            "G-Land, Banyuwangi, Indonesia",
            "WIB",
            7,
            -8.747222,
            114.348611,
            ArrowLayout::new(
                [45.0, 48.0, 51.0, 54.0],
                [55.0, 55.0, 55.0, 55.0],
                [45.0, 48.0, 51.0, 54.0],
                [30.0, 30.0, 30.0, 30.0],
            ),
        ),
        entry(
            "huntington",
            "Huntington Beach, California, USA",
            "PDT",
            -7,
            33.653611,
            -118.003611,
            ArrowLayout::new(
                [43.0, 46.0, 49.0, 52.0],
                [35.0, 38.0, 41.0, 44.0],
                [57.0, 62.0, 67.0, 72.0],
                [2.0, 12.0, 22.0, 32.0],
            ),
        ),
        entry(
            "jbay",
            "Jeffreys's Bay, South Africa",
            "SAST",
            2,
            -34.033611,
            24.934722,
            ArrowLayout::new(
                [56.0, 52.0, 48.0, 44.0],
                [50.0, 50.0, 50.0, 50.0],
                [56.0, 52.0, 48.0, 44.0],
                [10.0, 10.0, 10.0, 10.0],
            ),
        ),
        entry(
            "margies",
            "Margaret River, Western Australia, Australia",
            "AWST",
            8,
            -33.976389,
            114.9825,
            ArrowLayout::new(
                [42.0, 42.0, 42.0, 42.0],
                [22.0, 27.0, 32.0, 37.0],
                [53.0, 53.0, 53.0, 53.0],
                [50.0, 60.0, 70.0, 80.0],
            ),
        ),
        entry(
            "narrabeen",
            "North Narrabeen, NSW, Australia",
            "AEST",
            10,
            -33.704722,
            151.307778,
            ArrowLayout::new(
                [56.0, 54.0, 52.0, 50.0],
                [30.0, 45.0, 60.0, 75.0],
                [39.0, 38.0, 37.0, 36.0],
                [15.0, 25.0, 35.0, 45.0],
            ),
        ),
        entry(
            "oahu",
            "North Shore, Oahu, Hawaii",
            "HST",
            -10,
            21.6640,
            -158.0539,
            ArrowLayout::new(
                [50.0, 45.0, 40.0, 35.0],
                [20.0, 35.0, 50.0, 65.0],
                [67.0, 64.0, 61.0, 58.0],
                [30.0, 40.0, 50.0, 60.0],
            ),
        ),
        entry(
            "peniche",
            "Supertubos, Peniche, Portugal",
            "WEST",
            1,
            39.343889,
            -9.365278,
            ArrowLayout::new(
                [43.0, 39.0, 35.0, 31.0],
                [12.0, 24.0, 36.0, 48.0],
                [66.0, 66.0, 66.0, 66.0],
                [60.0, 70.0, 80.0, 90.0],
            ),
        ),
        entry(
            "raglan",
            "Raglan, New Zealand",
            "NZST",
            12,
            -37.810556,
            174.828333,
            ArrowLayout::new(
                [46.0, 44.0, 42.0, 40.0],
                [30.0, 42.0, 54.0, 66.0],
                [60.0, 58.0, 56.0, 54.0],
                [34.0, 46.0, 58.0, 70.0],
            ),
        ),
        entry(
            "saquarema",
            "Saquarema, Rio Di Janeiro, Brazil",
            "BST",
            -3,
            -22.936944,
            -42.4825,
            ArrowLayout::new(
                [54.0, 51.0, 48.0, 45.0],
                [60.0, 60.0, 60.0, 60.0],
                [54.0, 51.0, 48.0, 45.0],
                [20.0, 20.0, 20.0, 20.0],
            ),
        ),
        entry(
            "snapper",
            "Snapper Rocks, Queensland, Australia",
            "AEST",
            10,
            -28.161389,
            153.549444,
            ArrowLayout::new(
                [55.0, 55.0, 55.0, 55.0],
                [30.0, 45.0, 60.0, 75.0],
                [35.0, 35.0, 35.0, 35.0],
                [15.0, 30.0, 45.0, 60.0],
            ),
        ),
        entry(
            "teahupoo",
            "Teahupoo, Tahiti, French Polynesia",
            "THAT",
            -10,
            -17.865556,
            -149.253056,
            ArrowLayout::new(
                [40.0, 47.0, 54.0, 61.0],
                [45.0, 45.0, 45.0, 45.0],
                [40.0, 47.0, 54.0, 61.0],
                [5.0, 5.0, 5.0, 5.0],
            ),
        ),
    ]
}
