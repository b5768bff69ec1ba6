use serde::Deserialize;

use crate::{workout::WorkoutKind, TrackerError};

/// Runtime settings for the tracker. Any field missing from the JSON source
/// takes its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub storage_key: String,
    pub zoom_level: f64,
    pub tile_url: String,
    pub tile_attribution: String,
    pub running_icon_url: String,
    pub cycling_icon_url: String,
    pub icon_size: (f64, f64),
    pub popup_max_width: f64,
    pub popup_min_width: f64,
    pub pan_duration_secs: f64,
    pub form_redisplay_delay_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: "workouts".into(),
            zoom_level: 13.,
            tile_url: "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png".into(),
            tile_attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".into(),
            running_icon_url: "green.png".into(),
            cycling_icon_url: "orange.png".into(),
            icon_size: (75., 85.),
            popup_max_width: 250.,
            popup_min_width: 100.,
            pan_duration_secs: 1.,
            form_redisplay_delay_ms: 1000,
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        let config: Self = serde_json::from_str(json).map_err(|err| TrackerError::Config(err.to_string()))?;

        if config.storage_key.is_empty() {
            return Err(TrackerError::Config("storage_key must not be empty".into()));
        }
        if !(config.zoom_level.is_finite() && config.zoom_level >= 0.) {
            return Err(TrackerError::Config(format!("Invalid zoom level: {}", config.zoom_level)));
        }

        Ok(config)
    }

    pub fn icon_url(&self, kind: WorkoutKind) -> &str {
        match kind {
            WorkoutKind::Running => &self.running_icon_url,
            WorkoutKind::Cycling => &self.cycling_icon_url,
        }
    }
}
