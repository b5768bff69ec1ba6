use crate::{config::TrackerConfig, workout::{Coordinates, Workout}};

/// The map widget as seen by the controller.
pub trait MapAdapter {
    /// Handle to a placed marker, needed to remove it again.
    type Marker;

    fn create_view(&mut self, center: Coordinates, zoom: f64);
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);
    fn on_click(&mut self, handler: Box<dyn Fn(Coordinates)>);
    fn place_marker(&mut self, coordinates: Coordinates, icon: &MarkerIcon) -> Self::Marker;
    fn bind_popup(&mut self, marker: &Self::Marker, popup: &Popup);
    fn remove_marker(&mut self, marker: Self::Marker);
    fn pan_to(&mut self, coordinates: Coordinates, zoom: f64, options: &PanOptions);
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    pub url: String,
    pub size: (f64, f64),
}

impl MarkerIcon {
    pub fn for_workout(workout: &Workout, config: &TrackerConfig) -> Self {
        Self {
            url: config.icon_url(workout.kind()).to_owned(),
            size: config.icon_size,
        }
    }
}

/// Popup attached to a workout marker. Workout popups stay open.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub content: String,
    pub max_width: f64,
    pub min_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl Popup {
    pub fn for_workout(workout: &Workout, config: &TrackerConfig) -> Self {
        let kind = workout.kind();
        Self {
            content: format!("{} {}", kind.icon(), workout.label()),
            max_width: config.popup_max_width,
            min_width: config.popup_min_width,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

impl PanOptions {
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            animate: true,
            duration_secs: config.pan_duration_secs,
        }
    }
}
