use std::collections::HashMap;

use chrono::{Duration, Utc};
use tracing::{debug, error, info};

use crate::{
    config::TrackerConfig,
    form::WorkoutForm,
    map::{MapAdapter, MarkerIcon, PanOptions, Popup},
    persistence::{KeyValueStorage, WorkoutPersistence},
    store::WorkoutStore,
    summary::WorkoutSummary,
    workout::{Coordinates, Workout, WorkoutId, WorkoutInput},
    TrackerError,
};

/// Whether the entry form is open, and for which map location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Composing { location: Coordinates },
}

/// Owns the workouts, the map and the markers placed on it, and keeps all
/// three in sync with persisted state.
pub struct SessionController<S: KeyValueStorage, M: MapAdapter> {
    config: TrackerConfig,
    persistence: WorkoutPersistence<S>,
    store: WorkoutStore,
    map: Option<M>,
    markers: HashMap<WorkoutId, M::Marker>,
    mode: Mode,
}

impl<S: KeyValueStorage, M: MapAdapter> SessionController<S, M> {
    /// Hydrates the store from `storage`. Missing or unreadable data gives an
    /// empty store.
    pub fn new(config: TrackerConfig, storage: S) -> Self {
        let persistence = WorkoutPersistence::new(storage, config.storage_key.clone());

        let mut store = WorkoutStore::new();
        store.replace_all(persistence.load_or_empty());
        info!("Loaded {} workouts", store.len());

        Self {
            config,
            persistence,
            store,
            map: None,
            markers: HashMap::new(),
            mode: Mode::Idle,
        }
    }

    /// Sets up the map around the user's position and places a marker for
    /// every stored workout.
    pub fn attach_map(&mut self, mut map: M, center: Coordinates, on_click: impl Fn(Coordinates) + 'static) {
        map.create_view(center, self.config.zoom_level);
        map.add_tile_layer(&self.config.tile_url, &self.config.tile_attribution);
        map.on_click(Box::new(on_click));

        self.markers.clear();
        for workout in &self.store {
            let marker = place_marker(&mut map, workout, &self.config);
            self.markers.insert(workout.id().clone(), marker);
        }

        debug!("Map attached at {:?} with {} markers", center, self.markers.len());
        self.map = Some(map);
    }

    pub fn map_clicked(&mut self, location: Coordinates) {
        debug!("Composing workout at {:?}", location);
        self.mode = Mode::Composing { location };
    }

    /// Validates the form and logs a workout at the pending location. Invalid
    /// input leaves everything untouched and keeps the form open.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<WorkoutId, TrackerError> {
        let Mode::Composing { location } = self.mode else {
            return Err(TrackerError::NoPendingLocation);
        };

        let input = form.validate()?;
        let workout = self.unique_workout(location, input);
        let id = workout.id().clone();

        if let Some(map) = self.map.as_mut() {
            let marker = place_marker(map, &workout, &self.config);
            self.markers.insert(id.clone(), marker);
        }

        info!("Added workout {}: {}", id, workout.label());
        self.store.append(workout);
        self.mode = Mode::Idle;

        self.persist()?;
        Ok(id)
    }

    /// Deletes one workout from the map, the store and persisted state.
    pub fn reset(&mut self, id: &WorkoutId) -> Result<(), TrackerError> {
        self.remove_marker(id);

        if self.store.remove_by_id(id).is_none() {
            debug!("Workout {} not found, nothing to delete", id);
            return Ok(());
        }

        info!("Deleted workout {}", id);
        self.persist()
    }

    /// Deletes every workout.
    pub fn reset_all(&mut self) -> Result<(), TrackerError> {
        let ids: Vec<WorkoutId> = self.markers.keys().cloned().collect();
        for id in &ids {
            self.remove_marker(id);
        }

        info!("Deleted all {} workouts", self.store.len());
        self.store.clear();
        self.persist()
    }

    /// Pans the map to a workout. Returns false if the workout or the map
    /// is missing.
    pub fn focus(&mut self, id: &WorkoutId) -> bool {
        let (Some(map), Some(workout)) = (self.map.as_mut(), self.store.find_by_id(id)) else {
            return false;
        };

        map.pan_to(workout.coordinates(), self.config.zoom_level, &PanOptions::from_config(&self.config));
        true
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn workouts(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn summaries(&self) -> Vec<WorkoutSummary> {
        self.store.iter().map(WorkoutSummary::of).collect()
    }

    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    /// Ids come from the creation time, so bump the time until it is free.
    fn unique_workout(&self, location: Coordinates, input: WorkoutInput) -> Workout {
        let mut created_at = Utc::now();
        loop {
            let workout = Workout::created_at(created_at, location, input);
            if !self.store.contains(workout.id()) {
                return workout;
            }
            created_at += Duration::milliseconds(1);
        }
    }

    fn remove_marker(&mut self, id: &WorkoutId) {
        if let (Some(marker), Some(map)) = (self.markers.remove(id), self.map.as_mut()) {
            map.remove_marker(marker);
        }
    }

    fn persist(&mut self) -> Result<(), TrackerError> {
        self.persistence.save(&self.store).map_err(|err| {
            error!("Failed to persist workouts: {err}");
            err
        })
    }
}

fn place_marker<M: MapAdapter>(map: &mut M, workout: &Workout, config: &TrackerConfig) -> M::Marker {
    let marker = map.place_marker(workout.coordinates(), &MarkerIcon::for_workout(workout, config));
    map.bind_popup(&marker, &Popup::for_workout(workout, config));
    marker
}
