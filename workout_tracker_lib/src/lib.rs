pub mod config;
pub mod controller;
mod error;
pub mod form;
pub mod map;
pub mod persistence;
pub mod store;
pub mod summary;
pub mod workout;

pub use config::TrackerConfig;
pub use controller::{Mode, SessionController};
pub use error::*;
pub use form::WorkoutForm;
pub use map::{MapAdapter, MarkerIcon, PanOptions, Popup};
pub use persistence::{KeyValueStorage, MemoryStorage, WorkoutPersistence};
pub use store::WorkoutStore;
pub use summary::{Detail, WorkoutSummary};
pub use workout::{Activity, ActivityInput, Coordinates, Workout, WorkoutId, WorkoutInput, WorkoutKind};
