use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Number of trailing millisecond-epoch digits kept in a workout id.
const ID_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Last ten digits of the millisecond timestamp.
    pub fn from_timestamp(timestamp: &DateTime<Utc>) -> Self {
        let millis = timestamp.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(ID_DIGITS);
        Self(millis[start..].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coordinates: Coordinates) -> Self {
        [coordinates.lat, coordinates.lng]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    #[default]
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in labels.
    pub fn title(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(format!("Unknown workout type: {other}")),
        }
    }
}

/// Variant payload of a workout, including its derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Activity {
    #[serde(rename_all = "camelCase")]
    Running { cadence_spm: f64, pace_min_per_km: f64 },
    #[serde(rename_all = "camelCase")]
    Cycling { elevation_gain_m: f64, speed_km_per_h: f64 },
}

impl Activity {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Variant-specific value entered in the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityInput {
    Running { cadence_spm: f64 },
    Cycling { elevation_gain_m: f64 },
}

/// Already validated values for a new workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub distance_km: f64,
    pub duration_min: f64,
    pub activity: ActivityInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    label: String,
    click_count: u32,
    #[serde(flatten)]
    activity: Activity,
}

impl Workout {
    pub fn new(coordinates: Coordinates, input: WorkoutInput) -> Self {
        Self::created_at(Utc::now(), coordinates, input)
    }

    /// Builds a workout as if it was created at `created_at`. The id, label and
    /// derived metric all come from this timestamp and the input.
    pub fn created_at(created_at: DateTime<Utc>, coordinates: Coordinates, input: WorkoutInput) -> Self {
        let WorkoutInput { distance_km, duration_min, activity } = input;

        let activity = match activity {
            ActivityInput::Running { cadence_spm } => Activity::Running {
                cadence_spm,
                pace_min_per_km: duration_min / distance_km,
            },
            ActivityInput::Cycling { elevation_gain_m } => Activity::Cycling {
                elevation_gain_m,
                speed_km_per_h: distance_km / (duration_min / 60.),
            },
        };

        Self {
            id: WorkoutId::from_timestamp(&created_at),
            label: describe(activity.kind(), &created_at),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            click_count: 0,
            activity,
        }
    }

    pub fn running(coordinates: Coordinates, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        Self::new(coordinates, WorkoutInput {
            distance_km,
            duration_min,
            activity: ActivityInput::Running { cadence_spm },
        })
    }

    pub fn cycling(coordinates: Coordinates, distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Self {
        Self::new(coordinates, WorkoutInput {
            distance_km,
            duration_min,
            activity: ActivityInput::Cycling { elevation_gain_m },
        })
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    pub fn click(&mut self) {
        self.click_count += 1;
    }
}

fn describe(kind: WorkoutKind, created_at: &DateTime<Utc>) -> String {
    let local = created_at.with_timezone(&Local);
    format!("{} on {}", kind.title(), local.format("%B %-d"))
}
