use crate::workout::{Activity, Workout, WorkoutId, WorkoutKind};

/// One icon/value/unit cell of a list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// What the workout list shows for a single workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub details: [Detail; 4],
}

impl WorkoutSummary {
    /// Derived metrics are rounded to one decimal here; stored values are not.
    pub fn of(workout: &Workout) -> Self {
        let distance = Detail::new(workout.kind().icon(), workout.distance_km().to_string(), "km");
        let duration = Detail::new("⏱", workout.duration_min().to_string(), "min");

        let [metric, extra] = match workout.activity() {
            Activity::Running { cadence_spm, pace_min_per_km } => [
                Detail::new("⚡️", format!("{pace_min_per_km:.1}"), "min/km"),
                Detail::new("🦶🏼", cadence_spm.to_string(), "spm"),
            ],
            Activity::Cycling { elevation_gain_m, speed_km_per_h } => [
                Detail::new("⚡️", format!("{speed_km_per_h:.1}"), "km/h"),
                Detail::new("⛰", elevation_gain_m.to_string(), "m"),
            ],
        };

        Self {
            id: workout.id().clone(),
            kind: workout.kind(),
            title: workout.label().to_owned(),
            details: [distance, duration, metric, extra],
        }
    }

    /// CSS modifier class for the list entry.
    pub fn css_class(&self) -> String {
        format!("workout workout--{}", self.kind)
    }
}
