use crate::{
    workout::{ActivityInput, WorkoutInput, WorkoutKind},
    TrackerError,
};

/// Raw contents of the entry form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl WorkoutForm {
    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance: distance.into(),
            duration: duration.into(),
            cadence: cadence.into(),
            ..Default::default()
        }
    }

    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            kind: WorkoutKind::Cycling,
            distance: distance.into(),
            duration: duration.into(),
            elevation: elevation.into(),
            ..Default::default()
        }
    }

    /// Empties every input but keeps the selected type.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }

    /// Every field must be a finite number; distance, duration and cadence
    /// must also be positive. Elevation gain may be zero or negative, and an
    /// empty elevation field means no gain.
    pub fn validate(&self) -> Result<WorkoutInput, TrackerError> {
        let distance_km = parse_finite(&self.distance)?;
        let duration_min = parse_finite(&self.duration)?;

        let activity = match self.kind {
            WorkoutKind::Running => {
                let cadence_spm = parse_finite(&self.cadence)?;
                require_positive(&[distance_km, duration_min, cadence_spm])?;
                ActivityInput::Running { cadence_spm }
            }
            WorkoutKind::Cycling => {
                let elevation_gain_m = parse_optional(&self.elevation)?;
                require_positive(&[distance_km, duration_min])?;
                ActivityInput::Cycling { elevation_gain_m }
            }
        };

        Ok(WorkoutInput { distance_km, duration_min, activity })
    }
}

fn parse_finite(raw: &str) -> Result<f64, TrackerError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TrackerError::InvalidInput),
    }
}

fn parse_optional(raw: &str) -> Result<f64, TrackerError> {
    if raw.trim().is_empty() {
        Ok(0.)
    } else {
        parse_finite(raw)
    }
}

fn require_positive(values: &[f64]) -> Result<(), TrackerError> {
    if values.iter().all(|value| *value > 0.) {
        Ok(())
    } else {
        Err(TrackerError::InvalidInput)
    }
}
