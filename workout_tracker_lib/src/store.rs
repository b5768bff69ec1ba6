use crate::workout::{Workout, WorkoutId};

/// Workouts in creation order. Ids are unique within the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The caller guarantees the id is not already present.
    pub fn append(&mut self, workout: Workout) {
        debug_assert!(!self.contains(workout.id()), "duplicate workout id {}", workout.id());
        self.workouts.push(workout);
    }

    /// Removes the workout with `id`, returning it. Absent ids are ignored.
    pub fn remove_by_id(&mut self, id: &WorkoutId) -> Option<Workout> {
        let index = self.workouts.iter().position(|workout| workout.id() == id)?;
        Some(self.workouts.remove(index))
    }

    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id() == id)
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Workout> {
        self.workouts.iter()
    }

    pub fn as_slice(&self) -> &[Workout] {
        &self.workouts
    }
}

impl<'a> IntoIterator for &'a WorkoutStore {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::workout::{ActivityInput, Coordinates, WorkoutInput};

    fn run_at(millis: i64) -> Workout {
        let input = WorkoutInput {
            distance_km: 5.,
            duration_min: 25.,
            activity: ActivityInput::Running { cadence_spm: 160. },
        };
        Workout::created_at(DateTime::from_timestamp_millis(millis).unwrap(), Coordinates::new(1., 2.), input)
    }

    fn ids(store: &WorkoutStore) -> Vec<String> {
        store.iter().map(|workout| workout.id().to_string()).collect()
    }

    #[test]
    fn remove_from_empty_store_is_noop() {
        let mut store = WorkoutStore::new();
        assert!(store.remove_by_id(&WorkoutId::from("123")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_absent_id_keeps_contents() {
        let mut store = WorkoutStore::new();
        store.append(run_at(1_000));
        store.append(run_at(2_000));
        let before = store.clone();

        assert!(store.remove_by_id(&WorkoutId::from("999")).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn order_survives_appends_and_removals() {
        let mut store = WorkoutStore::new();
        for millis in [1_000, 2_000, 3_000, 4_000] {
            store.append(run_at(millis));
        }

        store.remove_by_id(&WorkoutId::from("2000"));
        store.append(run_at(5_000));
        store.remove_by_id(&WorkoutId::from("1000"));

        assert_eq!(ids(&store), ["3000", "4000", "5000"]);
    }

    #[test]
    fn replace_all_discards_previous_contents() {
        let mut store = WorkoutStore::new();
        store.append(run_at(1_000));
        store.replace_all(vec![run_at(7_000), run_at(8_000)]);

        assert_eq!(ids(&store), ["7000", "8000"]);
        assert!(!store.contains(&WorkoutId::from("1000")));
    }

    #[test]
    fn find_by_id_returns_matching_workout() {
        let mut store = WorkoutStore::new();
        store.append(run_at(1_000));
        store.append(run_at(2_000));

        let found = store.find_by_id(&WorkoutId::from("2000")).unwrap();
        assert_eq!(found.id().as_str(), "2000");
        assert!(store.find_by_id(&WorkoutId::from("3000")).is_none());
    }
}
