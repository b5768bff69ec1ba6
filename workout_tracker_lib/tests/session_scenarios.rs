use std::{cell::RefCell, collections::HashSet, rc::Rc};

use chrono::Local;
use workout_tracker_lib::{
    Activity, Coordinates, MapAdapter, MarkerIcon, MemoryStorage, Mode, PanOptions, Popup, SessionController,
    TrackerConfig, TrackerError, WorkoutForm, WorkoutId, WorkoutPersistence,
};

/// Records every call the controller makes on the map.
#[derive(Default)]
struct FakeMap {
    view: Option<(Coordinates, f64)>,
    tile_layers: Vec<String>,
    click_handler: Option<Box<dyn Fn(Coordinates)>>,
    next_marker: usize,
    markers: Vec<(usize, Coordinates, MarkerIcon, Option<Popup>)>,
    pans: Vec<(Coordinates, f64, PanOptions)>,
}

impl FakeMap {
    fn click(&self, location: Coordinates) {
        if let Some(handler) = &self.click_handler {
            handler(location);
        }
    }

    fn marker_positions(&self) -> Vec<Coordinates> {
        self.markers.iter().map(|(_, coordinates, _, _)| *coordinates).collect()
    }
}

impl MapAdapter for FakeMap {
    type Marker = usize;

    fn create_view(&mut self, center: Coordinates, zoom: f64) {
        self.view = Some((center, zoom));
    }

    fn add_tile_layer(&mut self, url_template: &str, _attribution: &str) {
        self.tile_layers.push(url_template.to_owned());
    }

    fn on_click(&mut self, handler: Box<dyn Fn(Coordinates)>) {
        self.click_handler = Some(handler);
    }

    fn place_marker(&mut self, coordinates: Coordinates, icon: &MarkerIcon) -> usize {
        self.next_marker += 1;
        self.markers.push((self.next_marker, coordinates, icon.clone(), None));
        self.next_marker
    }

    fn bind_popup(&mut self, marker: &usize, popup: &Popup) {
        if let Some(entry) = self.markers.iter_mut().find(|(id, ..)| id == marker) {
            entry.3 = Some(popup.clone());
        }
    }

    fn remove_marker(&mut self, marker: usize) {
        self.markers.retain(|(id, ..)| *id != marker);
    }

    fn pan_to(&mut self, coordinates: Coordinates, zoom: f64, options: &PanOptions) {
        self.pans.push((coordinates, zoom, *options));
    }
}

type Controller = SessionController<MemoryStorage, FakeMap>;

const MADRID: Coordinates = Coordinates { lat: 40.0, lng: -3.0 };
const HOME: Coordinates = Coordinates { lat: 56.17, lng: 10.19 };

fn started(storage: MemoryStorage) -> Controller {
    let mut controller = Controller::new(TrackerConfig::default(), storage);
    controller.attach_map(FakeMap::default(), HOME, |_| {});
    controller
}

fn add(controller: &mut Controller, location: Coordinates, form: WorkoutForm) -> WorkoutId {
    controller.map_clicked(location);
    controller.submit(&form).unwrap()
}

fn stored_ids(storage: &MemoryStorage) -> Vec<WorkoutId> {
    WorkoutPersistence::new(storage.clone(), "workouts")
        .load()
        .unwrap()
        .iter()
        .map(|workout| workout.id().clone())
        .collect()
}

#[test]
fn logging_a_run() {
    let mut controller = started(MemoryStorage::new());

    controller.map_clicked(MADRID);
    assert_eq!(controller.mode(), Mode::Composing { location: MADRID });

    let id = controller.submit(&WorkoutForm::running("5", "30", "150")).unwrap();
    let run = controller.workouts().find_by_id(&id).unwrap();

    assert_eq!(run.activity(), &Activity::Running { cadence_spm: 150., pace_min_per_km: 6. });
    assert_eq!(run.label(), format!("Running on {}", Local::now().format("%B %-d")));
    assert_eq!(run.coordinates(), MADRID);
    assert_eq!(controller.mode(), Mode::Idle);

    let map = controller.map().unwrap();
    assert_eq!(map.marker_positions(), [MADRID]);
    let (_, _, icon, popup) = &map.markers[0];
    assert_eq!(icon.url, "green.png");
    assert_eq!(popup.as_ref().unwrap().class_name, "running-popup");

    assert_eq!(stored_ids(controller.storage()), [id]);
}

#[test]
fn ride_accepts_negative_elevation() {
    let mut controller = started(MemoryStorage::new());

    let id = add(&mut controller, MADRID, WorkoutForm::cycling("20", "60", "-5"));
    let ride = controller.workouts().find_by_id(&id).unwrap();

    assert_eq!(ride.activity(), &Activity::Cycling { elevation_gain_m: -5., speed_km_per_h: 20. });
    assert!(ride.label().starts_with("Cycling on "));
}

#[test]
fn ride_without_elevation_is_logged_flat() {
    let mut controller = started(MemoryStorage::new());

    let id = add(&mut controller, MADRID, WorkoutForm::cycling("20", "60", ""));
    let ride = controller.workouts().find_by_id(&id).unwrap();

    assert_eq!(ride.activity(), &Activity::Cycling { elevation_gain_m: 0., speed_km_per_h: 20. });
    assert_eq!(controller.mode(), Mode::Idle);
    assert_eq!(stored_ids(controller.storage()), [id]);
}

#[test]
fn invalid_run_changes_nothing() {
    let mut controller = started(MemoryStorage::new());
    controller.map_clicked(MADRID);

    let result = controller.submit(&WorkoutForm::running("-1", "30", "150"));

    assert!(matches!(result, Err(TrackerError::InvalidInput)));
    assert!(controller.workouts().is_empty());
    assert!(controller.map().unwrap().markers.is_empty());
    assert!(controller.storage().get("workouts").is_none());
    assert_eq!(controller.mode(), Mode::Composing { location: MADRID });
}

#[test]
fn submit_without_map_click_is_rejected() {
    let mut controller = started(MemoryStorage::new());

    let result = controller.submit(&WorkoutForm::running("5", "30", "150"));

    assert!(matches!(result, Err(TrackerError::NoPendingLocation)));
    assert!(controller.workouts().is_empty());
}

#[test]
fn later_click_replaces_pending_location() {
    let mut controller = started(MemoryStorage::new());
    controller.map_clicked(HOME);
    controller.map_clicked(MADRID);

    let id = controller.submit(&WorkoutForm::running("5", "30", "150")).unwrap();
    assert_eq!(controller.workouts().find_by_id(&id).unwrap().coordinates(), MADRID);
}

#[test]
fn deleting_first_of_two_keeps_second() {
    let mut controller = started(MemoryStorage::new());
    let first = add(&mut controller, MADRID, WorkoutForm::running("5", "30", "150"));
    let second = add(&mut controller, HOME, WorkoutForm::cycling("20", "60", "100"));

    controller.reset(&first).unwrap();

    let remaining: Vec<_> = controller.workouts().iter().map(|workout| workout.id().clone()).collect();
    assert_eq!(remaining, [second.clone()]);
    assert_eq!(controller.map().unwrap().marker_positions(), [HOME]);
    assert_eq!(stored_ids(controller.storage()), [second]);
    assert_eq!(controller.mode(), Mode::Idle);
}

#[test]
fn deleting_unknown_id_is_noop() {
    let mut controller = started(MemoryStorage::new());
    let id = add(&mut controller, MADRID, WorkoutForm::running("5", "30", "150"));
    let stored = controller.storage().get("workouts").map(str::to_owned);

    controller.reset(&WorkoutId::from("404")).unwrap();

    assert_eq!(controller.workouts().len(), 1);
    assert!(controller.workouts().contains(&id));
    assert_eq!(controller.map().unwrap().markers.len(), 1);
    assert_eq!(controller.storage().get("workouts").map(str::to_owned), stored);
}

#[test]
fn rapid_submissions_get_unique_ids() {
    let mut controller = started(MemoryStorage::new());

    let ids: Vec<_> = (0..20).map(|_| add(&mut controller, MADRID, WorkoutForm::running("5", "30", "150"))).collect();

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    let in_store: Vec<_> = controller.workouts().iter().map(|workout| workout.id().clone()).collect();
    assert_eq!(in_store, ids);
}

#[test]
fn startup_restores_list_then_markers() {
    let mut first_session = started(MemoryStorage::new());
    let run = add(&mut first_session, MADRID, WorkoutForm::running("5", "30", "150"));
    let ride = add(&mut first_session, HOME, WorkoutForm::cycling("20", "60", "-5"));
    let storage = first_session.storage().clone();

    let mut controller = Controller::new(TrackerConfig::default(), storage);
    let listed: Vec<_> = controller.summaries().into_iter().map(|summary| summary.id).collect();
    assert_eq!(listed, [run, ride]);
    assert!(!controller.has_map());

    controller.attach_map(FakeMap::default(), HOME, |_| {});
    let map = controller.map().unwrap();
    assert_eq!(map.view, Some((HOME, 13.)));
    assert_eq!(map.tile_layers, [TrackerConfig::default().tile_url]);
    assert_eq!(map.marker_positions(), [MADRID, HOME]);
    assert!(map.markers.iter().all(|(.., popup)| popup.is_some()));
}

#[test]
fn corrupt_storage_starts_empty() {
    let controller = Controller::new(TrackerConfig::default(), MemoryStorage::with_entry("workouts", "oops"));
    assert!(controller.workouts().is_empty());
}

#[test]
fn without_map_workouts_can_still_be_deleted() {
    let mut first_session = started(MemoryStorage::new());
    let id = add(&mut first_session, MADRID, WorkoutForm::running("5", "30", "150"));

    let mut controller = Controller::new(TrackerConfig::default(), first_session.storage().clone());
    assert!(!controller.focus(&id));

    controller.reset(&id).unwrap();
    assert!(controller.workouts().is_empty());
    assert!(stored_ids(controller.storage()).is_empty());
}

#[test]
fn focus_pans_to_workout() {
    let mut controller = started(MemoryStorage::new());
    let id = add(&mut controller, MADRID, WorkoutForm::running("5", "30", "150"));

    assert!(controller.focus(&id));
    assert!(!controller.focus(&WorkoutId::from("404")));

    let pans = &controller.map().unwrap().pans;
    assert_eq!(pans.len(), 1);
    assert_eq!(pans[0], (MADRID, 13., PanOptions { animate: true, duration_secs: 1. }));
}

#[test]
fn reset_all_clears_everything() {
    let mut controller = started(MemoryStorage::new());
    add(&mut controller, MADRID, WorkoutForm::running("5", "30", "150"));
    add(&mut controller, HOME, WorkoutForm::cycling("20", "60", "100"));

    controller.reset_all().unwrap();

    assert!(controller.workouts().is_empty());
    assert!(controller.map().unwrap().markers.is_empty());
    assert_eq!(controller.storage().get("workouts"), Some("[]"));
}

#[test]
fn map_clicks_reach_the_registered_handler() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = clicks.clone();

    let mut controller = Controller::new(TrackerConfig::default(), MemoryStorage::new());
    controller.attach_map(FakeMap::default(), HOME, move |location| sink.borrow_mut().push(location));

    controller.map().unwrap().click(MADRID);
    assert_eq!(*clicks.borrow(), [MADRID]);
}
