use gloo_console::{error, info};
use gloo_utils::window;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{js_sys::Reflect, Position, Storage};
use workout_tracker_lib::{Coordinates, KeyValueStorage, TrackerError};
use yew::Callback;

/// `localStorage` of the current page. Without it nothing can be loaded and
/// every save fails.
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    pub fn open() -> Self {
        let storage = window().local_storage().ok().flatten();
        if storage.is_none() {
            error!("localStorage is not available, workouts will not be saved");
        }
        Self { storage }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<String>, TrackerError> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage.get_item(key).map_err(js_error)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        let Some(storage) = &self.storage else {
            return Err(TrackerError::Storage("localStorage is not available".into()));
        };
        storage.set_item(key, value).map_err(js_error)
    }
}

fn js_error(err: JsValue) -> TrackerError {
    TrackerError::Storage(format!("{err:?}"))
}

/// One-shot position request. Exactly one of the callbacks fires, unless the
/// user never answers the permission prompt.
pub fn request_position(on_position: Callback<Coordinates>, on_failure: Callback<()>) {
    let Ok(geolocation) = window().navigator().geolocation() else {
        error!("Geolocation is not supported by this browser");
        return;
    };

    let success = Closure::once_into_js(move |position: JsValue| {
        let coords = position.unchecked_into::<Position>().coords();
        on_position.emit(Coordinates::new(coords.latitude(), coords.longitude()));
    });
    let failure = Closure::once_into_js(move |_err: JsValue| on_failure.emit(()));

    if let Err(err) = geolocation.get_current_position_with_error_callback(success.unchecked_ref(), Some(failure.unchecked_ref())) {
        error!(format!("Position request failed: {err:?}"));
    }
}

pub fn alert(message: &str) {
    if window().alert_with_message(message).is_err() {
        error!(format!("Could not show alert: {message}"));
    }
}

/// Makes `callback` callable from the browser console as `name()`.
pub fn expose_global(name: &str, callback: Callback<()>) {
    let function = Closure::<dyn Fn()>::new(move || callback.emit(()));

    match Reflect::set(&window(), &JsValue::from_str(name), function.as_ref()) {
        Ok(_) => info!(format!("Hello! If you would like to reset the workouts just call {name}()")),
        Err(err) => error!(format!("Could not expose {name}: {err:?}")),
    }

    // Lives as long as the page.
    function.forget();
}
