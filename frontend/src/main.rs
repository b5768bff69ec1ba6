use browser::BrowserStorage;
use components::{
    map_component::{LeafletMap, MapComponent},
    workout_form::{Field, WorkoutFormComponent},
    workout_list::WorkoutList,
};
use gloo_console::{error, info};
use gloo_timers::callback::Timeout;
use gloo_utils::document;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};
use workout_tracker_lib::{
    Coordinates, Mode, SessionController, TrackerConfig, TrackerError, WorkoutForm, WorkoutId, WorkoutKind,
    LOCATION_UNAVAILABLE_MESSAGE,
};
use yew::prelude::*;

mod browser;
mod components;

enum MainMsg {
    Located(Coordinates),
    LocationFailed,
    MapClicked(Coordinates),
    KindChanged(WorkoutKind),
    FieldChanged(Field, String),
    Submit,
    Focus(WorkoutId),
    Delete(WorkoutId),
    ResetAll,
    RedisplayForm,
}

struct Model {
    controller: SessionController<BrowserStorage, LeafletMap>,
    container: HtmlElement,
    form: WorkoutForm,
    form_suppressed: bool,
    focus_distance: bool,
    distance_ref: NodeRef,
    redisplay: Option<Timeout>,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();

        let config = TrackerConfig::from_json(include_str!("../tracker_config.json")).unwrap_or_else(|err| {
            error!(format!("Using default config: {err}"));
            TrackerConfig::default()
        });

        let controller = SessionController::new(config, BrowserStorage::open());
        info!(format!("Restored {} workouts", controller.workouts().len()));

        let container: HtmlElement = document()
            .create_element("div")
            .expect("document can create elements")
            .dyn_into()
            .expect("div is an HtmlElement");
        container.set_class_name("map");

        browser::request_position(link.callback(MainMsg::Located), link.callback(|()| MainMsg::LocationFailed));
        browser::expose_global("resetWorkouts", link.callback(|()| MainMsg::ResetAll));

        Self {
            controller,
            container,
            form: WorkoutForm::default(),
            form_suppressed: false,
            focus_distance: false,
            distance_ref: NodeRef::default(),
            redisplay: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(position) => {
                info!(format!("Located at {}, {}", position.lat, position.lng));
                let on_click = ctx.link().callback(MainMsg::MapClicked);
                let map = LeafletMap::new(&self.container);
                self.controller.attach_map(map, position, move |location| on_click.emit(location));
            }
            MainMsg::LocationFailed => {
                error!("Geolocation failed");
                browser::alert(LOCATION_UNAVAILABLE_MESSAGE);
            }
            MainMsg::MapClicked(location) => {
                self.focus_distance = self.controller.mode() == Mode::Idle;
                self.controller.map_clicked(location);
            }
            MainMsg::KindChanged(kind) => self.form.kind = kind,
            MainMsg::FieldChanged(field, value) => match field {
                Field::Distance => self.form.distance = value,
                Field::Duration => self.form.duration = value,
                Field::Cadence => self.form.cadence = value,
                Field::Elevation => self.form.elevation = value,
            },
            MainMsg::Submit => match self.controller.submit(&self.form) {
                Ok(id) => {
                    info!(format!("Logged workout {id}"));
                    self.hide_form(ctx);
                }
                Err(err @ TrackerError::InvalidInput) => browser::alert(&err.to_string()),
                Err(err) => {
                    error!(format!("Could not log workout: {err}"));
                    browser::alert(&err.to_string());
                }
            },
            MainMsg::Focus(id) => {
                if !self.controller.focus(&id) {
                    info!(format!("Nothing to pan to for {id}"));
                }
                return false;
            }
            MainMsg::Delete(id) => {
                if let Err(err) = self.controller.reset(&id) {
                    error!(format!("Could not delete workout {id}: {err}"));
                    browser::alert(&err.to_string());
                }
            }
            MainMsg::ResetAll => {
                if let Err(err) = self.controller.reset_all() {
                    error!(format!("Could not reset workouts: {err}"));
                    browser::alert(&err.to_string());
                }
            }
            MainMsg::RedisplayForm => {
                self.form_suppressed = false;
                self.redisplay = None;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let composing = matches!(self.controller.mode(), Mode::Composing { .. });

        html! {
            <>
                <div class="sidebar">
                    <WorkoutList
                        summaries={self.controller.summaries()}
                        on_focus={link.callback(MainMsg::Focus)}
                        on_delete={link.callback(MainMsg::Delete)}
                    >
                        <WorkoutFormComponent
                            form={self.form.clone()}
                            visible={composing}
                            suppressed={self.form_suppressed}
                            distance_ref={self.distance_ref.clone()}
                            on_kind={link.callback(MainMsg::KindChanged)}
                            on_field={link.callback(|(field, value): (Field, String)| MainMsg::FieldChanged(field, value))}
                            on_submit={link.callback(|()| MainMsg::Submit)}
                        />
                    </WorkoutList>
                </div>
                <MapComponent container={self.container.clone()} />
            </>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.focus_distance {
            self.focus_distance = false;
            if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }
}

impl Model {
    /// Clears the inputs and hides the form, skipping the slide animation.
    fn hide_form(&mut self, ctx: &Context<Self>) {
        self.form.clear();
        self.form_suppressed = true;

        let link = ctx.link().clone();
        let delay = self.controller.config().form_redisplay_delay_ms;
        self.redisplay = Some(Timeout::new(delay, move || link.send_message(MainMsg::RedisplayForm)));
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
