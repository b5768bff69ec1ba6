use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{WorkoutForm, WorkoutKind};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub form: WorkoutForm,
    pub visible: bool,
    /// Set right after a submit so the form disappears without its slide animation.
    pub suppressed: bool,
    pub distance_ref: NodeRef,
    pub on_kind: Callback<WorkoutKind>,
    pub on_field: Callback<(Field, String)>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn WorkoutFormComponent(props: &Props) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let onchange = {
        let on_kind = props.on_kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(kind) = select.value().parse::<WorkoutKind>() {
                on_kind.emit(kind);
            }
        })
    };

    let input = |field: Field| {
        let on_field = props.on_field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_field.emit((field, input.value()));
        })
    };

    let running = props.form.kind == WorkoutKind::Running;
    let style = if props.suppressed { "display: none" } else { "" };

    html! {
        <form class={classes!("form", (!props.visible).then_some("hidden"))} style={style} {onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" {onchange}>
                    <option value="running" selected={running}>{"Running"}</option>
                    <option value="cycling" selected={!running}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input
                    class="form__input form__input--distance"
                    placeholder="km"
                    ref={props.distance_ref.clone()}
                    value={props.form.distance.clone()}
                    oninput={input(Field::Distance)}
                />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input
                    class="form__input form__input--duration"
                    placeholder="min"
                    value={props.form.duration.clone()}
                    oninput={input(Field::Duration)}
                />
            </div>
            <div class={classes!("form__row", (!running).then_some("form__row--hidden"))}>
                <label class="form__label">{"Cadence"}</label>
                <input
                    class="form__input form__input--cadence"
                    placeholder="step/min"
                    value={props.form.cadence.clone()}
                    oninput={input(Field::Cadence)}
                />
            </div>
            <div class={classes!("form__row", running.then_some("form__row--hidden"))}>
                <label class="form__label">{"Elev Gain"}</label>
                <input
                    class="form__input form__input--elevation"
                    placeholder="meters"
                    value={props.form.elevation.clone()}
                    oninput={input(Field::Elevation)}
                />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}
