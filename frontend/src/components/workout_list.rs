use workout_tracker_lib::{WorkoutId, WorkoutSummary};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub summary: WorkoutSummary,
    pub on_focus: Callback<WorkoutId>,
    pub on_delete: Callback<WorkoutId>,
}

#[function_component]
pub fn WorkoutEntry(props: &Props) -> Html {
    let summary = &props.summary;

    let onclick = {
        let id = summary.id.clone();
        props.on_focus.reform(move |_: MouseEvent| id.clone())
    };

    let on_close = {
        let id = summary.id.clone();
        let on_delete = props.on_delete.clone();
        Callback::from(move |e: MouseEvent| {
            // The entry itself would pan to the workout being deleted
            e.stop_propagation();
            on_delete.emit(id.clone());
        })
    };

    html! {
        <li class={summary.css_class()} data-id={summary.id.to_string()} {onclick}>
            <div class="workout workout__topTitle">
                <div class="workout__title">{summary.title.clone()}</div>
                <div class="workout__close" onclick={on_close}>{"❌"}</div>
            </div>
            <div class="workout__details-container">
                { for summary.details.iter().map(|detail| html! {
                    <div class="workout__details">
                        <span class="workout__icon">{detail.icon}</span>
                        <span class="workout__value">{detail.value.clone()}</span>
                        <span class="workout__unit">{detail.unit}</span>
                    </div>
                }) }
            </div>
        </li>
    }
}

#[derive(PartialEq, Properties, Clone)]
pub struct ListProps {
    pub summaries: Vec<WorkoutSummary>,
    pub on_focus: Callback<WorkoutId>,
    pub on_delete: Callback<WorkoutId>,
    pub children: Html,
}

/// The sidebar list. `children` (the entry form) goes first.
#[function_component]
pub fn WorkoutList(props: &ListProps) -> Html {
    html! {
        <ul class="workouts">
            { props.children.clone() }
            { for props.summaries.iter().map(|summary| html! {
                <WorkoutEntry
                    key={summary.id.to_string()}
                    summary={summary.clone()}
                    on_focus={props.on_focus.clone()}
                    on_delete={props.on_delete.clone()}
                />
            }) }
        </ul>
    }
}
