use dioxus::prelude::*;

use super::{outcome_label, parse_slider, slider_step, ChartFigure, SessionHandle};
use crate::core::{
    chart::{render_bar, render_line, render_scatter, LabelRow},
    error::PipelineOutcome,
    format::format_value,
    pipeline::{BarView, LineControls, LinePanel, ScatterControls, ScatterPanel},
    session::{StateSelection, MARKER_SIZE_MAX, MARKER_SIZE_MIN},
};

#[component]
pub fn BarSection(outcome: PipelineOutcome<BarView>) -> Element {
    let state = outcome_label(&outcome);

    rsx! {
        section { class: "dashboard-card dashboard-chart", "data-state": state,
            div { class: "dashboard-card__header",
                h3 { {crate::t!("bar-title")} }
            }
            {match outcome {
                PipelineOutcome::Ready(view) => rsx! {
                    ChartFigure { spec: render_bar(&view) }
                },
                _ => rsx! {
                    p { class: "notice notice--warning", {crate::t!("bar-placeholder")} }
                },
            }}
        }
    }
}

#[component]
pub fn ScatterSection(panel: ScatterPanel) -> Element {
    let state = outcome_label(&panel.outcome);

    rsx! {
        section { class: "dashboard-card dashboard-chart", "data-state": state,
            div { class: "dashboard-card__header",
                h3 { {crate::t!("scatter-title")} }
            }
            {match panel.controls {
                None => rsx! {
                    p { class: "notice notice--warning", {crate::t!("scatter-placeholder")} }
                },
                Some(controls) => rsx! {
                    ScatterControlsForm { controls }
                    {match panel.outcome {
                        PipelineOutcome::Ready(view) => {
                            let spec = render_scatter(&view);
                            let labels = spec.label_rows.clone();
                            rsx! {
                                ChartFigure { spec }
                                if let Some(rows) = labels {
                                    LabelTable { rows }
                                }
                            }
                        }
                        _ => rsx! {
                            p { class: "notice notice--warning", {crate::t!("scatter-no-matches")} }
                        },
                    }}
                },
            }}
        }
    }
}

#[component]
fn ScatterControlsForm(controls: ScatterControls) -> Element {
    let session = use_context::<SessionHandle>();
    let options = controls.options.clone();
    let marker_size = controls.marker_size;

    let select_all = {
        let session = session.clone();
        move |_| session.update(|store| store.select_states(StateSelection::All))
    };
    let clear_all = {
        let session = session.clone();
        move |_| session.update(|store| store.select_states(StateSelection::only(Vec::<String>::new())))
    };
    let on_size = {
        let session = session.clone();
        move |evt: FormEvent| {
            if let Some(size) = parse_slider(&evt.value()) {
                session.update(|store| store.set_marker_size(size.round() as i64));
            }
        }
    };
    let on_labels = {
        let session = session.clone();
        move |evt: FormEvent| {
            let show = evt.checked();
            session.update(|store| store.set_show_labels(show));
        }
    };

    rsx! {
        div { class: "dashboard-controls",
            fieldset { class: "dashboard-controls__states",
                legend { {crate::t!("scatter-states-label")} }
                div { class: "dashboard-controls__chips",
                    for state in controls.options.iter().cloned() {
                        {
                            let checked = controls.is_selected(&state);
                            let session = session.clone();
                            let options = options.clone();
                            let toggled = state.clone();
                            rsx! {
                                label { key: "{state}", class: "chip",
                                    input {
                                        r#type: "checkbox",
                                        checked,
                                        onchange: move |evt: FormEvent| {
                                            let keep = evt.checked();
                                            let toggled = toggled.clone();
                                            let options = options.clone();
                                            session.update(move |store| {
                                                let current = store.selection().selected_states;
                                                store.select_states(toggle_state(current, &options, &toggled, keep));
                                            });
                                        },
                                    }
                                    span { "{state}" }
                                }
                            }
                        }
                    }
                }
                div { class: "dashboard-controls__actions",
                    button { r#type: "button", class: "button button--ghost", onclick: select_all,
                        {crate::t!("scatter-select-all")}
                    }
                    button { r#type: "button", class: "button button--ghost", onclick: clear_all,
                        {crate::t!("scatter-clear")}
                    }
                }
            }

            label { class: "dashboard-controls__slider",
                span { {crate::t!("scatter-marker-label")} }
                input {
                    r#type: "range",
                    min: "{MARKER_SIZE_MIN}",
                    max: "{MARKER_SIZE_MAX}",
                    step: "1",
                    value: "{marker_size}",
                    oninput: on_size,
                }
                output { "{marker_size}" }
            }

            label { class: "dashboard-controls__toggle",
                input {
                    r#type: "checkbox",
                    checked: controls.show_labels,
                    onchange: on_labels,
                }
                span { {crate::t!("scatter-labels-toggle")} }
            }
        }
    }
}

/// New selection after a state checkbox changes. Unchecking a state while
/// everything is implicitly selected turns into an explicit subset.
pub(crate) fn toggle_state(
    current: StateSelection,
    options: &[String],
    state: &str,
    keep: bool,
) -> StateSelection {
    let mut chosen = match current {
        StateSelection::All => options.iter().cloned().collect(),
        StateSelection::Only(chosen) => chosen,
    };
    if keep {
        chosen.insert(state.to_string());
    } else {
        chosen.remove(state);
    }
    if options.iter().all(|option| chosen.contains(option)) {
        StateSelection::All
    } else {
        StateSelection::Only(chosen)
    }
}

#[component]
fn LabelTable(rows: Vec<LabelRow>) -> Element {
    rsx! {
        div { class: "dashboard-labels",
            p { {crate::t!("scatter-label-view")} }
            table { class: "data-table",
                thead {
                    tr {
                        th { "#" }
                        th { {crate::t!("table-state")} }
                        th { {crate::t!("table-gun-ownership")} }
                        th { {crate::t!("table-suicide-rate")} }
                    }
                }
                tbody {
                    for row in rows.iter() {
                        tr { key: "{row.position}",
                            td { class: "data-table__index", "{row.position}" }
                            td { "{row.state}" }
                            td { class: "data-table__number", {format_value(row.gun_ownership)} }
                            td { class: "data-table__number", {format_value(row.suicide_rate)} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn LineSection(panel: LinePanel) -> Element {
    let state = outcome_label(&panel.outcome);

    rsx! {
        section { class: "dashboard-card dashboard-chart", "data-state": state,
            div { class: "dashboard-card__header",
                h3 { {crate::t!("line-title")} }
            }
            {match panel.controls {
                None => rsx! {
                    p { class: "notice notice--warning", {crate::t!("line-placeholder")} }
                },
                Some(controls) => rsx! {
                    LineControlsForm { controls }
                    {match panel.outcome {
                        PipelineOutcome::Ready(view) => rsx! {
                            ChartFigure { spec: render_line(&view) }
                        },
                        _ => rsx! {
                            p { class: "notice notice--warning", {crate::t!("line-no-matches")} }
                        },
                    }}
                },
            }}
        }
    }
}

#[component]
fn LineControlsForm(controls: LineControls) -> Element {
    let session = use_context::<SessionHandle>();
    let (lo, hi) = controls.bounds;
    let step = slider_step(controls.bounds);
    let min_label = format_value(controls.min_value);

    let on_category = {
        let session = session.clone();
        move |evt: FormEvent| {
            let category = evt.value();
            session.update(|store| store.choose_category(category));
        }
    };
    let on_min = {
        let session = session.clone();
        move |evt: FormEvent| {
            if let Some(value) = parse_slider(&evt.value()) {
                session.update(|store| store.set_min_value(value));
            }
        }
    };

    rsx! {
        div { class: "dashboard-controls",
            label { class: "dashboard-controls__select",
                span { {crate::t!("line-category-label")} }
                select {
                    value: "{controls.chosen_category}",
                    onchange: on_category,
                    for category in controls.categories.iter() {
                        option {
                            key: "{category}",
                            value: "{category}",
                            selected: *category == controls.chosen_category,
                            "{category}"
                        }
                    }
                }
            }

            label { class: "dashboard-controls__slider",
                span { {crate::t!("line-min-label")} }
                input {
                    r#type: "range",
                    min: "{lo}",
                    max: "{hi}",
                    step: "{step}",
                    value: "{controls.min_value}",
                    oninput: on_min,
                }
                output { "{min_label}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Iowa".into(), "Ohio".into(), "Utah".into()]
    }

    #[test]
    fn unchecking_from_all_becomes_explicit_subset() {
        let next = toggle_state(StateSelection::All, &options(), "Ohio", false);
        assert_eq!(next, StateSelection::only(["Iowa", "Utah"]));
    }

    #[test]
    fn rechecking_every_state_returns_to_all() {
        let current = StateSelection::only(["Iowa", "Utah"]);
        let next = toggle_state(current, &options(), "Ohio", true);
        assert_eq!(next, StateSelection::All);
    }

    #[test]
    fn unchecking_the_last_state_leaves_an_empty_subset() {
        let current = StateSelection::only(["Iowa"]);
        let next = toggle_state(current, &options(), "Iowa", false);
        assert_eq!(next, StateSelection::only(Vec::<String>::new()));
    }
}
