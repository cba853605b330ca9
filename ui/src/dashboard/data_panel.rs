use dioxus::prelude::*;

use super::{load_message, notice_class, SourceStatus};
use crate::core::{
    format::{format_optional, format_value},
    records::StateTable,
    survey::SurveyTable,
};

/// Load notices plus a preview of whatever each loader produced.
#[component]
pub fn DataPanel(
    survey_status: SourceStatus,
    survey: SurveyTable,
    records_status: SourceStatus,
    records: StateTable,
) -> Element {
    let survey_notice = load_message(&survey_status);
    let records_notice = load_message(&records_status);

    rsx! {
        section { class: "dashboard-card dashboard-data",
            div { class: "dashboard-card__header",
                h2 { {crate::t!("section-load")} }
            }

            div { class: "dashboard-data__source",
                p { class: notice_class(&survey_status), "{survey_notice}" }
                if survey_status.is_loaded() {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "#" }
                                th { {crate::t!("table-category")} }
                                th { {crate::t!("table-value")} }
                            }
                        }
                        tbody {
                            for (idx, row) in survey.rows.iter().enumerate() {
                                tr { key: "{idx}",
                                    td { class: "data-table__index", "{idx}" }
                                    td { {row.category.clone().unwrap_or_default()} }
                                    td { class: "data-table__number", {format_optional(row.value)} }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "dashboard-data__source",
                p { class: notice_class(&records_status), "{records_notice}" }
                if records_status.is_loaded() {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "#" }
                                th { {crate::t!("table-state")} }
                                th { {crate::t!("table-suicide-rate")} }
                                th { {crate::t!("table-gun-ownership")} }
                            }
                        }
                        tbody {
                            for (idx, row) in records.rows.iter().enumerate() {
                                tr { key: "{idx}",
                                    td { class: "data-table__index", "{idx}" }
                                    td { "{row.state}" }
                                    td { class: "data-table__number", {format_value(row.suicide_rate)} }
                                    td { class: "data-table__number", {format_value(row.gun_ownership)} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
