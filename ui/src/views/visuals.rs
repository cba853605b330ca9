use dioxus::prelude::*;
use tracing::debug;

use crate::core::{load_all, pipeline::recompute, session::SessionStore, sources::DataSources};
use crate::dashboard::{
    BarSection, DataPanel, LineSection, ScatterSection, SessionHandle, SourceStatus,
};

/// The single dashboard page.
///
/// Both files are re-read on every render, so edits on disk show up on the
/// next widget interaction. The session store outlives renders.
#[component]
pub fn Visuals() -> Element {
    // Subscribe to the global language code (if provided) so labels refresh.
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    let paths = try_use_context::<DataSources>().unwrap_or_else(DataSources::from_env);
    let revision = use_signal(|| 0u64);
    let session = use_hook(|| SessionHandle::new(SessionStore::new(), revision));
    use_context_provider(|| session.clone());

    let revision = session.track();
    let loaded = load_all(&paths);
    let view = session.with_store(|store| recompute(&loaded.sources(), store));
    debug!(
        revision,
        survey = loaded.survey.notice.kind(),
        records = loaded.records.notice.kind(),
        "rendered dashboard"
    );

    let survey_status = SourceStatus::from_loaded(&paths.csv_path, &loaded.survey);
    let records_status = SourceStatus::from_loaded(&paths.json_path, &loaded.records);

    rsx! {
        section { class: "page page-visuals",
            header { class: "page-visuals__intro",
                h1 { {crate::t!("page-title")} }
                p { {crate::t!("page-intro")} }
            }

            DataPanel {
                survey_status,
                survey: loaded.survey.table.clone(),
                records_status,
                records: loaded.records.table.clone(),
            }

            h2 { class: "page-visuals__graphs", {crate::t!("section-graphs")} }
            div { class: "dashboard-grid",
                BarSection { outcome: view.bar }
                ScatterSection { panel: view.scatter }
                LineSection { panel: view.line }
            }
        }
    }
}
