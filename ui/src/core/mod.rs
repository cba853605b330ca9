//! Framework-independent core: loaders, session state, pipelines and the
//! chart projection. Nothing in here touches Dioxus.

pub mod aliases;
pub mod chart;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod records;
pub mod session;
pub mod sources;
pub mod survey;

use error::Loaded;
use pipeline::Sources;
use records::StateTable;
use sources::DataSources;
use survey::SurveyTable;

/// Both loaded tables with their notices.
#[derive(Debug)]
pub struct LoadedSources {
    pub survey: Loaded<SurveyTable>,
    pub records: Loaded<StateTable>,
}

impl LoadedSources {
    /// Copies of the tables for the pipelines; the loaded originals stay
    /// untouched for the data preview.
    pub fn sources(&self) -> Sources {
        Sources {
            survey: self.survey.table.clone(),
            records: self.records.table.clone(),
        }
    }
}

/// Read both files from scratch.
pub fn load_all(paths: &DataSources) -> LoadedSources {
    LoadedSources {
        survey: survey::load_survey(&paths.csv_path),
        records: records::load_records(&paths.json_path),
    }
}
