//! Loader for the delimited survey-response file (`data.csv`).
//!
//! Header names are trimmed and title-cased, so ` category ` and `VALUE`
//! both resolve. Only the `Category` and `Value` columns are kept; a value
//! that does not parse as a finite number becomes missing instead of failing
//! the load.

use std::path::Path;

use tracing::{info, warn};

use super::error::{LoadError, LoadNotice, Loaded};
use super::sources::read_source;

pub const CATEGORY_COLUMN: &str = "Category";
pub const VALUE_COLUMN: &str = "Value";

/// One submitted survey row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurveyRow {
    pub category: Option<String>,
    pub value: Option<f64>,
}

impl SurveyRow {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: Some(category.into()),
            value: Some(value),
        }
    }
}

/// Normalized two-column table, rows in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurveyTable {
    pub rows: Vec<SurveyRow>,
}

impl SurveyTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Load the survey file at `path`. Never fails: absent, empty and malformed
/// files all yield an empty table with the matching notice.
pub fn load_survey(path: &Path) -> Loaded<SurveyTable> {
    let text = match read_source(path) {
        Ok(Some(text)) => text,
        Ok(None) => return Loaded::fallback(LoadNotice::NotAvailable),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read survey file");
            return Loaded::fallback(LoadNotice::Malformed(err));
        }
    };

    match parse_survey(&text) {
        Ok(table) => {
            info!(path = %path.display(), rows = table.len(), "loaded survey responses");
            let rows = table.len();
            Loaded {
                table,
                notice: LoadNotice::Loaded { rows },
            }
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "survey file is malformed");
            Loaded::fallback(LoadNotice::Malformed(err))
        }
    }
}

/// Parse delimited text whose first row holds the header names.
pub fn parse_survey(text: &str) -> Result<SurveyTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    if headers.iter().all(String::is_empty) {
        return Err(LoadError::Shape("no columns to parse".into()));
    }

    let category_idx = headers.iter().position(|h| h == CATEGORY_COLUMN);
    let value_idx = headers.iter().position(|h| h == VALUE_COLUMN);

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(LoadError::Shape(format!(
                "row {} has {} fields, header has {}",
                line + 1,
                record.len(),
                headers.len()
            )));
        }

        let category = category_idx
            .and_then(|idx| record.get(idx))
            .filter(|cell| !cell.is_empty())
            .map(str::to_string);
        let value = value_idx.and_then(|idx| record.get(idx)).and_then(coerce_number);

        rows.push(SurveyRow { category, value });
    }

    Ok(SurveyTable { rows })
}

/// Trim a header and title-case it: the first letter of every alphabetic
/// run is upper-cased, the rest lower-cased.
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Lenient numeric coercion used for every numeric column.
pub(crate) fn coerce_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
