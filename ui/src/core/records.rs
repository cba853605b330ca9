//! Loader for the nested state record file (`data.json`).
//!
//! The document is an object whose `records` key holds a list of flat
//! objects. Field names are mapped onto `state`, `suicide_rate` and
//! `gun_ownership` through [`super::aliases`]; rows missing any of the three
//! after coercion are dropped, so every [`StateRecord`] is fully populated.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::aliases::{resolve_fields, FieldMap, GUN_OWNERSHIP, STATE, SUICIDE_RATE};
use super::error::{LoadError, LoadNotice, Loaded};
use super::sources::read_source;
use super::survey::coerce_number;

pub const RECORDS_KEY: &str = "records";

#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub state: String,
    pub suicide_rate: f64,
    pub gun_ownership: f64,
}

impl StateRecord {
    pub fn new(state: impl Into<String>, suicide_rate: f64, gun_ownership: f64) -> Self {
        Self {
            state: state.into(),
            suicide_rate,
            gun_ownership,
        }
    }
}

/// Normalized three-column table, rows in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateTable {
    pub rows: Vec<StateRecord>,
}

impl StateTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Distinct states in first-seen order.
    pub fn states(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.state) {
                seen.push(row.state.clone());
            }
        }
        seen
    }
}

/// What parsing the document produced before it became a table.
#[derive(Debug, PartialEq)]
pub enum ParsedRecords {
    Table(StateTable),
    NoRecords,
}

/// Load the record file at `path`. Never fails: every problem becomes an
/// empty table with the matching notice.
pub fn load_records(path: &Path) -> Loaded<StateTable> {
    let text = match read_source(path) {
        Ok(Some(text)) => text,
        Ok(None) => return Loaded::fallback(LoadNotice::NotAvailable),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read record file");
            return Loaded::fallback(LoadNotice::Malformed(err));
        }
    };

    match parse_records(&text) {
        Ok(ParsedRecords::Table(table)) => {
            info!(path = %path.display(), rows = table.len(), "loaded state records");
            let rows = table.len();
            Loaded {
                table,
                notice: LoadNotice::Loaded { rows },
            }
        }
        Ok(ParsedRecords::NoRecords) => {
            warn!(path = %path.display(), "record file has no `{RECORDS_KEY}` list");
            Loaded::fallback(LoadNotice::NoRecords)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "record file is malformed");
            Loaded::fallback(LoadNotice::Malformed(err))
        }
    }
}

pub fn parse_records(text: &str) -> Result<ParsedRecords, LoadError> {
    let document: Value = serde_json::from_str(text)?;
    let Value::Object(root) = document else {
        return Err(LoadError::Shape("top level must be an object".into()));
    };

    let records = match root.get(RECORDS_KEY) {
        None | Some(Value::Null) => return Ok(ParsedRecords::NoRecords),
        Some(Value::Array(items)) if items.is_empty() => return Ok(ParsedRecords::NoRecords),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(LoadError::Shape(format!("`{RECORDS_KEY}` must be a list")));
        }
    };

    let objects = records
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(fields) => Ok(fields),
            _ => Err(LoadError::Shape(format!("record {idx} is not an object"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let field_map = resolve_fields(field_names(&objects))?;
    debug!(?field_map, "resolved record fields");

    let rows: Vec<StateRecord> = objects
        .iter()
        .filter_map(|fields| normalize_record(fields, &field_map))
        .collect();

    let dropped = objects.len() - rows.len();
    if dropped > 0 {
        debug!(dropped, "dropped incomplete records");
    }

    Ok(ParsedRecords::Table(StateTable { rows }))
}

/// Every field name across all records, in first-seen order.
fn field_names<'a>(objects: &[&'a Map<String, Value>]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for fields in objects {
        for name in fields.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
    }
    names
}

fn normalize_record(fields: &Map<String, Value>, map: &FieldMap) -> Option<StateRecord> {
    let lookup = |canonical: &str| map.source_for(canonical).and_then(|name| fields.get(name));

    let state = lookup(STATE).and_then(coerce_label)?;
    let suicide_rate = lookup(SUICIDE_RATE).and_then(coerce_value)?;
    let gun_ownership = lookup(GUN_OWNERSHIP).and_then(coerce_value)?;

    Some(StateRecord {
        state,
        suicide_rate,
        gun_ownership,
    })
}

fn coerce_label(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn coerce_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(text) => coerce_number(text),
        _ => None,
    }
}
