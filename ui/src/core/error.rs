//! Error and notice types shared by the loaders and pipelines.
//!
//! Nothing here is fatal to the page: loaders fold every failure into a
//! [`LoadNotice`] next to an empty default table, and pipelines report an
//! empty filter result as [`PipelineOutcome::NoMatches`].

use std::path::PathBuf;

/// Why a source file could not be turned into a table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading the file failed after it was found to exist.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited text could not be parsed.
    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// Structured text could not be parsed.
    #[error("malformed structured data: {0}")]
    Json(#[from] serde_json::Error),

    /// The structured document parsed but has the wrong shape.
    #[error("unexpected document shape: {0}")]
    Shape(String),

    /// Two source fields resolve to the same canonical field.
    #[error("fields {fields:?} all resolve to `{canonical}`")]
    AliasCollision {
        canonical: &'static str,
        fields: Vec<String>,
    },

    /// One source field matches more than one canonical field.
    #[error("field `{field}` matches several canonical fields: {canonicals:?}")]
    AmbiguousField {
        field: String,
        canonicals: Vec<&'static str>,
    },
}

/// Rejected write into the session store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("slot `{slot}` does not accept a {given} value")]
    WrongKind {
        slot: &'static str,
        given: &'static str,
    },

    #[error("marker size {0} is outside 4..=24")]
    MarkerSizeOutOfRange(i64),

    #[error("minimum value must be finite")]
    NonFiniteMinValue,
}

/// How a load attempt went, alongside the table it produced.
#[derive(Debug)]
pub enum LoadNotice {
    /// Parsed successfully; `rows` is the size of the resulting table.
    Loaded { rows: usize },
    /// File is absent or zero bytes.
    NotAvailable,
    /// File exists but could not be parsed into a table.
    Malformed(LoadError),
    /// Document parsed but its record list is missing or empty.
    NoRecords,
}

impl LoadNotice {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadNotice::Loaded { .. })
    }

    /// Short machine-friendly tag, also used as a CSS modifier.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadNotice::Loaded { .. } => "loaded",
            LoadNotice::NotAvailable => "not-available",
            LoadNotice::Malformed(_) => "malformed",
            LoadNotice::NoRecords => "no-records",
        }
    }
}

/// A table paired with the notice describing how it was obtained.
#[derive(Debug)]
pub struct Loaded<T> {
    pub table: T,
    pub notice: LoadNotice,
}

impl<T: Default> Loaded<T> {
    pub(crate) fn fallback(notice: LoadNotice) -> Self {
        Self {
            table: T::default(),
            notice,
        }
    }
}

/// Result of running one chart pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome<T> {
    /// A non-empty view ready for the renderer.
    Ready(T),
    /// The source table is empty, so the chart shows its placeholder.
    Unavailable,
    /// Data exists but the current filters leave nothing to draw.
    NoMatches,
}

impl<T> PipelineOutcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            PipelineOutcome::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PipelineOutcome<U> {
        match self {
            PipelineOutcome::Ready(view) => PipelineOutcome::Ready(f(view)),
            PipelineOutcome::Unavailable => PipelineOutcome::Unavailable,
            PipelineOutcome::NoMatches => PipelineOutcome::NoMatches,
        }
    }
}
