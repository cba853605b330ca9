//! Per-session filter state.
//!
//! The store holds five named slots that survive re-renders for as long as
//! the session lives. It is a plain value: the page owns one inside a signal
//! and hands it to [`crate::core::pipeline::recompute`] by `&mut`, so the
//! pipelines can be exercised without any UI.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::error::SessionError;

pub const MARKER_SIZE_MIN: u8 = 4;
pub const MARKER_SIZE_MAX: u8 = 24;
pub const MARKER_SIZE_DEFAULT: u8 = 10;

/// Which states the scatter chart keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StateSelection {
    /// No explicit choice yet: every state is shown.
    #[default]
    All,
    /// Exactly these states. An empty set shows nothing.
    Only(BTreeSet<String>),
}

impl StateSelection {
    pub fn only<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StateSelection::Only(states.into_iter().map(Into::into).collect())
    }

    pub fn includes(&self, state: &str) -> bool {
        match self {
            StateSelection::All => true,
            StateSelection::Only(states) => states.contains(state),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    SelectedStates,
    MarkerSize,
    CsvCategory,
    CsvMinValue,
    ShowLabels,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::SelectedStates,
        Slot::MarkerSize,
        Slot::CsvCategory,
        Slot::CsvMinValue,
        Slot::ShowLabels,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slot::SelectedStates => "selected_states",
            Slot::MarkerSize => "marker_size",
            Slot::CsvCategory => "csv_category",
            Slot::CsvMinValue => "csv_min_value",
            Slot::ShowLabels => "show_labels",
        }
    }

    pub fn default_value(self) -> SlotValue {
        match self {
            Slot::SelectedStates => SlotValue::States(StateSelection::All),
            Slot::MarkerSize => SlotValue::Size(MARKER_SIZE_DEFAULT),
            Slot::CsvCategory => SlotValue::Text(String::new()),
            Slot::CsvMinValue => SlotValue::Number(0.0),
            Slot::ShowLabels => SlotValue::Flag(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    States(StateSelection),
    Size(u8),
    Text(String),
    Number(f64),
    Flag(bool),
}

impl SlotValue {
    fn kind(&self) -> &'static str {
        match self {
            SlotValue::States(_) => "state selection",
            SlotValue::Size(_) => "size",
            SlotValue::Text(_) => "text",
            SlotValue::Number(_) => "number",
            SlotValue::Flag(_) => "flag",
        }
    }
}

/// Typed snapshot of every slot, read once per recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub selected_states: StateSelection,
    pub marker_size: u8,
    pub chosen_category: String,
    pub min_value: f64,
    pub show_labels: bool,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            selected_states: StateSelection::All,
            marker_size: MARKER_SIZE_DEFAULT,
            chosen_category: String::new(),
            min_value: 0.0,
            show_labels: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    slots: BTreeMap<Slot, SlotValue>,
}

impl SessionStore {
    /// A store with every slot at its default.
    pub fn new() -> Self {
        let mut store = Self::default();
        store.init_defaults();
        store
    }

    /// Fill absent slots with their defaults; present slots are untouched.
    pub fn init_defaults(&mut self) {
        for slot in Slot::ALL {
            self.slots.entry(slot).or_insert_with(|| {
                debug!(slot = slot.key(), "initializing session slot");
                slot.default_value()
            });
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotValue> {
        self.slots.get(&slot)
    }

    /// Write a slot, rejecting values of the wrong kind or out of range.
    pub fn set(&mut self, slot: Slot, value: SlotValue) -> Result<(), SessionError> {
        match (slot, &value) {
            (Slot::SelectedStates, SlotValue::States(_))
            | (Slot::CsvCategory, SlotValue::Text(_))
            | (Slot::ShowLabels, SlotValue::Flag(_)) => {}
            (Slot::MarkerSize, SlotValue::Size(size)) => {
                if !(MARKER_SIZE_MIN..=MARKER_SIZE_MAX).contains(size) {
                    return Err(SessionError::MarkerSizeOutOfRange(i64::from(*size)));
                }
            }
            (Slot::CsvMinValue, SlotValue::Number(number)) => {
                if !number.is_finite() {
                    return Err(SessionError::NonFiniteMinValue);
                }
            }
            (slot, value) => {
                return Err(SessionError::WrongKind {
                    slot: slot.key(),
                    given: value.kind(),
                })
            }
        }
        self.slots.insert(slot, value);
        Ok(())
    }

    /// Read every slot, falling back to defaults for absent ones.
    pub fn selection(&self) -> FilterSelection {
        let defaults = FilterSelection::default();
        FilterSelection {
            selected_states: match self.get(Slot::SelectedStates) {
                Some(SlotValue::States(states)) => states.clone(),
                _ => defaults.selected_states,
            },
            marker_size: match self.get(Slot::MarkerSize) {
                Some(SlotValue::Size(size)) => *size,
                _ => defaults.marker_size,
            },
            chosen_category: match self.get(Slot::CsvCategory) {
                Some(SlotValue::Text(category)) => category.clone(),
                _ => defaults.chosen_category,
            },
            min_value: match self.get(Slot::CsvMinValue) {
                Some(SlotValue::Number(value)) => *value,
                _ => defaults.min_value,
            },
            show_labels: match self.get(Slot::ShowLabels) {
                Some(SlotValue::Flag(flag)) => *flag,
                _ => defaults.show_labels,
            },
        }
    }

    /// Write a whole snapshot back. Marker size is clamped into range and a
    /// non-finite minimum falls back to zero.
    pub fn store_selection(&mut self, selection: &FilterSelection) {
        let marker = selection.marker_size.clamp(MARKER_SIZE_MIN, MARKER_SIZE_MAX);
        let min_value = if selection.min_value.is_finite() {
            selection.min_value
        } else {
            0.0
        };
        self.slots.insert(
            Slot::SelectedStates,
            SlotValue::States(selection.selected_states.clone()),
        );
        self.slots.insert(Slot::MarkerSize, SlotValue::Size(marker));
        self.slots.insert(
            Slot::CsvCategory,
            SlotValue::Text(selection.chosen_category.clone()),
        );
        self.slots.insert(Slot::CsvMinValue, SlotValue::Number(min_value));
        self.slots
            .insert(Slot::ShowLabels, SlotValue::Flag(selection.show_labels));
    }

    pub fn select_states(&mut self, selection: StateSelection) {
        self.slots
            .insert(Slot::SelectedStates, SlotValue::States(selection));
    }

    /// Slider-facing setter: clamps instead of rejecting.
    pub fn set_marker_size(&mut self, size: i64) {
        let clamped = size.clamp(i64::from(MARKER_SIZE_MIN), i64::from(MARKER_SIZE_MAX));
        self.slots
            .insert(Slot::MarkerSize, SlotValue::Size(clamped as u8));
    }

    pub fn choose_category(&mut self, category: impl Into<String>) {
        self.slots
            .insert(Slot::CsvCategory, SlotValue::Text(category.into()));
    }

    pub fn set_min_value(&mut self, value: f64) {
        if value.is_finite() {
            self.slots.insert(Slot::CsvMinValue, SlotValue::Number(value));
        }
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.slots.insert(Slot::ShowLabels, SlotValue::Flag(show));
    }
}
