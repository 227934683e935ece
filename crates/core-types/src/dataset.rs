use crate::error::CoreError;
use crate::structs::{DateWindow, Record};
use serde::Serialize;

/// A non-empty, strictly date-ordered sequence of records.
///
/// A `Dataset` is built once at startup and never mutated afterwards; share it
/// behind an `Arc` rather than cloning it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Validates ordering and takes ownership of the records.
    pub fn new(records: Vec<Record>) -> Result<Self, CoreError> {
        if records.is_empty() {
            return Err(CoreError::EmptyDataset);
        }

        if let Some(pair) = records.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(CoreError::UnorderedDates {
                previous: pair[0].date,
                next: pair[1].date,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> &Record {
        &self.records[0]
    }

    pub fn last(&self) -> &Record {
        &self.records[self.records.len() - 1]
    }

    /// The window covering every record.
    pub fn full_window(&self) -> DateWindow {
        DateWindow::from_ordered(self.first().date, self.last().date)
    }

    /// Clamps both ends of `window` to the dataset span.
    ///
    /// Returns `None` when the window does not overlap the span at all.
    pub fn clamp(&self, window: &DateWindow) -> Option<DateWindow> {
        let start = window.start().max(self.first().date);
        let end = window.end().min(self.last().date);
        DateWindow::new(start, end).ok()
    }
}
