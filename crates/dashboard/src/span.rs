use chrono::{Datelike, Months, NaiveDate};
use core_types::Dataset;
use serde::Serialize;

/// The date range covered by the dataset, with one mark per calendar month
/// for the range control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
    /// The first day of every month from `first` to `last`, inclusive.
    pub marks: Vec<NaiveDate>,
}

impl DatasetSpan {
    pub fn of(dataset: &Dataset) -> Self {
        let first = dataset.first().date;
        let last = dataset.last().date;
        Self {
            first,
            last,
            marks: month_starts(first, last),
        }
    }
}

fn month_starts(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut marks = Vec::new();
    let mut current = from.with_day(1);

    while let Some(month) = current {
        if month > to {
            break;
        }
        marks.push(month);
        current = month.checked_add_months(Months::new(1));
    }

    marks
}
