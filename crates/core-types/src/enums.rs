use crate::structs::Record;
use serde::{Deserialize, Serialize};

/// The numeric columns of a price record.
///
/// Serialized names follow the column headers of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Open,
    High,
    Low,
    Close,
    #[serde(rename = "Adj Close")]
    AdjClose,
    Volume,
    #[serde(rename = "% of change monthly")]
    PctChangeMonthly,
    #[serde(rename = "% of change from start")]
    PctChangeFromStart,
}

impl Column {
    /// All numeric columns, in source-file order.
    pub const ALL: [Column; 8] = [
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::AdjClose,
        Column::Volume,
        Column::PctChangeMonthly,
        Column::PctChangeFromStart,
    ];

    /// The column header as it appears in the source file.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Open => "Open",
            Column::High => "High",
            Column::Low => "Low",
            Column::Close => "Close",
            Column::AdjClose => "Adj Close",
            Column::Volume => "Volume",
            Column::PctChangeMonthly => "% of change monthly",
            Column::PctChangeFromStart => "% of change from start",
        }
    }

    /// Reads this column from a record. Returns `None` for an undefined percentage.
    pub fn value(&self, record: &Record) -> Option<f64> {
        match self {
            Column::Open => Some(record.open),
            Column::High => Some(record.high),
            Column::Low => Some(record.low),
            Column::Close => Some(record.close),
            Column::AdjClose => Some(record.adj_close),
            Column::Volume => Some(record.volume as f64),
            Column::PctChangeMonthly => record.pct_change_monthly,
            Column::PctChangeFromStart => record.pct_change_from_start,
        }
    }
}
