use crate::error::LoaderError;
use crate::DataSource;
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{Column, Dataset, Record};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Header of the date column.
pub const DATE_HEADER: &str = "Date";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Loads the price history from a CSV export.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for CsvSource {
    fn load(&self) -> Result<Dataset, LoaderError> {
        let file = File::open(&self.path).map_err(|source| LoaderError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let dataset = load_from_reader(file)?;

        tracing::info!(
            path = %self.path.display(),
            records = dataset.len(),
            first = %dataset.first().date,
            last = %dataset.last().date,
            "Loaded price history."
        );
        Ok(dataset)
    }
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    date: usize,
    values: [usize; 8],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoaderError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoaderError::MissingColumn(name.to_string()))
        };

        let date = position(DATE_HEADER)?;
        let mut values = [0; 8];
        for (slot, column) in values.iter_mut().zip(Column::ALL) {
            *slot = position(column.header())?;
        }
        Ok(Self { date, values })
    }

    /// `values` is laid out in `Column::ALL` order, which is declaration order.
    fn field<'r>(&self, row: &'r StringRecord, column: Column) -> &'r str {
        row.get(self.values[column as usize]).unwrap_or("").trim()
    }
}

/// Parses CSV data with a header row into a `Dataset`.
///
/// Column order is free and extra columns are ignored. Rows are sorted by date
/// before the dataset is validated, so a duplicate date is still an error.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, LoaderError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let index = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }
        records.push(parse_row(&row, &index)?);
    }

    records.sort_by_key(|r| r.date);
    Ok(Dataset::new(records)?)
}

fn parse_row(row: &StringRecord, index: &ColumnIndex) -> Result<Record, LoaderError> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);
    let invalid = |column: &str, message: String| LoaderError::InvalidRow {
        line,
        column: column.to_string(),
        message,
    };

    let raw_date = row.get(index.date).unwrap_or("").trim();
    let date = parse_date(raw_date)
        .ok_or_else(|| invalid(DATE_HEADER, format!("'{raw_date}' is not a date")))?;

    let price = |column: Column| {
        let raw = index.field(row, column);
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid(column.header(), format!("'{raw}' is not a number"))),
        }
    };

    let percentage = |column: Column| {
        let raw = index.field(row, column);
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            Ok(_) => Ok(None),
            Err(_) => Err(invalid(column.header(), format!("'{raw}' is not a number"))),
        }
    };

    let raw_volume = index.field(row, Column::Volume);
    let volume = parse_volume(raw_volume).ok_or_else(|| {
        invalid(
            Column::Volume.header(),
            format!("'{raw_volume}' is not a non-negative whole number"),
        )
    })?;

    Ok(Record {
        date,
        open: price(Column::Open)?,
        high: price(Column::High)?,
        low: price(Column::Low)?,
        close: price(Column::Close)?,
        adj_close: price(Column::AdjClose)?,
        volume,
        pct_change_monthly: percentage(Column::PctChangeMonthly)?,
        pct_change_from_start: percentage(Column::PctChangeFromStart)?,
    })
}

/// Accepts plain dates and the midnight timestamps spreadsheet exports produce.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}

/// Volume is a count, but spreadsheet exports often write it as `1234.0`.
fn parse_volume(raw: &str) -> Option<u64> {
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64).then_some(v as u64)
}
