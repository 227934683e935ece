use crate::error::ChartError;
use core_types::{DateWindow, Record};

/// Selects the records whose date lies in the closed interval of `window`.
///
/// `records` must be sorted ascending by date, as a `Dataset` (or any slice of
/// one) always is. The result is the maximal contiguous sub-slice inside the
/// window, so filtering is order-preserving and idempotent.
///
/// A window that overlaps the span of `records` but contains no record yields
/// an empty slice. A window lying entirely before the first or after the last
/// record is `ChartError::OutOfRange`.
pub fn filter<'a>(records: &'a [Record], window: &DateWindow) -> Result<&'a [Record], ChartError> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Ok(records);
    };

    if window.end() < first.date || window.start() > last.date {
        return Err(ChartError::OutOfRange {
            start: window.start(),
            end: window.end(),
            first: first.date,
            last: last.date,
        });
    }

    let lower = records.partition_point(|r| r.date < window.start());
    let upper = records.partition_point(|r| r.date <= window.end());

    Ok(&records[lower..upper])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Dataset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(start: NaiveDate, end: NaiveDate) -> DateWindow {
        DateWindow::new(start, end).unwrap()
    }

    fn monthly(months: u32) -> Dataset {
        let records = (0..months)
            .map(|i| {
                let price = 100.0 + i as f64;
                Record {
                    date: date(2019 + (i / 12) as i32, i % 12 + 1, 1),
                    open: price,
                    high: price + 2.0,
                    low: price - 2.0,
                    close: price + 1.0,
                    adj_close: price + 0.5,
                    volume: 10_000 + i as u64,
                    pct_change_monthly: (i > 0).then_some(1.0),
                    pct_change_from_start: (i > 0).then_some(i as f64),
                }
            })
            .collect();
        Dataset::new(records).unwrap()
    }

    #[test]
    fn test_full_span_returns_everything() {
        let dataset = monthly(18);
        let filtered = filter(dataset.records(), &dataset.full_window()).unwrap();
        assert_eq!(filtered, dataset.records());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let dataset = monthly(12);
        let filtered = filter(dataset.records(), &window(date(2019, 3, 1), date(2019, 5, 1))).unwrap();
        let dates: Vec<_> = filtered.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2019, 3, 1), date(2019, 4, 1), date(2019, 5, 1)]);
    }

    #[test]
    fn test_result_is_sorted_subsequence() {
        let dataset = monthly(30);
        let w = window(date(2019, 7, 15), date(2020, 11, 20));
        let filtered = filter(dataset.records(), &w).unwrap();

        assert!(!filtered.is_empty());
        assert!(filtered.windows(2).all(|p| p[0].date < p[1].date));
        assert!(filtered.iter().all(|r| w.contains(r.date)));
        assert!(filtered.iter().all(|r| dataset.records().contains(r)));
        // Nothing inside the window was dropped.
        let inside = dataset.records().iter().filter(|r| w.contains(r.date)).count();
        assert_eq!(filtered.len(), inside);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let dataset = monthly(24);
        let w = window(date(2019, 2, 10), date(2020, 6, 1));
        let once = filter(dataset.records(), &w).unwrap();
        let twice = filter(once, &w).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_window_between_points_is_empty_not_error() {
        let dataset = monthly(6);
        let filtered = filter(dataset.records(), &window(date(2019, 2, 2), date(2019, 2, 27))).unwrap();
        assert!(filtered.is_empty());

        // Re-filtering an empty selection stays empty.
        assert!(filter(filtered, &window(date(2019, 2, 2), date(2019, 2, 27))).unwrap().is_empty());
    }

    #[test]
    fn test_partially_overlapping_window() {
        let dataset = monthly(6);
        let filtered = filter(dataset.records(), &window(date(2018, 1, 1), date(2019, 2, 1))).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].date, date(2019, 1, 1));
    }

    #[test]
    fn test_window_outside_span_is_out_of_range() {
        let dataset = monthly(6);

        let before = filter(dataset.records(), &window(date(2017, 1, 1), date(2018, 12, 31)));
        assert_eq!(
            before.unwrap_err(),
            ChartError::OutOfRange {
                start: date(2017, 1, 1),
                end: date(2018, 12, 31),
                first: date(2019, 1, 1),
                last: date(2019, 6, 1),
            }
        );

        let after = filter(dataset.records(), &window(date(2019, 6, 2), date(2020, 1, 1)));
        assert!(matches!(after, Err(ChartError::OutOfRange { .. })));
    }
}
