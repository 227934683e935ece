use crate::error::AnalyticsError;
use crate::report::{ColumnStatistics, DescriptiveStatistics, KpiSummary};
use core_types::{Column, Dataset, Record};

/// A stateless calculator for deriving summary figures from the price history.
#[derive(Debug, Default)]
pub struct StatisticsEngine {}

impl StatisticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the headline KPIs over the full dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The complete, validated price history.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `KpiSummary`, or `AnalyticsError::DivisionByZero`
    /// if the first close price is zero.
    pub fn compute_kpis(&self, dataset: &Dataset) -> Result<KpiSummary, AnalyticsError> {
        let records = dataset.records();

        let first_close = dataset.first().close;
        if first_close == 0.0 {
            return Err(AnalyticsError::DivisionByZero("total_growth_pct".to_string()));
        }

        let max_close = records
            .iter()
            .map(|r| r.close)
            .fold(f64::NEG_INFINITY, f64::max);

        let total_growth_pct = (dataset.last().close - first_close) / first_close * 100.0;

        let avg_open_adj_close_diff = mean(records.iter().map(|r| r.open - r.adj_close))
            .ok_or_else(|| AnalyticsError::InsufficientData("avg_open_adj_close_diff".to_string()))?;

        // Undefined months are skipped and do not count towards the denominator.
        let avg_monthly_growth_pct = mean(records.iter().filter_map(|r| r.pct_change_monthly));

        tracing::debug!(
            records = records.len(),
            max_close,
            total_growth_pct,
            "Computed KPI summary."
        );

        Ok(KpiSummary {
            max_close,
            total_growth_pct,
            avg_open_adj_close_diff,
            avg_monthly_growth_pct,
        })
    }

    /// Calculates mean, sample standard deviation, min, quartiles and max for
    /// every numeric column.
    ///
    /// Percentage columns are summarised over their defined values only; a
    /// column too sparse for a figure reports `None` for it. Fails with
    /// `AnalyticsError::InsufficientData` if the dataset has fewer than two
    /// records.
    pub fn compute_descriptive_stats(
        &self,
        dataset: &Dataset,
    ) -> Result<DescriptiveStatistics, AnalyticsError> {
        if dataset.len() < 2 {
            return Err(AnalyticsError::InsufficientData(format!(
                "descriptive statistics need at least 2 records, got {}",
                dataset.len()
            )));
        }

        let columns = Column::ALL
            .iter()
            .map(|&column| self.describe_column(column, dataset.records()))
            .collect();

        Ok(DescriptiveStatistics { columns })
    }

    /// Summarises the defined values of one column.
    fn describe_column(&self, column: Column, records: &[Record]) -> ColumnStatistics {
        let mut values: Vec<f64> = records.iter().filter_map(|r| column.value(r)).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        let count = values.len();

        if count < 2 {
            tracing::debug!(
                column = column.header(),
                count,
                "Column too sparse for a standard deviation."
            );
        }

        let average = mean(values.iter().copied());
        // n - 1 divisor: undefined for a single value.
        let std_dev = average.filter(|_| count >= 2).map(|mean| {
            let variance = values
                .iter()
                .map(|v| (v - mean) * (v - mean))
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        });

        ColumnStatistics {
            column,
            count,
            mean: average,
            std_dev,
            min: values.first().copied(),
            q25: quantile_from_sorted(&values, 0.25),
            median: quantile_from_sorted(&values, 0.5),
            q75: quantile_from_sorted(&values, 0.75),
            max: values.last().copied(),
        }
    }
}

/// Arithmetic mean, or `None` for an empty sequence.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

/// Linear interpolation between the order statistics around `q * (n - 1)`.
///
/// `sorted` must be ascending. Returns `None` for an empty slice.
fn quantile_from_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let pos = q * (sorted.len() as f64 - 1.0);
    let lower_index = pos.floor() as usize;
    let upper_index = pos.ceil() as usize;

    if lower_index == upper_index {
        Some(sorted[lower_index])
    } else {
        let weight = pos - lower_index as f64;
        Some(sorted[lower_index] + weight * (sorted[upper_index] - sorted[lower_index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDate;

    fn record(month: u32, close: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2020, month, 1).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 1_000 * month as u64,
            pct_change_monthly: None,
            pct_change_from_start: None,
        }
    }

    fn dataset_from_closes(closes: &[f64]) -> Dataset {
        let records = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| record(i as u32 + 1, c))
            .collect();
        Dataset::new(records).unwrap()
    }

    /// Five records whose every column holds the values 1..=5.
    fn one_to_five() -> Dataset {
        let records = (1..=5)
            .map(|i| {
                let v = i as f64;
                Record {
                    date: NaiveDate::from_ymd_opt(2020, i, 1).unwrap(),
                    open: v,
                    high: v,
                    low: v,
                    close: v,
                    adj_close: v,
                    volume: i as u64,
                    pct_change_monthly: Some(v),
                    pct_change_from_start: Some(v),
                }
            })
            .collect();
        Dataset::new(records).unwrap()
    }

    #[test]
    fn test_max_close() {
        let dataset = dataset_from_closes(&[12.0, 48.5, 30.0, 48.0]);
        let kpis = StatisticsEngine::new().compute_kpis(&dataset).unwrap();
        assert_eq!(kpis.max_close, 48.5);
    }

    #[test]
    fn test_total_growth_pct() {
        let dataset = dataset_from_closes(&[100.0, 110.0, 90.0]);
        let kpis = StatisticsEngine::new().compute_kpis(&dataset).unwrap();
        assert_approx_eq!(kpis.total_growth_pct, -10.0, 1e-9);
    }

    #[test]
    fn test_single_record_kpis() {
        let dataset = dataset_from_closes(&[25.0]);
        let kpis = StatisticsEngine::new().compute_kpis(&dataset).unwrap();
        assert_eq!(kpis.max_close, 25.0);
        assert_eq!(kpis.total_growth_pct, 0.0);
        assert_eq!(kpis.avg_monthly_growth_pct, None);
    }

    #[test]
    fn test_avg_open_adj_close_diff() {
        let mut records: Vec<Record> = (1..=3).map(|m| record(m, 10.0)).collect();
        records[0].open = 11.0;
        records[1].open = 9.0;
        records[2].open = 13.0;
        let dataset = Dataset::new(records).unwrap();

        let kpis = StatisticsEngine::new().compute_kpis(&dataset).unwrap();
        assert_approx_eq!(kpis.avg_open_adj_close_diff, 1.0, 1e-9);
    }

    #[test]
    fn test_avg_monthly_growth_skips_undefined_months() {
        let mut records: Vec<Record> = (1..=3).map(|m| record(m, 10.0)).collect();
        records[1].pct_change_monthly = Some(10.0);
        records[2].pct_change_monthly = Some(-20.0);
        let dataset = Dataset::new(records).unwrap();

        let kpis = StatisticsEngine::new().compute_kpis(&dataset).unwrap();
        assert_approx_eq!(kpis.avg_monthly_growth_pct.unwrap(), -5.0, 1e-9);
    }

    #[test]
    fn test_zero_first_close_is_division_by_zero() {
        let dataset = dataset_from_closes(&[0.0, 10.0]);
        let err = StatisticsEngine::new().compute_kpis(&dataset).unwrap_err();
        assert_eq!(err, AnalyticsError::DivisionByZero("total_growth_pct".to_string()));
    }

    #[test]
    fn test_describe_one_to_five() {
        let stats = StatisticsEngine::new()
            .compute_descriptive_stats(&one_to_five())
            .unwrap();
        assert_eq!(stats.columns.len(), Column::ALL.len());

        for column in Column::ALL {
            let s = stats.get(column).unwrap();
            assert_eq!(s.count, 5);
            assert_approx_eq!(s.mean.unwrap(), 3.0, 1e-9);
            assert_approx_eq!(s.std_dev.unwrap(), 2.5f64.sqrt(), 1e-9);
            assert_eq!(s.min, Some(1.0));
            assert_approx_eq!(s.q25.unwrap(), 2.0, 1e-9);
            assert_approx_eq!(s.median.unwrap(), 3.0, 1e-9);
            assert_approx_eq!(s.q75.unwrap(), 4.0, 1e-9);
            assert_eq!(s.max, Some(5.0));
        }
    }

    #[test]
    fn test_quartiles_interpolate_between_order_statistics() {
        let dataset = dataset_from_closes(&[4.0, 1.0, 3.0, 2.0]);
        let stats = StatisticsEngine::new()
            .compute_descriptive_stats(&dataset)
            .unwrap();
        let close = stats.get(Column::Close).unwrap();
        assert_approx_eq!(close.q25.unwrap(), 1.75, 1e-9);
        assert_approx_eq!(close.median.unwrap(), 2.5, 1e-9);
        assert_approx_eq!(close.q75.unwrap(), 3.25, 1e-9);
    }

    #[test]
    fn test_quartiles_on_column_with_gaps() {
        let mut records: Vec<Record> = (1..=6).map(|m| record(m, 10.0)).collect();
        // Defined values 4, 1, 3, 2 with gaps in months 1 and 4.
        records[1].pct_change_monthly = Some(4.0);
        records[2].pct_change_monthly = Some(1.0);
        records[4].pct_change_monthly = Some(3.0);
        records[5].pct_change_monthly = Some(2.0);
        let dataset = Dataset::new(records).unwrap();

        let stats = StatisticsEngine::new()
            .compute_descriptive_stats(&dataset)
            .unwrap();
        let monthly = stats.get(Column::PctChangeMonthly).unwrap();
        assert_eq!(monthly.count, 4);
        assert_eq!(monthly.min, Some(1.0));
        assert_approx_eq!(monthly.q25.unwrap(), 1.75, 1e-9);
        assert_approx_eq!(monthly.median.unwrap(), 2.5, 1e-9);
        assert_approx_eq!(monthly.q75.unwrap(), 3.25, 1e-9);
        assert_eq!(monthly.max, Some(4.0));
    }

    #[test]
    fn test_percentage_columns_skip_undefined_values() {
        let mut records: Vec<Record> = (1..=4).map(|m| record(m, 10.0)).collect();
        for (i, r) in records.iter_mut().enumerate().skip(1) {
            r.pct_change_monthly = Some(i as f64);
            r.pct_change_from_start = Some(i as f64 * 10.0);
        }
        let dataset = Dataset::new(records).unwrap();

        let stats = StatisticsEngine::new()
            .compute_descriptive_stats(&dataset)
            .unwrap();
        let monthly = stats.get(Column::PctChangeMonthly).unwrap();
        assert_eq!(monthly.count, 3);
        assert_approx_eq!(monthly.mean.unwrap(), 2.0, 1e-9);
        assert_eq!(stats.get(Column::Close).unwrap().count, 4);
    }

    #[test]
    fn test_single_record_is_insufficient() {
        let dataset = dataset_from_closes(&[10.0]);
        let err = StatisticsEngine::new()
            .compute_descriptive_stats(&dataset)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InsufficientData(_)));
    }

    #[test]
    fn test_sparse_columns_report_what_they_can() {
        let mut records: Vec<Record> = (1..=2).map(|m| record(m, 100.0 + m as f64)).collect();
        records[1].pct_change_monthly = Some(10.0);
        let dataset = Dataset::new(records).unwrap();

        let stats = StatisticsEngine::new()
            .compute_descriptive_stats(&dataset)
            .unwrap();

        let monthly = stats.get(Column::PctChangeMonthly).unwrap();
        assert_eq!(monthly.count, 1);
        assert_eq!(monthly.mean, Some(10.0));
        assert_eq!(monthly.std_dev, None);
        assert_eq!(monthly.min, Some(10.0));
        assert_eq!(monthly.median, Some(10.0));
        assert_eq!(monthly.max, Some(10.0));

        let from_start = stats.get(Column::PctChangeFromStart).unwrap();
        assert_eq!(from_start.count, 0);
        assert_eq!(from_start.mean, None);
        assert_eq!(from_start.std_dev, None);
        assert_eq!(from_start.q25, None);
        assert_eq!(from_start.max, None);

        assert!(stats.get(Column::Close).unwrap().std_dev.is_some());
    }
}
