use analytics::{DescriptiveStatistics, KpiSummary};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// The KPI lines, formatted as on the dashboard page.
pub fn kpi_lines(kpis: &KpiSummary) -> Vec<String> {
    let avg_monthly = kpis
        .avg_monthly_growth_pct
        .map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}%"));

    vec![
        format!("Maximum Price: ${:.2}", kpis.max_close),
        format!("Total Percentage Growth: {:.2}%", kpis.total_growth_pct),
        format!(
            "Average Difference Between Open and Adj. Close Prices: ${:.2}",
            kpis.avg_open_adj_close_diff
        ),
        format!("Average Monthly Growth: {avg_monthly}"),
    ]
}

/// One row per column, in the `describe()` order mean, std, min, max, quartiles.
pub fn statistics_table(statistics: &DescriptiveStatistics) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "mean", "std", "min", "max", "25%", "50%", "75%"]);

    for s in &statistics.columns {
        let mut row = vec![Cell::new(s.column.header())];
        row.extend(
            [s.mean, s.std_dev, s.min, s.max, s.q25, s.median, s.q75]
                .into_iter()
                .map(|v| {
                    Cell::new(v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}")))
                }),
        );
        table.add_row(row);
    }

    table
}
