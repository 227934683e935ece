use crate::payload::{ChartLayout, ChartPayload, PctChangeChart, PriceChart, Trace, TraceKind, VolumeChart};
use core_types::Record;

const PRICE_LAYOUT: ChartLayout = ChartLayout {
    title: "Stock Prices Over Time",
    x_axis: "Date",
    y_axis: "Price",
};

const VOLUME_LAYOUT: ChartLayout = ChartLayout {
    title: "Monthly Trading Volume",
    x_axis: "Date",
    y_axis: "Volume",
};

const PCT_CHANGE_LAYOUT: ChartLayout = ChartLayout {
    title: "Percentage Change Over Time",
    x_axis: "Date",
    y_axis: "Percentage Change",
};

/// Maps a (filtered) run of records into the three chart payloads.
///
/// Every trace has exactly one point per record, so an empty input produces
/// empty charts. Undefined percentages pass through as `None`.
pub fn project(records: &[Record]) -> ChartPayload {
    ChartPayload {
        price: PriceChart {
            layout: PRICE_LAYOUT,
            open: Trace::from_records("Open", TraceKind::Line, records, |r| r.open),
            high: Trace::from_records("High", TraceKind::Line, records, |r| r.high),
            low: Trace::from_records("Low", TraceKind::Line, records, |r| r.low),
            close: Trace::from_records("Close", TraceKind::Line, records, |r| r.close),
        },
        volume: VolumeChart {
            layout: VOLUME_LAYOUT,
            volume: Trace::from_records("Volume", TraceKind::Bar, records, |r| r.volume),
        },
        pct_change: PctChangeChart {
            layout: PCT_CHANGE_LAYOUT,
            monthly: Trace::from_records("% Change Monthly", TraceKind::Line, records, |r| {
                r.pct_change_monthly
            }),
            from_start: Trace::from_records("% Change from Start", TraceKind::Line, records, |r| {
                r.pct_change_from_start
            }),
        },
    }
}
