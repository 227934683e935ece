use chrono::NaiveDate;
use core_types::Record;
use serde::Serialize;

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceKind {
    Line,
    Bar,
}

/// A single `(x, y)` point. `value` is `None` where the series has a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point<Y> {
    pub date: NaiveDate,
    pub value: Y,
}

/// A named series sharing the chart's date x-axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace<Y> {
    pub name: &'static str,
    pub kind: TraceKind,
    pub points: Vec<Point<Y>>,
}

impl<Y> Trace<Y> {
    /// Builds a trace with one point per record, reading the y value with `value`.
    pub fn from_records<F>(name: &'static str, kind: TraceKind, records: &[Record], value: F) -> Self
    where
        F: Fn(&Record) -> Y,
    {
        Self {
            name,
            kind,
            points: records
                .iter()
                .map(|r| Point {
                    date: r.date,
                    value: value(r),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Title and axis labels of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLayout {
    pub title: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
}

/// Open, high, low and close prices as four line traces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChart {
    pub layout: ChartLayout,
    pub open: Trace<f64>,
    pub high: Trace<f64>,
    pub low: Trace<f64>,
    pub close: Trace<f64>,
}

/// Trading volume as a single bar trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeChart {
    pub layout: ChartLayout,
    pub volume: Trace<u64>,
}

/// Monthly and cumulative percentage change as two line traces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PctChangeChart {
    pub layout: ChartLayout,
    pub monthly: Trace<Option<f64>>,
    pub from_start: Trace<Option<f64>>,
}

/// Everything the dashboard page needs to redraw its three charts for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub price: PriceChart,
    pub volume: VolumeChart,
    pub pct_change: PctChangeChart,
}

impl ChartPayload {
    /// Number of points in each trace. All traces share the same length.
    pub fn len(&self) -> usize {
        self.volume.volume.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
