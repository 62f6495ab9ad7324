//! Pure statistics over in-memory workout lists. Nothing here touches the store.

pub mod history;
pub mod progress;

pub use history::{date_label, group_by_date, sorted_date_keys_descending, DateGroups, DateLabel, Dated};
pub use progress::{
    chart_series, summary_stats, total_volume, ChartSeries, SummaryStats, DEFAULT_CHART_POINTS,
};
