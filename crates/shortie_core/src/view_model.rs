use crate::chart::{DailyPoint, IpRow};
use crate::ShortenResult;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    /// False while a shorten is pending or the input is empty.
    pub can_submit: bool,
    pub is_pending: bool,
    pub error_message: Option<String>,
    pub result: Option<ShortenResult>,
    /// Session-local count, not a server total.
    pub links_shortened: u64,
    pub stats: StatsView,
    pub dirty: bool,
}

/// Render state of the statistics view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatsView {
    #[default]
    Idle,
    Loading,
    Error { reason: String },
    /// Fetch succeeded but there is nothing to chart.
    NoData,
    Ready(StatsProjection),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsProjection {
    pub daily_series: Vec<DailyPoint>,
    pub top_ip_table: Vec<IpRow>,
    pub top_ip_chart: Vec<IpRow>,
}
