//! Chart and table projections of a [`StatsResult`].
//!
//! Projections keep the order in which the service sent the records; nothing
//! here sorts by date or re-ranks by count.

use chrono::NaiveDate;

use crate::StatsResult;

/// Rows shown in the top-IP table.
pub const TOP_IP_TABLE_LIMIT: usize = 10;
/// Bars shown in the top-IP chart.
pub const TOP_IP_CHART_LIMIT: usize = 5;

/// One point of the daily visits line chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: String,
    /// Axis label such as `Jun 15`; the raw date when it cannot be parsed.
    pub label: String,
    pub visits: u64,
}

/// One row of the top-IP table or bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRow {
    pub ip: String,
    pub visits: u64,
}

pub fn to_daily_series(stats: &StatsResult) -> Vec<DailyPoint> {
    stats
        .daily_visits
        .iter()
        .map(|visit| DailyPoint {
            date: visit.date.clone(),
            label: date_label(&visit.date),
            visits: visit.count,
        })
        .collect()
}

pub fn to_top_ip_table(stats: &StatsResult, limit: usize) -> Vec<IpRow> {
    top_ips(stats, limit)
}

pub fn to_top_ip_chart(stats: &StatsResult, limit: usize) -> Vec<IpRow> {
    top_ips(stats, limit)
}

fn top_ips(stats: &StatsResult, limit: usize) -> Vec<IpRow> {
    stats
        .top_ips
        .iter()
        .take(limit)
        .map(|entry| IpRow {
            ip: entry.ip.clone(),
            visits: entry.count,
        })
        .collect()
}

/// Formats `2024-06-15` (optionally followed by a time part) as `Jun 15`.
pub fn date_label(date: &str) -> String {
    let day_part = date.get(..10).unwrap_or(date);
    match NaiveDate::parse_from_str(day_part, "%Y-%m-%d") {
        Ok(day) => day.format("%b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}
