use pretty_assertions::assert_eq;
use shortie_core::chart::{to_daily_series, to_top_ip_chart, to_top_ip_table};
use shortie_core::{
    DailyVisit, IpRow, StatsResult, TopIpEntry, TOP_IP_CHART_LIMIT, TOP_IP_TABLE_LIMIT,
};

fn stats_with_ips(count: u64) -> StatsResult {
    StatsResult {
        daily_visits: Vec::new(),
        top_ips: (0..count)
            .map(|i| TopIpEntry {
                ip: format!("10.0.0.{i}"),
                // Deliberately ascending so any re-ranking would show up.
                count: i,
            })
            .collect(),
    }
}

#[test]
fn daily_series_preserves_input_order() {
    let stats = StatsResult {
        daily_visits: vec![
            DailyVisit {
                date: "2024-06-17".to_string(),
                count: 8,
            },
            DailyVisit {
                date: "2024-06-15".to_string(),
                count: 12,
            },
        ],
        top_ips: Vec::new(),
    };

    let series = to_daily_series(&stats);

    let dates: Vec<_> = series.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-06-17", "2024-06-15"]);
    assert_eq!(series[1].visits, 12);
    assert_eq!(series[1].label, "Jun 15");
}

#[test]
fn table_and_chart_truncate_without_reranking() {
    let stats = stats_with_ips(12);

    let table = to_top_ip_table(&stats, TOP_IP_TABLE_LIMIT);
    let chart = to_top_ip_chart(&stats, TOP_IP_CHART_LIMIT);

    assert_eq!(table.len(), 10);
    assert_eq!(chart.len(), 5);
    assert_eq!(
        table[0],
        IpRow {
            ip: "10.0.0.0".to_string(),
            visits: 0
        }
    );
    assert_eq!(chart[4].ip, "10.0.0.4");
}

#[test]
fn short_inputs_are_returned_whole() {
    let stats = stats_with_ips(3);

    assert_eq!(to_top_ip_table(&stats, TOP_IP_TABLE_LIMIT).len(), 3);
    assert_eq!(to_top_ip_chart(&stats, TOP_IP_CHART_LIMIT).len(), 3);
}

#[test]
fn empty_inputs_produce_empty_outputs() {
    let stats = StatsResult::default();

    assert!(to_daily_series(&stats).is_empty());
    assert!(to_top_ip_table(&stats, TOP_IP_TABLE_LIMIT).is_empty());
    assert!(to_top_ip_chart(&stats, TOP_IP_CHART_LIMIT).is_empty());
}
