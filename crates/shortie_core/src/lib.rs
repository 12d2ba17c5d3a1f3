//! Shortie core: pure state machine, wire normalization and chart projections.
pub mod chart;
mod effect;
mod msg;
mod notify;
mod state;
mod stats;
mod update;
mod view_model;
pub mod wire;

pub use chart::{DailyPoint, IpRow, TOP_IP_CHART_LIMIT, TOP_IP_TABLE_LIMIT};
pub use effect::Effect;
pub use msg::Msg;
pub use notify::{Notification, NotificationKind, Severity, SHORTEN_FAILED_MESSAGE};
pub use state::{AppState, StatsFetchState, SubmissionState};
pub use stats::{
    DailyVisit, LinkCounter, RequestId, ShortenResult, StatsKey, StatsResult, TopIpEntry,
};
pub use update::{is_valid_long_url, update};
pub use view_model::{AppViewModel, StatsProjection, StatsView};
pub use wire::WireError;
