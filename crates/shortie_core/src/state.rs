use crate::chart::{self, TOP_IP_CHART_LIMIT, TOP_IP_TABLE_LIMIT};
use crate::view_model::{AppViewModel, StatsProjection, StatsView};
use crate::{LinkCounter, RequestId, ShortenResult, StatsKey, StatsResult};

/// Lifecycle of the shorten workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending { request_id: RequestId },
    Succeeded(ShortenResult),
    Failed { message: String },
}

/// Lifecycle of the statistics fetch for the current stats view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatsFetchState {
    #[default]
    Idle,
    Loading { key: StatsKey, request_id: RequestId },
    Loaded { key: StatsKey, result: StatsResult },
    Errored { key: StatsKey, reason: String },
}

impl StatsFetchState {
    pub fn key(&self) -> Option<&StatsKey> {
        match self {
            StatsFetchState::Idle => None,
            StatsFetchState::Loading { key, .. }
            | StatsFetchState::Loaded { key, .. }
            | StatsFetchState::Errored { key, .. } => Some(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    submission: SubmissionState,
    link_counter: LinkCounter,
    stats: StatsFetchState,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn link_counter(&self) -> LinkCounter {
        self.link_counter
    }

    pub fn stats(&self) -> &StatsFetchState {
        &self.stats
    }

    pub fn view(&self) -> AppViewModel {
        let pending = matches!(self.submission, SubmissionState::Pending { .. });
        let (result, error_message) = match &self.submission {
            SubmissionState::Succeeded(result) => (Some(result.clone()), None),
            SubmissionState::Failed { message } => (None, Some(message.clone())),
            SubmissionState::Idle | SubmissionState::Pending { .. } => (None, None),
        };

        AppViewModel {
            input: self.input.clone(),
            can_submit: !pending && !self.input.is_empty(),
            is_pending: pending,
            error_message,
            result,
            links_shortened: self.link_counter.get(),
            stats: stats_view(&self.stats),
            dirty: self.dirty,
        }
    }

    /// Returns whether state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.dirty = true;
        }
    }

    pub(crate) fn set_submission(&mut self, submission: SubmissionState) {
        self.submission = submission;
        self.dirty = true;
    }

    pub(crate) fn record_shortened_link(&mut self) {
        self.link_counter.increment();
        self.dirty = true;
    }

    pub(crate) fn set_stats(&mut self, stats: StatsFetchState) {
        self.stats = stats;
        self.dirty = true;
    }

    pub(crate) fn clear_input(&mut self) {
        self.set_input(String::new());
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }
}

fn stats_view(stats: &StatsFetchState) -> StatsView {
    match stats {
        StatsFetchState::Idle => StatsView::Idle,
        StatsFetchState::Loading { .. } => StatsView::Loading,
        StatsFetchState::Errored { reason, .. } => StatsView::Error {
            reason: reason.clone(),
        },
        StatsFetchState::Loaded { result, .. } if result.is_empty() => StatsView::NoData,
        StatsFetchState::Loaded { result, .. } => StatsView::Ready(StatsProjection {
            daily_series: chart::to_daily_series(result),
            top_ip_table: chart::to_top_ip_table(result, TOP_IP_TABLE_LIMIT),
            top_ip_chart: chart::to_top_ip_chart(result, TOP_IP_CHART_LIMIT),
        }),
    }
}
