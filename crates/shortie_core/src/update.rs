use crate::notify::SHORTEN_FAILED_MESSAGE;
use crate::{
    AppState, Effect, Msg, Notification, NotificationKind, RequestId, ShortenResult, StatsFetchState,
    StatsKey, StatsResult, SubmissionState,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submit(text) => {
            // A rejected submit must not replace the URL of the request in flight.
            if matches!(state.submission(), SubmissionState::Pending { .. }) {
                Vec::new()
            } else {
                state.set_input(text);
                submit(&mut state)
            }
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::ShortenCompleted { request_id, result } => {
            complete_shorten(&mut state, request_id, result)
        }
        Msg::CopyShortUrlClicked => copy_result(&state, |result| &result.short_url),
        Msg::CopyStatsUrlClicked => copy_result(&state, |result| &result.stats_url),
        Msg::ResetClicked => {
            let effects = match state.submission() {
                SubmissionState::Pending { request_id } => vec![Effect::CancelRequest {
                    request_id: *request_id,
                }],
                _ => Vec::new(),
            };
            state.set_submission(SubmissionState::Idle);
            state.clear_input();
            effects
        }
        Msg::StatsRequested(link) => match StatsKey::from_link(&link) {
            Some(key) => load_stats(&mut state, key),
            None => Vec::new(),
        },
        Msg::StatsCompleted { request_id, result } => {
            complete_stats(&mut state, request_id, result);
            Vec::new()
        }
        Msg::StatsViewClosed => {
            let effects = cancel_stats_in_flight(&state);
            if state.stats() != &StatsFetchState::Idle {
                state.set_stats(StatsFetchState::Idle);
            }
            effects
        }
    };

    (state, effects)
}

/// A long URL is accepted when it is non-empty and starts with `http`.
pub fn is_valid_long_url(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.starts_with("http")
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if !is_valid_long_url(state.input()) {
        return vec![Effect::Notify(Notification::new(
            NotificationKind::InvalidInput,
        ))];
    }
    // The host disables the submit affordance while pending; extra clicks are dropped.
    if matches!(state.submission(), SubmissionState::Pending { .. }) {
        return Vec::new();
    }

    let request_id = state.next_request_id();
    let long_url = state.input().to_string();
    state.set_submission(SubmissionState::Pending { request_id });
    vec![Effect::ShortenUrl {
        request_id,
        long_url,
    }]
}

fn complete_shorten(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<ShortenResult, String>,
) -> Vec<Effect> {
    match state.submission() {
        SubmissionState::Pending { request_id: current } if *current == request_id => {}
        _ => return Vec::new(),
    }

    match result {
        Ok(shortened) => {
            state.set_submission(SubmissionState::Succeeded(shortened));
            state.record_shortened_link();
            vec![Effect::Notify(Notification::new(NotificationKind::Success))]
        }
        Err(_reason) => {
            state.set_submission(SubmissionState::Failed {
                message: SHORTEN_FAILED_MESSAGE.to_string(),
            });
            vec![Effect::Notify(Notification::new(
                NotificationKind::RequestError,
            ))]
        }
    }
}

fn copy_result(state: &AppState, pick: fn(&ShortenResult) -> &String) -> Vec<Effect> {
    match state.submission() {
        SubmissionState::Succeeded(result) => vec![
            Effect::CopyToClipboard {
                text: pick(result).clone(),
            },
            Effect::Notify(Notification::new(NotificationKind::Copied)),
        ],
        _ => Vec::new(),
    }
}

fn load_stats(state: &mut AppState, key: StatsKey) -> Vec<Effect> {
    let mut effects = cancel_stats_in_flight(state);
    let request_id = state.next_request_id();
    state.set_stats(StatsFetchState::Loading {
        key: key.clone(),
        request_id,
    });
    effects.push(Effect::FetchStats { request_id, key });
    effects
}

fn complete_stats(state: &mut AppState, request_id: RequestId, result: Result<StatsResult, String>) {
    let key = match state.stats() {
        StatsFetchState::Loading {
            key,
            request_id: current,
        } if *current == request_id => key.clone(),
        _ => return,
    };

    let next = match result {
        Ok(result) => StatsFetchState::Loaded { key, result },
        Err(reason) => StatsFetchState::Errored { key, reason },
    };
    state.set_stats(next);
}

fn cancel_stats_in_flight(state: &AppState) -> Vec<Effect> {
    match state.stats() {
        StatsFetchState::Loading { request_id, .. } => vec![Effect::CancelRequest {
            request_id: *request_id,
        }],
        _ => Vec::new(),
    }
}
