use crate::{RequestId, ShortenResult, StatsResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input.
    SubmitClicked,
    /// Replace the input and submit it in one step.
    Submit(String),
    /// Shortening service answered (or failed) for a request.
    ShortenCompleted {
        request_id: RequestId,
        result: Result<ShortenResult, String>,
    },
    CopyShortUrlClicked,
    CopyStatsUrlClicked,
    /// User asked to shorten another URL.
    ResetClicked,
    /// A stats view was opened for a stats link or bare secret.
    StatsRequested(String),
    /// Analytics service answered (or failed) for a request.
    StatsCompleted {
        request_id: RequestId,
        result: Result<StatsResult, String>,
    },
    /// The stats view was torn down.
    StatsViewClosed,
}
