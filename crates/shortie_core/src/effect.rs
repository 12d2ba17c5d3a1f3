use crate::{Notification, RequestId, StatsKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the long URL to the shortening service.
    ShortenUrl { request_id: RequestId, long_url: String },
    /// GET the analytics for a stats key.
    FetchStats { request_id: RequestId, key: StatsKey },
    /// Abandon an in-flight request; its completion will be ignored anyway.
    CancelRequest { request_id: RequestId },
    CopyToClipboard { text: String },
    Notify(Notification),
}
