use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

/// Identifier attached to every remote call issued by [`crate::update`].
pub type RequestId = u64;

/// Short link and companion stats link returned by the shortening service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenResult {
    pub short_url: String,
    /// Opaque link that embeds the secret used to query statistics.
    pub stats_url: String,
}

/// Number of links shortened during this session.
///
/// This is a local approximation only: it starts at zero, is bumped once per
/// successful shorten and is never synchronized with the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkCounter(u64);

impl LinkCounter {
    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

/// Secret identifier used to query statistics for one short link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatsKey(String);

impl StatsKey {
    /// Wraps a bare secret. Returns `None` for empty or whitespace-only input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Extracts the key from either a full stats link or a bare secret.
    ///
    /// For `http(s)` links the last non-empty path segment is the key, so
    /// `https://s.example/stats/xyz/` yields `xyz`. The segment is
    /// percent-decoded; the stats request re-encodes it as a query value.
    pub fn from_link(link: &str) -> Option<Self> {
        let trimmed = link.trim();
        match Url::parse(trimmed) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .and_then(|segment| {
                    Self::new(&percent_decode_str(segment).decode_utf8_lossy())
                }),
            _ => Self::new(trimmed.trim_matches('/')),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique visits recorded on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyVisit {
    /// ISO-like date string exactly as received.
    pub date: String,
    pub count: u64,
}

/// Visit volume attributed to one client address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopIpEntry {
    pub ip: String,
    pub count: u64,
}

/// Normalized analytics for one short link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsResult {
    pub daily_visits: Vec<DailyVisit>,
    pub top_ips: Vec<TopIpEntry>,
}

impl StatsResult {
    pub fn is_empty(&self) -> bool {
        self.daily_visits.is_empty() && self.top_ips.is_empty()
    }
}
