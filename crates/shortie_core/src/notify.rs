/// Why a notification was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    InvalidInput,
    RequestError,
    Success,
    Copied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Fire-and-forget user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub description: &'static str,
}

/// Shown in the failure banner and in the request error notification.
pub const SHORTEN_FAILED_MESSAGE: &str = "Something went wrong while shortening the URL.";

impl Notification {
    pub fn new(kind: NotificationKind) -> Self {
        let (title, description) = match kind {
            NotificationKind::InvalidInput => (
                "Invalid URL",
                "Please enter a valid URL starting with http:// or https://",
            ),
            NotificationKind::RequestError => ("Error", SHORTEN_FAILED_MESSAGE),
            NotificationKind::Success => (
                "URL Shortened Successfully!",
                "Your shortened URL is ready to use.",
            ),
            NotificationKind::Copied => ("Copied!", "URL copied to clipboard"),
        };
        Self {
            kind,
            title,
            description,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            NotificationKind::InvalidInput | NotificationKind::RequestError => Severity::Error,
            NotificationKind::Success => Severity::Success,
            NotificationKind::Copied => Severity::Info,
        }
    }
}
