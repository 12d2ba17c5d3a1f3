use std::sync::Arc;
use std::time::Duration;

use shortie_core::{Effect, Msg};
use shortie_engine::{EngineEvent, EngineHandle};
use shortie_logging::{shortie_debug, shortie_warn};

use crate::ports::{Clipboard, Notifier};

/// Executes effects produced by `update` and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            engine,
            notifier,
            clipboard,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ShortenUrl {
                    request_id,
                    long_url,
                } => self.engine.shorten(request_id, long_url),
                Effect::FetchStats { request_id, key } => {
                    self.engine.fetch_stats(request_id, key);
                }
                Effect::CancelRequest { request_id } => self.engine.cancel(request_id),
                Effect::CopyToClipboard { text } => {
                    if let Err(err) = self.clipboard.write_text(&text) {
                        shortie_warn!("Copy to clipboard failed: {}", err);
                    }
                }
                Effect::Notify(notification) => {
                    shortie_debug!("Notify {:?}", notification.kind);
                    self.notifier.notify(&notification);
                }
            }
        }
    }

    /// Drains engine events that are already available.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn wait(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(event_to_msg)
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ShortenCompleted { request_id, result } => Msg::ShortenCompleted {
            request_id,
            result: result.map_err(|err| {
                shortie_warn!("Shorten request {} failed: {}", request_id, err);
                err.to_string()
            }),
        },
        EngineEvent::StatsCompleted { request_id, result } => Msg::StatsCompleted {
            request_id,
            result: result.map_err(|err| {
                shortie_warn!("Stats request {} failed: {}", request_id, err);
                err.to_string()
            }),
        },
    }
}
