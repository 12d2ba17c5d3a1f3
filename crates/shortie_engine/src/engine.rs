use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use shortie_core::{RequestId, StatsKey};
use shortie_logging::{redact, shortie_debug, shortie_info, shortie_warn};
use tokio::sync::mpsc as tokio_mpsc;
use tokio_util::sync::CancellationToken;

use crate::client::{ReqwestShortieClient, ServiceSettings, ShortenService, StatsService};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Shorten { request_id: RequestId, long_url: String },
    FetchStats { request_id: RequestId, key: StatsKey },
    Cancel { request_id: RequestId },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs remote calls on a background thread with a single-threaded tokio runtime.
///
/// Completions are delivered as [`EngineEvent`]s. A cancelled request produces no
/// event. Dropping the handle cancels everything still in flight.
pub struct EngineHandle {
    cmd_tx: tokio_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        let client = Arc::new(ReqwestShortieClient::new(settings)?);
        Self::with_services(client.clone(), client)
    }

    pub fn with_services(
        shortener: Arc<dyn ShortenService>,
        stats: Arc<dyn StatsService>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, mut cmd_rx) = tokio_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let root = shutdown.clone();

        thread::Builder::new()
            .name("shortie-engine".to_string())
            .spawn(move || {
                let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        handle_command(command, &shortener, &stats, &root, &in_flight, &event_tx);
                    }
                });
                shortie_debug!("engine command loop stopped");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            shutdown,
        })
    }

    pub fn shorten(&self, request_id: RequestId, long_url: impl Into<String>) {
        self.send(EngineCommand::Shorten {
            request_id,
            long_url: long_url.into(),
        });
    }

    pub fn fetch_stats(&self, request_id: RequestId, key: StatsKey) {
        self.send(EngineCommand::FetchStats { request_id, key });
    }

    pub fn cancel(&self, request_id: RequestId) {
        self.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            shortie_warn!("engine thread is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn handle_command(
    command: EngineCommand,
    shortener: &Arc<dyn ShortenService>,
    stats: &Arc<dyn StatsService>,
    root: &CancellationToken,
    in_flight: &InFlight,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Shorten {
            request_id,
            long_url,
        } => {
            shortie_info!(
                "Shorten request_id={} url_len={}",
                request_id,
                long_url.len()
            );
            let shortener = shortener.clone();
            spawn_request(request_id, root, in_flight, event_tx, async move {
                let result = shortener.shorten(&long_url).await;
                EngineEvent::ShortenCompleted { request_id, result }
            });
        }
        EngineCommand::FetchStats { request_id, key } => {
            shortie_info!(
                "FetchStats request_id={} key={}",
                request_id,
                redact(key.as_str())
            );
            let stats = stats.clone();
            spawn_request(request_id, root, in_flight, event_tx, async move {
                let result = stats.fetch_stats(&key).await;
                EngineEvent::StatsCompleted { request_id, result }
            });
        }
        EngineCommand::Cancel { request_id } => {
            let token = lock(in_flight).remove(&request_id);
            match token {
                Some(token) => {
                    shortie_debug!("Cancel request_id={}", request_id);
                    token.cancel();
                }
                None => shortie_debug!("Cancel request_id={} (already finished)", request_id),
            }
        }
    }
}

fn spawn_request<F>(
    request_id: RequestId,
    root: &CancellationToken,
    in_flight: &InFlight,
    event_tx: &mpsc::Sender<EngineEvent>,
    request: F,
) where
    F: std::future::Future<Output = EngineEvent> + Send + 'static,
{
    let token = root.child_token();
    lock(in_flight).insert(request_id, token.clone());
    let in_flight = in_flight.clone();
    let event_tx = event_tx.clone();

    tokio::spawn(async move {
        let event = tokio::select! {
            _ = token.cancelled() => None,
            event = request => Some(event),
        };
        lock(&in_flight).remove(&request_id);
        match event {
            Some(event) => {
                let _ = event_tx.send(event);
            }
            None => shortie_debug!("request_id={} cancelled before completion", request_id),
        }
    });
}

fn lock(in_flight: &InFlight) -> std::sync::MutexGuard<'_, HashMap<RequestId, CancellationToken>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}
