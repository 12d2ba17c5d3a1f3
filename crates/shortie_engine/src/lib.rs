//! Shortie engine: HTTP clients for the remote services and effect execution.
mod client;
mod engine;
mod types;

pub use client::{ReqwestShortieClient, ServiceSettings, ShortenService, StatsService};
pub use engine::EngineHandle;
pub use types::{EngineError, EngineEvent, FailureKind, RequestError};
