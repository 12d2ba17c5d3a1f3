//! Shortie host: configuration, logging, capability ports and the session driver
//! that connects the pure core to the I/O engine.
pub mod config;
mod effects;
pub mod logging;
mod ports;
mod session;

pub use config::{ConfigError, HostConfig};
pub use effects::EffectRunner;
pub use logging::{LogDestination, LoggingError};
pub use ports::{Clipboard, ClipboardError, LogNotifier, MemoryClipboard, Notifier};
pub use session::{BootstrapError, Session};
