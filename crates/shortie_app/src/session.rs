use std::sync::Arc;
use std::time::Duration;

use shortie_core::{update, AppState, AppViewModel, Msg};
use shortie_engine::{EngineError, EngineHandle};
use shortie_logging::shortie_info;
use thiserror::Error;

use crate::config::{ConfigError, HostConfig};
use crate::effects::EffectRunner;
use crate::logging::{self, LoggingError};
use crate::ports::{Clipboard, LogNotifier, Notifier};

/// Failure to bring up a host session.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One user session: owns the state and applies messages one at a time.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    /// Loads [`HostConfig`] from `.env` and the environment, then bootstraps.
    pub fn from_env(clipboard: Arc<dyn Clipboard>) -> Result<Self, BootstrapError> {
        let config = HostConfig::from_env()?;
        Self::bootstrap(&config, clipboard)
    }

    /// Installs the global logger and starts a session whose notifications
    /// are written to the log.
    pub fn bootstrap(
        config: &HostConfig,
        clipboard: Arc<dyn Clipboard>,
    ) -> Result<Self, BootstrapError> {
        logging::initialize(config.log_destination, config.log_level, &config.log_file)?;
        shortie_info!(
            "Shortie session starting (shorten: {}, stats: {})",
            config.services.shorten_endpoint,
            config.services.stats_endpoint
        );
        Ok(Self::new(config, Arc::new(LogNotifier), clipboard)?)
    }

    pub fn new(
        config: &HostConfig,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(config.services.clone())?;
        Ok(Self::with_engine(engine, notifier, clipboard))
    }

    pub fn with_engine(
        engine: EngineHandle,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine, notifier, clipboard),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Applies one message and runs its effects. Returns a view when state changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        self.state = state;
        self.runner.run(effects);
        view
    }

    /// Applies every engine completion that has already arrived.
    pub fn pump(&mut self) -> Option<AppViewModel> {
        let mut latest = None;
        for msg in self.runner.poll() {
            if let Some(view) = self.dispatch(msg) {
                latest = Some(view);
            }
        }
        latest
    }

    /// Blocks up to `timeout` for one engine completion and applies it.
    ///
    /// Returns `false` when nothing arrived in time.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.runner.wait(timeout) {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    pub fn submit(&mut self, long_url: impl Into<String>) -> Option<AppViewModel> {
        self.dispatch(Msg::Submit(long_url.into()))
    }

    pub fn copy_short_url(&mut self) -> Option<AppViewModel> {
        self.dispatch(Msg::CopyShortUrlClicked)
    }

    pub fn copy_stats_url(&mut self) -> Option<AppViewModel> {
        self.dispatch(Msg::CopyStatsUrlClicked)
    }

    pub fn reset(&mut self) -> Option<AppViewModel> {
        self.dispatch(Msg::ResetClicked)
    }

    /// Opens the statistics view for a stats link or bare secret.
    pub fn load_stats(&mut self, link: impl Into<String>) -> Option<AppViewModel> {
        self.dispatch(Msg::StatsRequested(link.into()))
    }

    pub fn close_stats(&mut self) -> Option<AppViewModel> {
        self.dispatch(Msg::StatsViewClosed)
    }
}
