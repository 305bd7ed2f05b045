//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod route;
mod update;

pub use model::{Model, ToastLevel};
pub use route::Route;
pub use update::{Message, update};

use std::path::PathBuf;
use std::time::Duration;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    endpoint: String,
    timeout: Option<Duration>,
    skip_login: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application sending actions to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
            skip_login: false,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Limit how long a single action request may take. `None` waits forever.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Open directly on the dashboard.
    #[must_use]
    pub const fn with_skip_login(mut self, skip: bool) -> Self {
        self.skip_login = skip;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// The initial route for this app.
    const fn start_route(&self) -> Route {
        if self.skip_login {
            Route::Dashboard
        } else {
            Route::Entry
        }
    }
}
