use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use super::{ActionClient, ActionRequest, DispatchOutcome, RequestToken};

/// Runs dispatches off the UI thread and collects their outcomes.
///
/// Each dispatch gets its own short-lived thread. Outcomes arrive on a
/// channel the event loop drains with [`take_ready`](Self::take_ready).
pub struct Dispatcher {
    client: Arc<dyn ActionClient>,
    tx: Sender<DispatchOutcome>,
    rx: Receiver<DispatchOutcome>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn ActionClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { client, tx, rx }
    }

    /// Start one round trip for `request`, tagged with `token`.
    pub fn dispatch(&self, token: RequestToken, request: ActionRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tracing::info!(
            %token,
            command = %request.command,
            chars = request.text.chars().count(),
            "dispatching action"
        );
        thread::spawn(move || {
            let result = client.send(&request);
            let _ = tx.send(DispatchOutcome {
                token,
                command: request.command,
                result,
            });
        });
    }

    /// Outcomes that have arrived since the last call, oldest first.
    pub fn take_ready(&self) -> Vec<DispatchOutcome> {
        self.rx.try_iter().collect()
    }

    /// Block for the next outcome, up to `timeout`.
    pub fn wait_next(&self, timeout: Duration) -> Option<DispatchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
