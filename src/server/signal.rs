// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Shutdown coordination between the signal task and the accept loop
pub struct ShutdownSignal {
    pub notify: Arc<Notify>,
    pub requested: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            notify: Arc::new(Notify::new()),
            requested: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the signal listener task (Unix)
#[cfg(unix)]
pub fn start_signal_handler(shutdown: &ShutdownSignal) {
    use tokio::signal::unix::{signal, SignalKind};

    let notify = Arc::clone(&shutdown.notify);
    let requested = Arc::clone(&shutdown.requested);

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }

        requested.store(true, Ordering::SeqCst);
        notify.notify_waiters();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: &ShutdownSignal) {
    let notify = Arc::clone(&shutdown.notify);
    let requested = Arc::clone(&shutdown.requested);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            requested.store(true, Ordering::SeqCst);
            notify.notify_waiters();
        }
    });
}
