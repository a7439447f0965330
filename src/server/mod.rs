// Server module entry
// Listener setup, accept loop and graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config;
use crate::logger;

pub use listener::bind_listener;
pub use signal::{start_signal_handler, ShutdownSignal};

/// Run the accept loop until a shutdown signal arrives.
pub async fn run(
    listener: TcpListener,
    state: Arc<config::AppState>,
    shutdown: &ShutdownSignal,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notify.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    // Active connections keep running in their spawned tasks; the listener
    // is closed as soon as it drops.
    let remaining = active_connections.load(Ordering::SeqCst);
    if remaining > 0 {
        logger::log_warning(&format!(
            "{remaining} connection(s) still active at shutdown, letting them finish"
        ));
    }

    Ok(())
}
