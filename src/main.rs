mod api;
mod auth;
mod config;
mod logger;
mod server;
mod store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Build the Tokio runtime, sizing the thread pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    let addr = cfg.get_socket_addr()?;
    let listener = server::bind_listener(addr)?;

    let state = std::sync::Arc::new(config::AppState::new(&cfg));

    let shutdown = server::ShutdownSignal::new();
    server::start_signal_handler(&shutdown);

    logger::log_server_start(&addr, &cfg);

    server::run(listener, state, &shutdown).await
}
