use std::sync::Arc;

mod catalog;
mod config;
mod handler;
mod http;
mod logger;
mod query;
mod server;
mod table;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, sizing the worker pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg));
    server::signal::start_signal_handler(Arc::clone(&state.shutdown));

    server::start_server_loop(listener, state).await?;
    Ok(())
}
