use std::sync::Arc;

mod calculator;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

fn main() -> error::Result<()> {
    // Optional first argument: config file path without extension
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Create the Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    match cfg.server.workers {
        Some(workers) if workers > 0 => {
            runtime_builder.worker_threads(workers);
            logger::log_debug(&format!("Using {workers} worker threads"));
        }
        _ => logger::log_debug("Using default worker threads (CPU cores)"),
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> error::Result<()> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(config::AppState::new(cfg));

    logger::log_server_start(&addr, &state);

    server::start_server_loop(listener, state, server::signal::wait_for_shutdown()).await;
    Ok(())
}
