use santa_backend::{app, config, spawn_sweeper, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let state = AppState::new(config::rng_seed());
    if let Some(every) = config::sweep_interval() {
        spawn_sweeper(state.clone(), every);
    }

    let addr = config::server_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
