use better_rest::error::AppError;
use better_rest::inputs::SleepInputs;
use better_rest::{api, config, estimation, state};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

fn init_tracing(level: tracing::Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_default()?;
    init_tracing(config.log_level());
    tracing::info!(
        config_path = config::DEFAULT_CONFIG_PATH,
        app = %config.app.name,
        "better-rest starting"
    );

    let service = estimation::load_service(config.model_path());
    let state = Arc::new(RwLock::new(state::AppState::with_service(
        service,
        config.clock(),
    )));

    let inputs_rx = match state.read() {
        Ok(guard) => guard.subscribe_inputs(),
        Err(_) => return Err(AppError::StateLock.into()),
    };
    tokio::spawn(log_input_changes(inputs_rx));

    let app = api::router(Arc::clone(&state));
    let port = config.server_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Traces each form edit. Bedtimes are computed and logged by the handlers.
async fn log_input_changes(mut inputs_rx: watch::Receiver<SleepInputs>) {
    while inputs_rx.changed().await.is_ok() {
        let inputs = *inputs_rx.borrow_and_update();
        tracing::debug!(
            wake_time = %inputs.wake_time,
            sleep_goal_hours = inputs.sleep_goal.hours(),
            caffeine_cups = inputs.caffeine.get(),
            "Form inputs changed"
        );
    }
}
