//! WOD Timer - interval training timer served over HTTP
//!
//! This is the main entry point for the wod-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use wod_timer::{
    api::create_router,
    config::Config,
    engine::TimerEngine,
    state::AppState,
    tasks::tick_driver_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("wod_timer={},tower_http=info", config.log_level()))
        .init();

    let settings = config.timer_settings();
    info!("Starting wod-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, mode={}, tones={:?}",
          config.host, config.port, config.mode, config.tones);
    info!("Timer settings: {:?}", settings);

    let mut engine = TimerEngine::new(config.mode, settings, config.tones.build());
    if config.mute {
        engine.set_sound_enabled(false);
    }

    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine));

    // Subscribe before spawning so the first start is never missed
    let command_rx = state.command_tx.subscribe();
    tokio::spawn(tick_driver_task(Arc::clone(&state), command_rx));

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start  - Start or resume the timer");
    info!("  POST /timer/pause  - Toggle pause");
    info!("  POST /timer/reset  - Reset (?to_zero=false keeps the AMRAP budget)");
    info!("  POST /timer/sound  - Toggle sound cues");
    info!("  PUT  /timer/mode   - Select mode and settings");
    info!("  GET  /status       - Current timer snapshot");
    info!("  GET  /health       - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
