use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use carpool_server::cache::{ScheduleCache, spawn_sweeper};
use carpool_server::config::ServerConfig;
use carpool_server::groups::GroupDirectory;
use carpool_server::roster::DriverRoster;
use carpool_server::untis::{MockUntisClient, TimetableProvider, UntisClient};
use carpool_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carpool_server=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    match config.mock_dir.clone() {
        Some(dir) => {
            info!(dir = %dir.display(), "using mock timetable data");
            let provider = MockUntisClient::new(&dir).expect("Failed to load mock data");
            serve(config, provider).await;
        }
        None => {
            if config.untis.school.is_empty() {
                error!("UNTIS_SCHOOL not set. Timetable requests will fail.");
            }
            let provider =
                UntisClient::new(config.untis.clone()).expect("Failed to create timetable client");
            serve(config, provider).await;
        }
    }
}

async fn serve<P: TimetableProvider + 'static>(config: ServerConfig, provider: P) {
    // Fail fast when the group listing is unavailable
    info!("Fetching groups...");
    let groups = GroupDirectory::fetch(&provider)
        .await
        .expect("Failed to fetch groups");
    info!("Loaded {} groups", groups.len());

    let schedules = ScheduleCache::new(provider, &config.cache);
    let state = AppState::new(schedules, groups, DriverRoster::new(), config.anchor);

    // Drop cached days that are already over
    spawn_sweeper(Arc::clone(&state.schedules), config.sweep_interval);

    let app = create_router(state, config.static_dir.as_deref(), &config.cors_origins);

    info!("Starting server on http://{}", config.bind_addr);
    info!("Endpoints:");
    info!("  GET   /health              - Health check");
    info!("  GET   /api/groups          - List groups");
    info!("  GET   /api/times           - Day bounds of a group");
    info!("  POST  /api/drivers         - Register a driver");
    info!("  GET   /api/drivers/:name   - Driver profile");
    info!("  PATCH /api/drivers/:name   - Update driver settings");
    info!("  GET   /api/trips           - Possible shared trips");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
