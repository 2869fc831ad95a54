use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use nimbus_core::tracing::init_tracing;
use nimbus_users::config::UsersConfig;
use nimbus_users::router::build_router;
use nimbus_users::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    // Validation happens before anything else; a rejected configuration must
    // never reach the point of serving traffic.
    let config = UsersConfig::from_env().unwrap_or_else(|err| {
        eprintln!("configuration rejected:\n{err}");
        std::process::exit(1);
    });
    info!(
        environment = %config.environment,
        influx_url = %config.influx.url,
        influx_bucket = %config.influx.bucket,
        "configuration loaded"
    );

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };
    let router = build_router(state, Duration::from_secs(config.http_timeout));

    let http_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("users service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
