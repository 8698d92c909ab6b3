use anyhow::Result;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::config::AppConfig;
use api::jwt::{JwtConfig, JwtService};
use api::routes;
use api::seed;
use api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting MindMate API service");

    // Required configuration is loaded before anything binds; a missing
    // DATABASE_URL or JWT_SECRET aborts startup entirely.
    let db_config = common::database::DatabaseConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    let app_config = AppConfig::from_env();

    let pool = common::database::init_pool(&db_config).await?;

    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(common::error::DatabaseError::from)?;

    let jwt_service = JwtService::new(&jwt_config);
    let app_state = AppState::new(pool.clone(), jwt_service);

    seed::seed_sample_data(&app_state.wellness_repository)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed sample data: {e}"))?;

    tokio::fs::create_dir_all(&app_config.upload_dir).await?;

    let cors = build_cors_layer(&app_config)?;

    let app = routes::create_router(app_state)
        .nest_service("/uploads", ServeDir::new(&app_config.upload_dir))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&app_config.bind_addr).await?;
    info!("MindMate API listening on {}", app_config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Closing database connection");
    pool.close().await;

    Ok(())
}

fn build_cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return Ok(cors.allow_origin(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
    }
}
