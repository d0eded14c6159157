use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{
    ApiDoc, MongoProductRepository, ProductService, RedisViewCache, handlers,
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;

use config::Config;

#[derive(Clone)]
struct HealthState {
    mongo_client: database::mongodb::Client,
    redis_conn: database::redis::ConnectionManager,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Both stores must be up before the API accepts traffic
    let (mongo_client, redis_conn) = tokio::try_join!(
        async {
            database::mongodb::connect_from_config_with_retry(&config.mongodb, None)
                .await
                .map_err(|e| eyre::eyre!("MongoDB connection failed: {}", e))
        },
        async {
            database::redis::connect_from_config_with_retry(&config.redis, None)
                .await
                .map_err(|e| eyre::eyre!("Redis connection failed: {}", e))
        },
    )?;

    let db = mongo_client.database(&config.mongodb.database);
    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database
    );

    let repository = MongoProductRepository::new(&db);
    repository.init_indexes().await?;

    let cache = RedisViewCache::new(redis_conn.clone());
    let service = ProductService::new(repository, cache);

    let health_state = HealthState {
        mongo_client,
        redis_conn,
    };

    let app = Router::new()
        .nest("/api/products", handlers::router(service))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health).with_state(health_state))
        .layer(TraceLayer::new_for_http());

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("catalog-api listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("catalog-api shutdown complete");
    Ok(())
}

/// Liveness plus a ping to each backing store
async fn health(State(state): State<HealthState>) -> (StatusCode, Json<Value>) {
    let mongo_ok = database::mongodb::check_health(&state.mongo_client).await;
    let redis_ok = database::redis::check_health(&state.redis_conn).await;

    let status = if mongo_ok && redis_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if mongo_ok && redis_ok { "ok" } else { "degraded" },
        "mongodb": mongo_ok,
        "redis": redis_ok,
    });

    (status, Json(body))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    info!("Shutdown signal received");
}
