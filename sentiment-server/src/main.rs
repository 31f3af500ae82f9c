use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use sentiment_server::{
    api,
    config::Settings,
    db::{repositories::SqliteStatusStore, Database, Dataset},
    state::AppState,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentiment_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new().expect("Failed to load settings");

    let dataset = Dataset::new(&settings.dataset.path);
    if dataset.path().exists() {
        tracing::info!("Serving dataset from {}", dataset.path().display());
    } else {
        // Not fatal: every sentiment request will report the failure
        tracing::warn!("Dataset {} does not exist yet", dataset.path().display());
    }

    let status_db = Database::new(&settings.status.path).expect("Failed to create status database");
    status_db
        .initialize()
        .expect("Failed to initialize status database schema");
    tracing::info!("Status database ready at {}", settings.status.path);

    let status_store = Arc::new(SqliteStatusStore::new(status_db.pool.clone()));
    let state = AppState::new(dataset, status_store);

    let app = api::router(state, &settings.server.api_prefix)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(settings.cors.origin_list()));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .expect("Failed to parse server address");
    tracing::info!(
        "Starting server on {} (api prefix {})",
        addr,
        settings.server.api_prefix
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shut down");
}

fn cors_layer(origins: Option<Vec<String>>) -> CorsLayer {
    let allow_origin = match origins {
        None => AllowOrigin::from(Any),
        Some(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
