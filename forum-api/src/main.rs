mod routes;
mod session;
mod views;

use forum_app::infrastructure::db::{create_connection, run_migrations};
use forum_app::infrastructure::localization::Localizer;
use forum_app::{AppContext, Config};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let localizer = match &config.locale_file {
        Some(path) => match Localizer::from_file(path) {
            Ok(localizer) => {
                tracing::info!("Loaded resource strings from {}", path.display());
                localizer
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Localizer::english(),
    };

    let db = match create_connection(&config.database_url, config.max_connections).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to the database: {}", e);
            std::process::exit(1);
        }
    };

    if config.run_migrations {
        if let Err(e) = run_migrations(&db).await {
            tracing::error!("Failed to run migrations: {}", e);
            std::process::exit(1);
        }
    }

    let app_context = AppContext::new(db, localizer);

    let app = routes::router(app_context)
        .layer(session::layer(config.secure_cookies))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    tracing::info!("Listening on http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
