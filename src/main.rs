use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crossprice::config::Config;
use crossprice::modules::fees::InMemoryFeeScheduleRepository;
use crossprice::modules::pricing::controllers::configure_pricing_routes;
use crossprice::modules::records::controllers::configure_record_routes;
use crossprice::modules::records::{InMemoryRecordStore, MySqlRecordRepository, RecordStore};
use crossprice::modules::tariffs::InMemoryTariffRepository;
use crossprice::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crossprice=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting crossprice pricing engine");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Record store: MySQL when configured, in-memory otherwise
    let records: Arc<dyn RecordStore> = if config.database.url.is_some() {
        let db_pool = config
            .database
            .create_pool()
            .await
            .expect("Failed to create database pool");

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .expect("Failed to run database migrations");

        tracing::info!(
            "Database pool initialized ({} connections)",
            config.database.pool_size
        );
        Arc::new(MySqlRecordRepository::new(db_pool))
    } else {
        tracing::info!("DATABASE_URL not set, records kept in memory only");
        Arc::new(InMemoryRecordStore::new())
    };

    let state = web::Data::new(AppState {
        fee_schedules: Arc::new(
            InMemoryFeeScheduleRepository::seeded().expect("Seeded fee schedules are valid"),
        ),
        tariff_rules: Arc::new(InMemoryTariffRepository::seeded()),
        records,
        pricing: config.pricing.clone(),
    });

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
            .service(
                web::scope("/api/v1")
                    .configure(configure_pricing_routes)
                    .configure(configure_record_routes),
            )
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "crossprice"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "crossprice pricing engine",
        "version": "0.1.0",
        "status": "running"
    }))
}
