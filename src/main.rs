use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;
use tutor_match::config::{RecordsBackend, RecordsSettings, Settings};
use tutor_match::models::ErrorResponse;
use tutor_match::routes::{self, AppState};
use tutor_match::services::{InMemoryStore, RecordCollections, RecordStore, RecordsClient, SeedData, StoreError};

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let body = ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    };
    error::InternalError::from_response(err, HttpResponse::build(StatusCode::BAD_REQUEST).json(body)).into()
}

/// Handle query payload errors
fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let body = ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    };
    error::InternalError::from_response(err, HttpResponse::build(StatusCode::BAD_REQUEST).json(body)).into()
}

fn build_store(settings: &RecordsSettings) -> Result<Arc<dyn RecordStore>, StoreError> {
    match settings.backend {
        RecordsBackend::Memory => {
            let seed = match &settings.seed_path {
                Some(path) => SeedData::from_file(path)?,
                None => SeedData::default(),
            };
            info!(
                "Using in-memory records ({} tutors, {} learners, {} matches)",
                seed.tutors.len(),
                seed.learners.len(),
                seed.matches.len()
            );
            Ok(Arc::new(InMemoryStore::with_records(seed)))
        }
        RecordsBackend::Http => {
            let endpoint = settings
                .endpoint
                .clone()
                .ok_or_else(|| StoreError::ApiError("records.endpoint is required for the http backend".into()))?;
            let collections = RecordCollections {
                tutors: settings.collections.tutors.clone(),
                learners: settings.collections.learners.clone(),
                matches: settings.collections.matches.clone(),
            };
            let timeout = Duration::from_secs(settings.timeout_secs.unwrap_or(30));

            info!("Using records backend at {}", endpoint);
            Ok(Arc::new(RecordsClient::new(
                endpoint,
                settings.api_key.clone().unwrap_or_default(),
                collections,
                timeout,
            )?))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load errors are reported after the subscriber is up
    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(logging.level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(logging.format);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting tutor match service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let store = build_store(&settings.records).map_err(|e| {
        error!("Failed to initialize records backend: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let app_state = AppState::new(store);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
