use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use estate_recs::config::Settings;
use estate_recs::core::{Recommender, DEFAULT_LIMIT};
use estate_recs::routes::{self, recommendations::{AppState, Limits}};
use estate_recs::services::{CatalogCache, InteractionStore, PropertyApiClient};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    match &settings {
        Ok(s) => init_logging(&s.logging.level, &s.logging.format),
        Err(_) => init_logging("info", "json"),
    }

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io_error(format!("Configuration error: {}", e))
    })?;

    info!("Starting estate-recs recommendation service...");

    // Property backend client
    let property_api = PropertyApiClient::new(
        settings.property_api.base_url.clone(),
        settings.property_api.api_key.clone(),
        settings.property_api.timeout_secs.unwrap_or(30),
    )
    .map_err(|e| {
        error!("Failed to create property API client: {}", e);
        io_error(e.to_string())
    })?;
    let property_api = Arc::new(property_api);

    info!("Property API client initialized ({})", property_api.base_url());

    // Catalog snapshot cache
    let catalog_capacity = settings.catalog.capacity.unwrap_or(256);
    let catalog_ttl = settings.catalog.ttl_secs.unwrap_or(60);
    let catalog = Arc::new(CatalogCache::new(catalog_capacity, catalog_ttl));

    info!("Catalog cache initialized ({} entries, TTL: {}s)", catalog_capacity, catalog_ttl);

    // Interaction store
    let db_max_conn = settings.database.max_connections.unwrap_or(10);
    let db_min_conn = settings.database.min_connections.unwrap_or(1);

    let interactions = InteractionStore::connect(
        &settings.database.url,
        db_max_conn,
        db_min_conn,
        settings.database.acquire_timeout_secs.unwrap_or(5),
        settings.database.idle_timeout_secs.unwrap_or(600),
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        io_error(format!("PostgreSQL connection error: {}", e))
    })?;
    let interactions = Arc::new(interactions);

    info!("Interaction store initialized (max: {} connections)", db_max_conn);

    let weights = settings.scoring_weights();
    let recommender = Recommender::with_weights(weights, settings.scoring.market_avg_price_per_area);

    info!(
        "Recommender initialized with weights: {:?}, market avg price/area: {}",
        weights, settings.scoring.market_avg_price_per_area
    );

    let max_limit = usize::from(settings.matching.max_limit.unwrap_or(100));
    let limits = Limits {
        default_limit: settings
            .matching
            .default_limit
            .map(usize::from)
            .unwrap_or(DEFAULT_LIMIT)
            .min(max_limit),
        max_limit,
    };

    let app_state = AppState {
        property_api,
        catalog,
        interactions,
        recommender,
        limits,
    };

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
