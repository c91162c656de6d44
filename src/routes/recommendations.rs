use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{BehaviorLookup, NeutralTrend, NoBehavior, Recommender};
use crate::models::{
    CatalogQuery, ErrorResponse, HealthResponse, InteractionKind, InteractionsResponse,
    RecommendRequest, RecommendResponse, RecordInteractionRequest, RecordInteractionResponse,
    ScorePropertyRequest,
};
use crate::services::{CatalogCache, InteractionStore, PropertyApiClient, PropertyApiError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub property_api: Arc<PropertyApiClient>,
    pub catalog: Arc<CatalogCache>,
    pub interactions: Arc<InteractionStore>,
    pub recommender: Recommender,
    pub limits: Limits,
}

/// Recommendation count limits
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Limits {
    /// Resolve a requested limit against the defaults and the cap
    pub fn resolve(&self, requested: Option<u16>) -> usize {
        requested
            .map(usize::from)
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/recommendations/score", web::post().to(score_property))
        .route("/interactions", web::post().to(record_interaction))
        .route("/interactions", web::get().to(list_interactions));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn property_api_error(context: &str, err: &PropertyApiError) -> HttpResponse {
    use actix_web::http::StatusCode;

    let status = match err {
        PropertyApiError::NotFound(_) => StatusCode::NOT_FOUND,
        PropertyApiError::Unauthorized
        | PropertyApiError::Request(_)
        | PropertyApiError::Api(_)
        | PropertyApiError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
    };
    error_response(status, context, err.to_string())
}

/// Interaction snapshot for the user, or no behavior when unavailable
async fn load_behavior(state: &AppState, user_id: Option<&str>) -> Box<dyn BehaviorLookup> {
    let Some(user_id) = user_id else {
        return Box::new(NoBehavior);
    };

    match state.interactions.user_behavior(user_id).await {
        Ok(behavior) => {
            tracing::debug!("Loaded {} interacted properties for {}", behavior.len(), user_id);
            Box::new(behavior)
        }
        Err(e) => {
            tracing::warn!("Failed to load behavior for {}, scoring without it: {}", user_id, e);
            Box::new(NoBehavior)
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.interactions.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "criteria": { "minPrice": 50000, "maxPrice": 100000, "locations": ["Lagos"] },
///   "limit": 12,
///   "excludePropertyIds": ["string"]
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let limit = state.limits.resolve(req.limit);
    let user_id = req.user_id.as_deref();

    tracing::info!("Recommending for user: {:?}, limit: {}", user_id, limit);

    let query = CatalogQuery::default();
    let api = state.property_api.clone();
    let fetch_query = query.clone();
    let catalog = match state
        .catalog
        .get_or_fetch(&query, || async move { api.list_properties(&fetch_query).await })
        .await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to fetch property catalog: {}", e);
            return property_api_error("Failed to fetch properties", &e);
        }
    };

    let behavior = load_behavior(&state, user_id).await;

    let result = state.recommender.recommend(
        &req.criteria,
        catalog.as_ref().clone(),
        behavior.as_ref(),
        &NeutralTrend,
        limit,
        &req.exclude_property_ids,
    );

    tracing::info!(
        "Returning {} recommendations (from {} candidates)",
        result.recommendations.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(RecommendResponse {
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
    })
}

/// Score a single property
///
/// POST /api/v1/recommendations/score
async fn score_property(
    state: web::Data<AppState>,
    req: web::Json<ScorePropertyRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let property = match state.property_api.get_property(&req.property_id).await {
        Ok(property) => property,
        Err(e) => {
            tracing::warn!("Failed to fetch property {}: {}", req.property_id, e);
            return property_api_error("Failed to fetch property", &e);
        }
    };

    let behavior = load_behavior(&state, req.user_id.as_deref()).await;
    let score = state
        .recommender
        .scorer()
        .score(&property, &req.criteria, behavior.as_ref(), &NeutralTrend);

    HttpResponse::Ok().json(score)
}

/// Record interaction endpoint
///
/// POST /api/v1/interactions
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "propertyId": "string",
///   "kind": "viewed|favorited|contacted"
/// }
/// ```
async fn record_interaction(
    state: web::Data<AppState>,
    req: web::Json<RecordInteractionRequest>,
) -> impl Responder {
    use actix_web::http::StatusCode;

    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let kind: InteractionKind = match req.kind.parse() {
        Ok(kind) => kind,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid interaction kind",
                "Interaction kind must be one of: viewed, favorited, contacted".to_string(),
            );
        }
    };

    match state
        .interactions
        .record(&req.user_id, &req.property_id, kind)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(RecordInteractionResponse {
            success: true,
            interaction_id: uuid::Uuid::new_v4().to_string(),
        }),
        Err(e) => {
            tracing::error!("Failed to record interaction: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to record interaction",
                e.to_string(),
            )
        }
    }
}

/// List a user's interactions
///
/// GET /api/v1/interactions?userId={userId}
async fn list_interactions(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    use actix_web::http::StatusCode;

    let user_id = match query.get("userId").filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing userId parameter",
                "userId query parameter is required".to_string(),
            );
        }
    };

    match state.interactions.interactions(user_id).await {
        Ok(interactions) => HttpResponse::Ok().json(InteractionsResponse {
            user_id: user_id.clone(),
            count: interactions.len(),
            interactions,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch interactions for {}: {}", user_id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch interactions",
                e.to_string(),
            )
        }
    }
}
