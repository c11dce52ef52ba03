use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::MatchError;
use crate::models::{CreateMatchRequest, HealthResponse, MatchListResponse, SearchMatchesQuery};
use crate::routes::{error_response, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::get().to(search_matches))
        .route("/matches", web::post().to(create_match))
        .route("/matches/{id}", web::delete().to(delete_match));
}

/// Map a lifecycle failure onto an HTTP response
pub(crate) fn match_error_response(err: &MatchError, action: &str) -> HttpResponse {
    match err {
        MatchError::NotFound(what) => {
            error_response(StatusCode::NOT_FOUND, "Not found", format!("{} not found", what))
        }
        MatchError::Persistence(e) => {
            tracing::error!("Failed to {}: {}", action, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to {}", action),
                e,
            )
        }
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List or search matches
///
/// GET /api/v1/matches?q=ann
///
/// Case-insensitive match on either party's "first last" name. A missing or
/// empty `q` lists everything.
async fn search_matches(
    state: web::Data<AppState>,
    query: web::Query<SearchMatchesQuery>,
) -> impl Responder {
    match state.lifecycle.search(&query.q).await {
        Ok(matches) => {
            tracing::debug!("Search {:?} returned {} matches", query.q, matches.len());
            let total_results = matches.len();
            HttpResponse::Ok().json(MatchListResponse {
                matches,
                total_results,
            })
        }
        Err(e) => match_error_response(&e, "list matches"),
    }
}

/// Create a match from an explicit snapshot
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "tutor_id": "string",
///   "tutor_first_name": "string",
///   "tutor_last_name": "string",
///   "learner_id": "string",
///   "learner_first_name": "string",
///   "learner_last_name": "string"
/// }
/// ```
async fn create_match(
    state: web::Data<AppState>,
    req: web::Json<CreateMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_match request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let result = state
        .lifecycle
        .create_match(
            &req.tutor_id,
            &req.tutor_first_name,
            &req.tutor_last_name,
            &req.learner_id,
            &req.learner_first_name,
            &req.learner_last_name,
        )
        .await;

    match result {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => match_error_response(&e, "create match"),
    }
}

/// Remove a match
///
/// DELETE /api/v1/matches/{id}
async fn delete_match(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.lifecycle.delete_match(&id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => match_error_response(&e, "delete match"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StoreError;

    #[test]
    fn test_match_error_status_codes() {
        let not_found = match_error_response(&MatchError::NotFound("match m1".into()), "delete match");
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let failed = match_error_response(
            &MatchError::Persistence(StoreError::Unauthorized("matches: 401".into())),
            "create match",
        );
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
