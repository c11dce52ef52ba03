// Route exports
pub mod directory;
pub mod matches;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::core::MatchLifecycle;
use crate::models::ErrorResponse;
use crate::services::RecordStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: MatchLifecycle,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            lifecycle: MatchLifecycle::new(store),
        }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.lifecycle.store().as_ref()
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(directory::configure),
    );
}

/// JSON error body with a matching status line
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}
