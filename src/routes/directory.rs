use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;

use crate::core::{
    all_candidates, eligible_learners_for_tutor, eligible_tutors_for_learner, register_learner,
    register_tutor, schedule, selectable_candidates, IntakeError,
};
use crate::models::{
    EligibleLearnersResponse, EligibleTutorsResponse, FormErrorResponse, LearnerListing, Loaded,
    NewLearner, NewTutor, SelectCounterpartRequest, TutorListing,
};
use crate::routes::matches::match_error_response;
use crate::routes::{error_response, AppState};
use crate::services::StoreError;

/// Configure eligibility and intake routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/tutors", web::post().to(create_tutor))
        .route("/learners", web::post().to(create_learner))
        .route("/learners/{id}/eligible-tutors", web::get().to(eligible_tutors))
        .route("/tutors/{id}/eligible-learners", web::get().to(eligible_learners))
        .route("/learners/{id}/match", web::post().to(match_learner))
        .route("/tutors/{id}/match", web::post().to(match_tutor));
}

/// Candidate listing options
#[derive(Debug, Default, Deserialize)]
pub struct CandidatesQuery {
    /// Limit the manual picker to people still available
    #[serde(default, alias = "availableOnly")]
    pub available_only: bool,
}

fn store_error_response(err: &StoreError, what: &str) -> HttpResponse {
    if err.is_not_found() {
        return error_response(StatusCode::NOT_FOUND, "Not found", format!("{} not found", what));
    }

    tracing::error!("Failed to fetch {}: {}", what, err);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!("Failed to fetch {}", what),
        err,
    )
}

fn intake_error_response(err: IntakeError, what: &str) -> HttpResponse {
    match err {
        IntakeError::Invalid(errors) => {
            tracing::info!("Rejected {} form: {}", what, errors);
            HttpResponse::BadRequest().json(FormErrorResponse {
                error: "Validation failed".to_string(),
                fields: errors.fields().clone(),
                status_code: 400,
            })
        }
        IntakeError::Persistence(e) => {
            tracing::error!("Failed to create {}: {}", what, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to create {}", what),
                e,
            )
        }
    }
}

/// Register a tutor
///
/// POST /api/v1/tutors
async fn create_tutor(state: web::Data<AppState>, form: web::Json<NewTutor>) -> impl Responder {
    match register_tutor(state.store(), form.into_inner()).await {
        Ok(tutor) => HttpResponse::Created().json(tutor),
        Err(e) => intake_error_response(e, "tutor"),
    }
}

/// Register a learner
///
/// POST /api/v1/learners
async fn create_learner(state: web::Data<AppState>, form: web::Json<NewLearner>) -> impl Responder {
    match register_learner(state.store(), form.into_inner()).await {
        Ok(learner) => HttpResponse::Created().json(learner),
        Err(e) => intake_error_response(e, "learner"),
    }
}

/// Tutors compatible with a learner
///
/// GET /api/v1/learners/{id}/eligible-tutors?available_only=false
///
/// `eligible` holds available tutors teaching the learner's level, each with
/// the days they can meet. `candidates` is the unfiltered picker list.
async fn eligible_tutors(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<CandidatesQuery>,
) -> impl Responder {
    let learner_id = path.into_inner();
    let store = state.store();

    let (learner, tutors) = tokio::join!(store.fetch_learner_by_id(&learner_id), store.fetch_tutors());

    let learner = match learner {
        Ok(learner) => learner,
        Err(e) => return store_error_response(&e, &format!("learner {}", learner_id)),
    };
    let tutors = match tutors {
        Ok(tutors) => tutors,
        Err(e) => return store_error_response(&e, "tutors"),
    };

    let target = Loaded::Loaded(learner.clone());
    let eligible: Vec<TutorListing> = eligible_tutors_for_learner(&target, &tutors)
        .into_iter()
        .map(|tutor| TutorListing {
            schedule: schedule(&tutor.availability),
            tutor: tutor.clone(),
        })
        .collect();

    let candidates = if query.available_only {
        selectable_candidates(&tutors)
    } else {
        all_candidates(&tutors)
    };

    tracing::info!(
        "Learner {}: {} eligible of {} tutors",
        learner_id,
        eligible.len(),
        tutors.len()
    );

    HttpResponse::Ok().json(EligibleTutorsResponse {
        learner,
        eligible,
        candidates,
    })
}

/// Learners compatible with a tutor
///
/// GET /api/v1/tutors/{id}/eligible-learners?available_only=false
async fn eligible_learners(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<CandidatesQuery>,
) -> impl Responder {
    let tutor_id = path.into_inner();
    let store = state.store();

    let (tutor, learners) = tokio::join!(store.fetch_tutor_by_id(&tutor_id), store.fetch_learners());

    let tutor = match tutor {
        Ok(tutor) => tutor,
        Err(e) => return store_error_response(&e, &format!("tutor {}", tutor_id)),
    };
    let learners = match learners {
        Ok(learners) => learners,
        Err(e) => return store_error_response(&e, "learners"),
    };

    let target = Loaded::Loaded(tutor.clone());
    let eligible: Vec<LearnerListing> = eligible_learners_for_tutor(&target, &learners)
        .into_iter()
        .map(|learner| LearnerListing {
            schedule: schedule(&learner.availability),
            learner: learner.clone(),
        })
        .collect();

    let candidates = if query.available_only {
        selectable_candidates(&learners)
    } else {
        all_candidates(&learners)
    };

    tracing::info!(
        "Tutor {}: {} eligible of {} learners",
        tutor_id,
        eligible.len(),
        learners.len()
    );

    HttpResponse::Ok().json(EligibleLearnersResponse {
        tutor,
        eligible,
        candidates,
    })
}

/// Match a learner with a chosen tutor
///
/// POST /api/v1/learners/{id}/match
///
/// Request body: `{"counterpart_id": "tutor id"}`
async fn match_learner(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SelectCounterpartRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let learner_id = path.into_inner();
    let store = state.store();

    let (learner, tutors) = tokio::join!(store.fetch_learner_by_id(&learner_id), store.fetch_tutors());

    let learner = match learner {
        Ok(learner) => learner,
        Err(e) => return store_error_response(&e, &format!("learner {}", learner_id)),
    };
    let tutors = match tutors {
        Ok(tutors) => tutors,
        Err(e) => return store_error_response(&e, "tutors"),
    };

    match state
        .lifecycle
        .match_learner_with(&learner, &req.counterpart_id, &tutors)
        .await
    {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => match_error_response(&e, "create match"),
    }
}

/// Match a tutor with a chosen learner
///
/// POST /api/v1/tutors/{id}/match
async fn match_tutor(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SelectCounterpartRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let tutor_id = path.into_inner();
    let store = state.store();

    let (tutor, learners) = tokio::join!(store.fetch_tutor_by_id(&tutor_id), store.fetch_learners());

    let tutor = match tutor {
        Ok(tutor) => tutor,
        Err(e) => return store_error_response(&e, &format!("tutor {}", tutor_id)),
    };
    let learners = match learners {
        Ok(learners) => learners,
        Err(e) => return store_error_response(&e, "learners"),
    };

    match state
        .lifecycle
        .match_tutor_with(&tutor, &req.counterpart_id, &learners)
        .await
    {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => match_error_response(&e, "create match"),
    }
}
