use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicantId, CallerIdentity, JobId, QuestionId};
use super::questions::NewQuestion;
use super::report::{ApplicantFilter, DepartmentFilter, EvaluationTab, JobFilter, JobStatusFilter};
use super::repository::{ApplicantDirectory, OutcomeRepository, QuestionRepository};
use super::scoring::EvaluationSubmission;
use super::service::{EvaluationService, EvaluationServiceError};

pub const CALLER_ID_HEADER: &str = "x-user-id";
pub const CALLER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JobQuery {
    #[serde(default)]
    search: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuestionQuery {
    #[serde(default)]
    job_id: Option<JobId>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplicantQuery {
    #[serde(default)]
    search: String,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    tab: EvaluationTab,
}

impl ApplicantQuery {
    fn into_filter(self) -> ApplicantFilter {
        ApplicantFilter {
            search: self.search,
            department: self
                .department
                .as_deref()
                .map(DepartmentFilter::parse)
                .unwrap_or_default(),
            tab: self.tab,
        }
    }
}

/// Router builder exposing question authoring, submission, and dashboard endpoints.
pub fn evaluation_router<Q, O, D>(service: Arc<EvaluationService<Q, O, D>>) -> Router
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    Router::new()
        .route("/api/v1/evaluation/jobs", get(jobs_handler::<Q, O, D>))
        .route(
            "/api/v1/evaluation/questions",
            get(list_questions_handler::<Q, O, D>).post(create_question_handler::<Q, O, D>),
        )
        .route(
            "/api/v1/evaluation/questions/:question_id",
            delete(deactivate_question_handler::<Q, O, D>),
        )
        .route("/api/v1/evaluation/applicants", get(applicants_handler::<Q, O, D>))
        .route(
            "/api/v1/evaluation/applicants/departments",
            get(departments_handler::<Q, O, D>),
        )
        .route("/api/v1/evaluation/submissions", post(submit_handler::<Q, O, D>))
        .route(
            "/api/v1/evaluation/submissions/:applicant_id",
            delete(retract_handler::<Q, O, D>),
        )
        .with_state(service)
}

pub(crate) async fn jobs_handler<Q, O, D>(
    State(service): State<Arc<EvaluationService<Q, O, D>>>,
    Query(query): Query<JobQuery>,
) -> Response
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    let criteria = JobFilter {
        search: query.search,
        status: query
            .status
            .as_deref()
            .map(JobStatusFilter::parse)
            .unwrap_or_default(),
    };

    match service.job_board(&criteria) {
        Ok(board) => (StatusCode::OK, Json(board)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn list_questions_handler<Q, O, D>(
    State(service): State<Arc<EvaluationService<Q, O, D>>>,
    Query(query): Query<QuestionQuery>,
) -> Response
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    match service.active_questions(query.job_id.as_ref()) {
        Ok(questions) => (StatusCode::OK, Json(json!({ "questions": questions }))).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn create_question_handler<Q, O, D>(
    State(service): State<Arc<EvaluationService<Q, O, D>>>,
    headers: HeaderMap,
    Json(request): Json<NewQuestion>,
) -> Response
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    let caller = caller_identity(&headers);
    match service.create_question(request, caller.as_ref()) {
        Ok(question) => (StatusCode::CREATED, Json(question)).into_response(),
        Err(
            error @ (EvaluationServiceError::Validation(_)
            | EvaluationServiceError::NotFound { .. }),
        ) => error_response(StatusCode::BAD_REQUEST, &error),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn deactivate_question_handler<Q, O, D>(
    State(service): State<Arc<EvaluationService<Q, O, D>>>,
    Path(question_id): Path<String>,
) -> Response
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    match service.deactivate_question(&QuestionId(question_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error @ EvaluationServiceError::NotFound { .. }) => {
            error_response(StatusCode::NOT_FOUND, &error)
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn applicants_handler<Q, O, D>(
    State(service): State<Arc<EvaluationService<Q, O, D>>>,
    Query(query): Query<ApplicantQuery>,
) -> Response
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    match service.applicant_overview(&query.into_filter()) {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn departments_handler<Q, O, D>(
    State(service): State<Arc<EvaluationService<Q, O, D>>>,
    Query(query): Query<ApplicantQuery>,
) -> Response
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    match service.department_groups(&query.into_filter()) {
        Ok(groups) => (StatusCode::OK, Json(json!({ "groups": groups }))).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn submit_handler<Q, O, D>(
    State(service): State<Arc<EvaluationService<Q, O, D>>>,
    Json(submission): Json<EvaluationSubmission>,
) -> Response
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    match service.submit_evaluation(submission) {
        Ok(outcome) => (StatusCode::CREATED, Json(outcome)).into_response(),
        Err(error @ EvaluationServiceError::Conflict) => {
            error_response(StatusCode::CONFLICT, &error)
        }
        Err(
            error @ (EvaluationServiceError::NotFound { .. }
            | EvaluationServiceError::ApplicantJobMismatch { .. }),
        ) => error_response(StatusCode::BAD_REQUEST, &error),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn retract_handler<Q, O, D>(
    State(service): State<Arc<EvaluationService<Q, O, D>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    Q: QuestionRepository + 'static,
    O: OutcomeRepository + 'static,
    D: ApplicantDirectory + 'static,
{
    match service.retract_evaluation(&ApplicantId(applicant_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error @ EvaluationServiceError::NotFound { .. }) => {
            error_response(StatusCode::NOT_FOUND, &error)
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) fn caller_identity(headers: &HeaderMap) -> Option<CallerIdentity> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    header(CALLER_ID_HEADER).map(|user_id| CallerIdentity {
        user_id,
        role: header(CALLER_ROLE_HEADER),
    })
}

fn error_response(status: StatusCode, error: &EvaluationServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

fn internal_error(error: EvaluationServiceError) -> Response {
    tracing::error!(%error, "evaluation request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &error)
}
