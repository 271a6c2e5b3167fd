use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::evaluation::domain::{AnswerSheet, ApplicantId, JobId};
use crate::workflows::evaluation::repository::OutcomeRepository;
use crate::workflows::evaluation::router::{self, evaluation_router};
use crate::workflows::evaluation::scoring::EvaluationSubmission;

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn question_payload(job_id: &str, correct: &str) -> Value {
    json!({
        "job_id": job_id,
        "question": "Which option?",
        "options": ["A", "", "B", "C"],
        "correct_answer": correct,
    })
}

#[tokio::test]
async fn create_question_returns_created_with_cleaned_options() {
    let (service, _, _) = build_service();
    let app = evaluation_router(Arc::new(service));

    let mut request = json_request(
        "POST",
        "/api/v1/evaluation/questions",
        question_payload("job-eng", "B"),
    );
    request
        .headers_mut()
        .insert(router::CALLER_ID_HEADER, "recruiter-1".parse().expect("header"));

    let response = app.oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["options"], json!(["A", "B", "C"]));
    assert_eq!(body["correct_answer"], "B");
    assert_eq!(body["active"], true);
    assert_eq!(body["created_by"], "recruiter-1");
}

#[tokio::test]
async fn create_question_rejects_invalid_input_with_bad_request() {
    let (service, _, _) = build_service();
    let app = evaluation_router(Arc::new(service));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/questions",
            question_payload("job-eng", "Z"),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "correct answer must match an option");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/questions",
            question_payload("job-missing", "B"),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_body_fields_are_bad_requests_not_unprocessable() {
    let (service, questions, outcomes) = build_service();
    let app = evaluation_router(Arc::new(service));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/questions",
            json!({ "job_id": "job-eng", "options": ["A", "B"], "correct_answer": "A" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "question required");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/questions",
            json!({ "question": "Which?", "options": ["A", "B"], "correct_answer": "A" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/submissions",
            json!({ "applicant_id": "app-ann", "answers": {} }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/submissions",
            json!({ "job_id": "job-eng" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(questions.snapshot().is_empty());
    assert!(outcomes.all().expect("outcomes list").is_empty());
}

#[tokio::test]
async fn blank_department_query_lists_everyone() {
    let (service, _, _) = build_service();
    let app = evaluation_router(Arc::new(service));

    let response = app
        .oneshot(empty_request("GET", "/api/v1/evaluation/applicants?department="))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["applicants"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn list_questions_filters_by_job() {
    let (service, _, _) = build_service();
    seed_engineering_questions(&service);
    service
        .create_question(new_question("job-ops", "Q", &["a", "b"], "a"), None)
        .expect("ops question");
    let app = evaluation_router(Arc::new(service));

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/v1/evaluation/questions?job_id=job-eng",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["questions"].as_array().map(Vec::len), Some(2));

    let response = app
        .oneshot(empty_request("GET", "/api/v1/evaluation/questions"))
        .await
        .expect("route executes");
    let body = read_json_body(response).await;
    assert_eq!(body["questions"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn deactivate_question_is_no_content_and_repeatable() {
    let (service, _, _) = build_service();
    let seeded = seed_engineering_questions(&service);
    let app = evaluation_router(Arc::new(service));
    let uri = format!("/api/v1/evaluation/questions/{}", seeded[0].id);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .oneshot(empty_request(
            "DELETE",
            "/api/v1/evaluation/questions/q-missing",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submissions_return_created_then_conflict() {
    let (service, _, _) = build_service();
    let seeded = seed_engineering_questions(&service);
    let app = evaluation_router(Arc::new(service));

    let mut answers = serde_json::Map::new();
    answers.insert(seeded[0].id.to_string(), json!("4"));
    let payload = json!({
        "job_id": "job-eng",
        "applicant_id": "app-ann",
        "answers": answers,
    });

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/submissions",
            payload.clone(),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["score"], 1);
    assert_eq!(body["total"], 2);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/submissions",
            payload,
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "evaluation already submitted");
}

#[tokio::test]
async fn submit_handler_returns_bad_request_for_unresolved_references() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);

    for (job, applicant) in [
        ("job-missing", "app-ann"),
        ("job-eng", "app-ghost"),
        ("job-eng", "app-cy"),
    ] {
        let response = router::submit_handler(
            State(service.clone()),
            axum::Json(EvaluationSubmission {
                job_id: JobId::from(job),
                applicant_id: ApplicantId::from(applicant),
                answers: AnswerSheet::new(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{job}/{applicant}");
    }
}

#[tokio::test]
async fn retract_submission_round_trip() {
    let (service, _, _) = build_service();
    service
        .submit_evaluation(EvaluationSubmission {
            job_id: JobId::from("job-ops"),
            applicant_id: ApplicantId::from("app-cy"),
            answers: AnswerSheet::new(),
        })
        .expect("submission accepted");
    let app = evaluation_router(Arc::new(service));

    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            "/api/v1/evaluation/submissions/app-cy",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(empty_request(
            "DELETE",
            "/api/v1/evaluation/submissions/app-cy",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn applicants_route_returns_list_stats_and_departments() {
    let (service, _, _) = build_service();
    service
        .submit_evaluation(EvaluationSubmission {
            job_id: JobId::from("job-ops"),
            applicant_id: ApplicantId::from("app-cy"),
            answers: AnswerSheet::new(),
        })
        .expect("submission accepted");
    let app = evaluation_router(Arc::new(service));

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/v1/evaluation/applicants?tab=pending&department=Engineering&search=ann",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["stats"],
        json!({ "total": 4, "pending_evaluation": 3, "completed_evaluation": 1 })
    );
    assert_eq!(body["departments"], json!(["Engineering", "Finance"]));
    let applicants = body["applicants"].as_array().expect("applicants array");
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0]["full_name"], "Ann Reyes");
    assert_eq!(applicants[0]["evaluation"]["state"], "pending");

    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/v1/evaluation/applicants/departments?tab=completed",
        ))
        .await
        .expect("route executes");
    let body = read_json_body(response).await;
    assert_eq!(body["groups"][0]["department"], "Finance");
    assert_eq!(body["groups"][0]["applicants"][0]["tier"], "low");
}

#[tokio::test]
async fn jobs_route_returns_board() {
    let (service, _, _) = build_service();
    let app = evaluation_router(Arc::new(service));

    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/v1/evaluation/jobs?search=engineer&status=Active",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["jobs"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["jobs"][0]["applicants"], 2);
    assert_eq!(body["stats"]["total_jobs"], 3);
    assert_eq!(body["stats"]["pending_evaluations"], 4);
}

#[tokio::test]
async fn storage_failures_map_to_internal_error() {
    let app = evaluation_router(Arc::new(unavailable_service()));

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/v1/evaluation/questions"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluation/submissions",
            json!({ "job_id": "job-ops", "applicant_id": "app-cy", "answers": {} }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
