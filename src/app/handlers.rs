use crate::app::response::{
    eligibility_response, RelevantCoursesBody, Status, StudentInfoBody, SuggestionsBody,
    SEARCH_MESSAGE,
};
use crate::app::state::AppState;
use crate::utils::error::{EligibilityError, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");

#[derive(Debug, Deserialize)]
pub struct StudentInfoRequest {
    register_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    register_number: Option<String>,
    course_title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    register_number: Option<String>,
    partial_course_title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    course_title: Option<String>,
}

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn script_handler() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/javascript")], SCRIPT_JS)
}

pub async fn student_info_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<StudentInfoRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(malformed)?;

    let info = run_blocking(state, move |s| {
        s.service.student_info(request.register_number.as_deref())
    })
    .await?;

    Ok((StatusCode::OK, Json(StudentInfoBody::from(info))).into_response())
}

pub async fn check_eligibility_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<EligibilityRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(malformed)?;

    let outcome = run_blocking(state, move |s| {
        s.service.check_eligibility(
            request.register_number.as_deref(),
            request.course_title.as_deref(),
        )
    })
    .await?;

    Ok(eligibility_response(outcome))
}

pub async fn course_suggestions_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SuggestionsRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(malformed)?;

    let suggestions = run_blocking(state, move |s| {
        s.service.course_suggestions(
            request.register_number.as_deref(),
            request.partial_course_title.as_deref(),
        )
    })
    .await?;

    Ok((
        StatusCode::OK,
        Json(SuggestionsBody {
            suggestions,
            status: Status::Success,
        }),
    )
        .into_response())
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(malformed)?;

    let relevant_courses =
        run_blocking(state, move |s| s.service.search(request.course_title.as_deref())).await?;

    Ok((
        StatusCode::OK,
        Json(RelevantCoursesBody {
            message: SEARCH_MESSAGE.to_string(),
            status: Status::Success,
            relevant_courses,
        }),
    )
        .into_response())
}

fn malformed(rejection: JsonRejection) -> EligibilityError {
    EligibilityError::MalformedPayload {
        message: rejection.body_text(),
    }
}

/// Service calls may re-read the workbook, so they run off the async workers.
async fn run_blocking<T, F>(state: Arc<AppState>, f: F) -> Result<T>
where
    F: FnOnce(&AppState) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| EligibilityError::internal(e.to_string()))?
}
