use crate::core::eligibility::Eligibility;
use crate::core::register::StudentYear;
use crate::core::service::StudentInfo;
use crate::utils::error::{EligibilityError, ErrorCategory};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const ELIGIBLE_MESSAGE: &str = "Course is eligible";
pub const NOT_ELIGIBLE_MESSAGE: &str = "ELIGIBILITY STATUS: Not Eligible (Professional Core - PC)";
pub const SUGGESTIONS_MESSAGE: &str = "Here are some relevant courses";
pub const NOT_FOUND_MESSAGE: &str = "Course not found in online courses";
pub const SEARCH_MESSAGE: &str = "Relevant courses found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
    Error,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
    pub status: Status,
}

impl MessageBody {
    pub fn new(message: impl Into<String>, status: Status) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StudentInfoBody {
    pub department: String,
    pub student_year: Option<StudentYear>,
    pub regulation: String,
    pub status: Status,
}

impl From<StudentInfo> for StudentInfoBody {
    fn from(info: StudentInfo) -> Self {
        Self {
            department: info.department,
            student_year: info.student_year,
            regulation: info.regulation.column_label(),
            status: Status::Success,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RelevantCoursesBody {
    pub message: String,
    pub status: Status,
    pub relevant_courses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsBody {
    pub suggestions: Vec<String>,
    pub status: Status,
}

pub fn eligibility_response(outcome: Eligibility) -> Response {
    match outcome {
        Eligibility::Eligible => (
            StatusCode::OK,
            Json(MessageBody::new(ELIGIBLE_MESSAGE, Status::Success)),
        )
            .into_response(),
        Eligibility::NotEligible => (
            StatusCode::OK,
            Json(MessageBody::new(NOT_ELIGIBLE_MESSAGE, Status::Failure)),
        )
            .into_response(),
        Eligibility::Suggestions(relevant_courses) => (
            StatusCode::OK,
            Json(RelevantCoursesBody {
                message: SUGGESTIONS_MESSAGE.to_string(),
                status: Status::Success,
                relevant_courses,
            }),
        )
            .into_response(),
        Eligibility::NotFound => (
            StatusCode::NOT_FOUND,
            Json(MessageBody::new(NOT_FOUND_MESSAGE, Status::Failure)),
        )
            .into_response(),
    }
}

impl IntoResponse for EligibilityError {
    fn into_response(self) -> Response {
        let (status, body_status) = match self.category() {
            ErrorCategory::Validation | ErrorCategory::Lookup => {
                (StatusCode::BAD_REQUEST, Status::Failure)
            }
            ErrorCategory::NotFound => (StatusCode::NOT_FOUND, Status::Failure),
            ErrorCategory::DataSource => (StatusCode::SERVICE_UNAVAILABLE, Status::Error),
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, Status::Error)
            }
        };

        match self.category() {
            ErrorCategory::DataSource => tracing::warn!("Course data unavailable: {}", self),
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!("Request failed: {:?}", self)
            }
            _ => tracing::debug!("Request rejected: {}", self),
        }

        (
            status,
            Json(MessageBody::new(self.user_friendly_message(), body_status)),
        )
            .into_response()
    }
}
