use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::task::{NewTask, TaskPatch};

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody { pub message: String }

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Task not found")]
    NotFound,
    /// Carries the client-facing message only; the cause is logged where it happens.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), axum::Json(ErrorBody { message: self.to_string() })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::single(rejection.body_text()))
    }
}

/// One or more problems with a request body, rendered as
/// `Validation error: <issue>; <issue>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError { pub issues: Vec<String> }

impl ValidationError {
    pub fn single(issue: impl Into<String>) -> Self { Self { issues: vec![issue.into()] } }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error: {}", self.issues.join("; "))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl CreateTaskBody {
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        let Some(title) = self.title else {
            return Err(ValidationError::single("Required at \"title\""));
        };
        Ok(NewTask {
            title: checked_title(&title)?,
            description: self.description.map(|d| d.trim().to_string()),
            completed: self.completed,
        })
    }
}

impl UpdateTaskBody {
    pub fn validate(self) -> Result<TaskPatch, ValidationError> {
        Ok(TaskPatch {
            title: self.title.as_deref().map(checked_title).transpose()?,
            description: self.description.map(|d| d.trim().to_string()),
            completed: self.completed,
        })
    }
}

fn checked_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::single("String must contain at least 1 character(s) at \"title\""));
    }
    Ok(title.to_string())
}
