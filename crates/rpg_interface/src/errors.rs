use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum AppError {
    InvalidArgument { msg: String },
    NotFound { msg: String },
    CustomError { msg: String },
    MongoError { msg: String },
    BsonError { msg: String },
    ParseError { msg: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl AppError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        AppError::InvalidArgument { msg: msg.into() }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument { .. } | AppError::ParseError { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidArgument { msg } => write!(f, "Invalid Argument: '{}'", msg),
            AppError::NotFound { msg } => write!(f, "Not Found: '{}'", msg),
            AppError::CustomError { msg } => write!(f, "Custom Error: '{}'", msg),
            AppError::MongoError { msg } => write!(f, "MongoDB Error: '{}'", msg),
            AppError::BsonError { msg } => write!(f, "Bson Serialization Error: '{}'", msg),
            AppError::ParseError { msg } => write!(f, "Parse Error: '{}'", msg),
        }
    }
}

// A body that can't be read as the expected payload is a bad argument like
// any field failing validation.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidArgument {
            msg: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self.to_string();

        (self.status_code(), body).into_response()
    }
}
