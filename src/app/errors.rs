use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tower_sessions::session;

use crate::{auth, db};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("forbidden")]
    Forbidden,
    #[error("not_found")]
    NotFound(String),
    #[error("validation")]
    Validation(String),
    #[error("conflict")]
    Conflict(String),
    #[error(transparent)]
    DB(db::Error),
    #[error(transparent)]
    Auth(auth::Error),
    #[error(transparent)]
    Session(#[from] session::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<db::Error> for Error {
    fn from(error: db::Error) -> Self {
        match error {
            db::Error::NotFound(msg) => Self::NotFound(msg),
            db::Error::Conflict(msg) => Self::Conflict(msg),
            error => Self::DB(error),
        }
    }
}

impl From<auth::Error> for Error {
    fn from(error: auth::Error) -> Self {
        match error {
            auth::Error::Forbidden => Self::Forbidden,
            error => Self::Auth(error),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ErrorResponse {
    Forbidden { message: String },
    NotFound { message: String },
    BadRequest { message: String },
    Conflict { message: String },
    Unexpected { message: String },
}

impl From<Error> for ErrorResponse {
    fn from(error: Error) -> Self {
        match error {
            Error::Forbidden => Self::Forbidden {
                message: "Forbidden".into(),
            },
            Error::NotFound(message) => Self::NotFound { message },
            Error::Validation(message) => Self::BadRequest { message },
            Error::Conflict(message) => Self::Conflict { message },
            error => {
                tracing::error!("{:?}", error);
                Self::Unexpected {
                    message: "Unexpected error".into(),
                }
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let mut res = Json(ErrorResponse::from(self)).into_response();
        *res.status_mut() = status;
        res
    }
}
