use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tower_sessions::session;

use crate::db;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("forbidden")]
    Forbidden,

    #[error("password_hash: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    DB(#[from] db::Error),

    #[error(transparent)]
    Session(#[from] session::Error),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: "forbidden".into(),
                }),
            ),
            err => {
                tracing::error!("{err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Unexpected error".into(),
                    }),
                )
            }
        }
        .into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
