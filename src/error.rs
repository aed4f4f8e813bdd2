use std::convert::Infallible;

use serde_json::json;
use warp::{
    filters::cors::CorsForbidden,
    http::StatusCode,
    reject::{LengthRequired, PayloadTooLarge, Reject},
    reply::{Json, WithStatus},
    Rejection, Reply,
};

use crate::{store::StoreError, types::quiz::QuizId, validation::ValidationError};

#[derive(Debug)]
pub enum Error {
    QuizNotFound(QuizId),
    Validation(ValidationError),
    MalformedQuiz {
        id: QuizId,
        source: serde_json::Error,
    },
    SaveFailed(StoreError),
    Storage(StoreError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::QuizNotFound(_) => write!(f, "test not found"),
            Error::Validation(ref err) => write!(f, "{}", err),
            Error::MalformedQuiz { ref source, .. } => write!(f, "test is malformed: {}", source),
            Error::SaveFailed(ref err) => write!(f, "Failed to save: {}", err),
            Error::Storage(ref err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl Reject for Error {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Error::QuizNotFound(id),
            StoreError::Malformed { id, source } => Error::MalformedQuiz { id, source },
            err => Error::Storage(err),
        }
    }
}

fn json_error(body: serde_json::Value, status: StatusCode) -> WithStatus<Json> {
    warp::reply::with_status(warp::reply::json(&body), status)
}

pub async fn return_error(r: Rejection) -> Result<impl Reply, Infallible> {
    if let Some(error) = r.find::<Error>() {
        let reply = match error {
            Error::QuizNotFound(id) => json_error(
                json!({ "error": error.to_string(), "id": id }),
                StatusCode::NOT_FOUND,
            ),
            Error::Validation(_) => {
                log::debug!("rejected quiz: {}", error);
                json_error(json!({ "error": error.to_string() }), StatusCode::BAD_REQUEST)
            }
            Error::MalformedQuiz { id, .. } => {
                log::warn!("quiz {}: {}", id, error);
                json_error(
                    json!({ "error": error.to_string(), "id": id }),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
            Error::SaveFailed(_) | Error::Storage(_) => {
                log::error!("{}", error);
                json_error(
                    json!({ "error": error.to_string() }),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        };
        Ok(reply)
    } else if let Some(error) = r.find::<CorsForbidden>() {
        Ok(json_error(json!({ "error": error.to_string() }), StatusCode::FORBIDDEN))
    } else if let Some(error) = r.find::<PayloadTooLarge>() {
        Ok(json_error(
            json!({ "error": error.to_string() }),
            StatusCode::PAYLOAD_TOO_LARGE,
        ))
    } else if let Some(error) = r.find::<LengthRequired>() {
        Ok(json_error(
            json!({ "error": error.to_string() }),
            StatusCode::LENGTH_REQUIRED,
        ))
    } else {
        Ok(json_error(
            json!({ "error": "route not found" }),
            StatusCode::NOT_FOUND,
        ))
    }
}
