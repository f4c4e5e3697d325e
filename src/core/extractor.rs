//! Extractors whose rejections use the [`AppError`] envelope instead of
//! axum's plain-text bodies.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, FromRequest, Multipart, Request,
    },
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(json_rejection)
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid request body: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("Malformed JSON: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected Content-Type: application/json".to_string()
        }
        other => format!("Failed to read request body: {}", other.body_text()),
    };
    AppError::BadRequest(message)
}

/// Multipart form stream for the candidate form
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Multipart::from_request(req, state)
            .await
            .map(Self)
            .map_err(|rejection: MultipartRejection| {
                AppError::BadRequest(format!(
                    "Expected multipart/form-data: {}",
                    rejection.body_text()
                ))
            })
    }
}
