//! Lenient JSON body extractor.
//!
//! Unlike `axum::Json`, [`ChatJson`] does not require a `Content-Type`
//! header: embedded widgets post with whatever header their fetch wrapper
//! sets. Any body that fails to parse becomes [`AppError::InvalidBody`].

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::http::error::AppError;

pub struct ChatJson<T>(pub T);

impl<T, S> FromRequest<S> for ChatJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(ChatJson)
            .map_err(|e| AppError::InvalidBody(e.to_string()))
    }
}
