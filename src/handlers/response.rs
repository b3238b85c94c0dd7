use axum::{
    extract::{FromRequest, Request},
    Json,
};
use garde::Validate;
use serde::{de::DeserializeOwned, Serialize};

use crate::{error::AppError, validation::input::validate};

/// The envelope every successful API action answers with.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Wraps `data` in a successful envelope.
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

/// A JSON body that passed its `garde` rules.
///
/// Malformed JSON and rule violations both become `AppError::Validation`.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate<Context = ()>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("❌ Rejected JSON body: {}", rejection);
            AppError::Validation(rejection.body_text())
        })?;
        validate(&value)?;
        Ok(Self(value))
    }
}
