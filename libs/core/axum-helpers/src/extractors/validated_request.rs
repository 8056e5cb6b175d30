//! Extractor that runs a request's validation rules before the handler.

use crate::errors::AppError;
use crate::validation::RequestRules;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::PathRejection},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Validated path parameters and JSON body, converted into `T`.
///
/// The body is parsed only for JSON content types; an empty or non-JSON body
/// is seen by the rules as `{}`. Rejections:
/// - malformed JSON: 400 `{ "error": "Malformed JSON body" }`
/// - failed rules: 400 `{ "errors": [...] }`, the handler is not called
///
/// # Example
/// ```ignore
/// async fn get_product(ValidatedRequest(req): ValidatedRequest<ProductIdRequest>) -> ... {
///     service.get_product(req.id).await
/// }
/// ```
pub struct ValidatedRequest<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedRequest<T>
where
    T: RequestRules,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state).await {
            Ok(Path(params)) => params,
            Err(PathRejection::MissingPathParams(_)) => HashMap::new(),
            Err(e) => return Err(AppError::BadRequest(e.body_text())),
        };

        let is_json = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let body = if is_json && !bytes.is_empty() {
            serde_json::from_slice(&bytes).map_err(|e| {
                tracing::debug!("Rejecting malformed JSON body: {}", e);
                AppError::BadRequest("Malformed JSON body".to_string())
            })?
        } else {
            Value::Object(Map::new())
        };

        T::from_parts(&params, &body)
            .map(ValidatedRequest)
            .map_err(AppError::Validation)
    }
}
