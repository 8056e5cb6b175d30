//! Reusable OpenAPI responses for the error bodies produced by [`AppError`](super::AppError).

use super::{ErrorResponse, ValidationErrorResponse};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "error": "Internal server error" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - one entry per failed rule",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "type": "field",
            "value": "hello",
            "msg": "Incorrect value",
            "path": "id",
            "location": "params"
        }, {
            "type": "field",
            "value": "hello",
            "msg": "Id must be greater than 0",
            "path": "id",
            "location": "params"
        }]
    })
)]
pub struct BadRequestValidationResponse(pub ValidationErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "error": "Product not found" })
)]
pub struct NotFoundResponse(pub ErrorResponse);
