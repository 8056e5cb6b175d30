//! Request rule sets of the product endpoints.
//!
//! Rules run in a fixed order (id, name, price, availability) and every
//! failing rule yields one error, so a request can fail the same field twice.
//! Values are converted to typed DTOs only after every rule has passed.

use axum_helpers::validation::{as_bool, as_text, rules};
use axum_helpers::{FieldError, Location, RequestRules, Validator};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::{CreateProduct, UpdateProduct};

const INCORRECT_VALUE: &str = "Incorrect value";

/// `id` path parameter of `/{id}` routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i64);

/// `PUT /{id}`: the id plus a full replacement of the product's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductRequest {
    pub id: i64,
    pub input: UpdateProduct,
}

impl RequestRules for ProductId {
    fn from_parts(params: &HashMap<String, String>, _body: &Value) -> Result<Self, Vec<FieldError>> {
        let id = path_id(params);

        let mut v = Validator::new();
        check_id(&mut v, id.as_ref());
        v.finish()?;

        parse_id(id.as_ref()).map(ProductId)
    }
}

impl RequestRules for CreateProduct {
    fn from_parts(_params: &HashMap<String, String>, body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut v = Validator::new();
        check_name(&mut v, body);
        check_price(&mut v, body);
        v.field(Location::Body, "availability", body.get("availability"))
            .optional()
            .check(rules::is_boolean, INCORRECT_VALUE);
        v.finish()?;

        Ok(CreateProduct {
            name: as_text(body.get("name")),
            description: description(body),
            price: parse_price(body)?,
            availability: body.get("availability").map(|a| as_bool(Some(a))),
        })
    }
}

impl RequestRules for UpdateProductRequest {
    fn from_parts(params: &HashMap<String, String>, body: &Value) -> Result<Self, Vec<FieldError>> {
        let id = path_id(params);

        let mut v = Validator::new();
        check_id(&mut v, id.as_ref());
        check_name(&mut v, body);
        check_price(&mut v, body);
        v.field(Location::Body, "availability", body.get("availability"))
            .check(rules::is_boolean, INCORRECT_VALUE);
        v.finish()?;

        Ok(UpdateProductRequest {
            id: parse_id(id.as_ref())?,
            input: UpdateProduct {
                name: as_text(body.get("name")),
                description: description(body),
                price: parse_price(body)?,
                availability: as_bool(body.get("availability")),
            },
        })
    }
}

fn path_id(params: &HashMap<String, String>) -> Option<Value> {
    params.get("id").cloned().map(Value::String)
}

fn check_id(v: &mut Validator, id: Option<&Value>) {
    v.field(Location::Params, "id", id)
        .check(rules::is_int, INCORRECT_VALUE)
        .check(rules::gt_zero, "Id must be greater than 0");
}

fn check_name(v: &mut Validator, body: &Value) {
    v.field(Location::Body, "name", body.get("name"))
        .check(rules::not_empty, "Name is required");
}

fn check_price(v: &mut Validator, body: &Value) {
    v.field(Location::Body, "price", body.get("price"))
        .check(rules::is_numeric, INCORRECT_VALUE)
        .check(rules::gt_zero, "Price must be greater than 0")
        .check(rules::not_empty, "Price is required");
}

/// An id that passed the rules but does not fit in `i64` is still incorrect.
fn parse_id(id: Option<&Value>) -> Result<i64, Vec<FieldError>> {
    as_text(id)
        .parse()
        .map_err(|_| vec![FieldError::new(Location::Params, "id", id, INCORRECT_VALUE)])
}

/// Parsed and rounded to two decimals.
fn parse_price(body: &Value) -> Result<Decimal, Vec<FieldError>> {
    let raw = body.get("price");
    let text = as_text(raw);
    let text = text.strip_prefix('+').unwrap_or(&text);
    let text = if text.starts_with('.') { format!("0{}", text) } else { text.to_string() };

    Decimal::from_str(&text)
        .map(|p| p.round_dp(2))
        .map_err(|_| vec![FieldError::new(Location::Body, "price", raw, INCORRECT_VALUE)])
}

fn description(body: &Value) -> Option<String> {
    match body.get("description") {
        None | Some(Value::Null) => None,
        Some(value) => Some(as_text(Some(value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(id: &str) -> HashMap<String, String> {
        HashMap::from([("id".to_string(), id.to_string())])
    }

    fn messages(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.msg.as_str()).collect()
    }

    #[test]
    fn test_create_empty_body_has_four_errors() {
        let errors = CreateProduct::from_parts(&HashMap::new(), &json!({})).unwrap_err();
        assert_eq!(
            messages(&errors),
            [
                "Name is required",
                "Incorrect value",
                "Price must be greater than 0",
                "Price is required"
            ]
        );
        assert!(errors.iter().all(|e| e.location == Location::Body && e.value.is_none()));
    }

    #[test]
    fn test_create_zero_price() {
        let errors =
            CreateProduct::from_parts(&HashMap::new(), &json!({ "name": "Mouse", "price": 0 })).unwrap_err();
        assert_eq!(messages(&errors), ["Price must be greater than 0"]);
        assert_eq!(errors[0].value, Some(json!(0)));
    }

    #[test]
    fn test_create_text_price() {
        let errors = CreateProduct::from_parts(&HashMap::new(), &json!({ "name": "Mouse", "price": "hello" }))
            .unwrap_err();
        assert_eq!(messages(&errors), ["Incorrect value", "Price must be greater than 0"]);
        assert!(errors.iter().all(|e| e.path == "price"));
    }

    #[test]
    fn test_create_converts_values() {
        let input = CreateProduct::from_parts(
            &HashMap::new(),
            &json!({ "name": "Mouse", "price": "19.999", "description": "Wireless", "extra": 1 }),
        )
        .unwrap();

        assert_eq!(input.name, "Mouse");
        assert_eq!(input.description.as_deref(), Some("Wireless"));
        assert_eq!(input.price, Decimal::new(2000, 2));
        assert_eq!(input.availability, None);
    }

    #[test]
    fn test_create_availability_is_optional_but_checked() {
        let input = CreateProduct::from_parts(
            &HashMap::new(),
            &json!({ "name": "Mouse", "price": 5, "availability": "0" }),
        )
        .unwrap();
        assert_eq!(input.availability, Some(false));

        let errors = CreateProduct::from_parts(
            &HashMap::new(),
            &json!({ "name": "Mouse", "price": 5, "availability": "yes" }),
        )
        .unwrap_err();
        assert_eq!(messages(&errors), ["Incorrect value"]);
        assert_eq!(errors[0].path, "availability");
    }

    #[test]
    fn test_price_with_leading_sign_or_dot() {
        let plus = CreateProduct::from_parts(&HashMap::new(), &json!({ "name": "a", "price": "+5" })).unwrap();
        assert_eq!(plus.price, Decimal::new(5, 0));

        let dot = CreateProduct::from_parts(&HashMap::new(), &json!({ "name": "a", "price": ".5" })).unwrap();
        assert_eq!(dot.price, Decimal::new(5, 1));
    }

    #[test]
    fn test_update_empty_body_has_five_errors() {
        let errors = UpdateProductRequest::from_parts(&params("1"), &json!({})).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[4].path, "availability");
    }

    #[test]
    fn test_update_collects_id_errors_first() {
        let errors = UpdateProductRequest::from_parts(&params("hello"), &json!({})).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors[0].location, Location::Params);
        assert_eq!(errors[1].msg, "Id must be greater than 0");
    }

    #[test]
    fn test_update_converts_values() {
        let req = UpdateProductRequest::from_parts(
            &params("3"),
            &json!({ "name": "Mouse", "price": 10.5, "availability": 1, "description": null }),
        )
        .unwrap();

        assert_eq!(req.id, 3);
        assert_eq!(req.input.price, Decimal::new(105, 1));
        assert!(req.input.availability);
        assert_eq!(req.input.description, None);
    }

    #[test]
    fn test_id_rules() {
        let errors = ProductId::from_parts(&params("hello"), &json!({})).unwrap_err();
        assert_eq!(messages(&errors), ["Incorrect value", "Id must be greater than 0"]);
        assert_eq!(errors[0].value, Some(json!("hello")));

        let errors = ProductId::from_parts(&params("0"), &json!({})).unwrap_err();
        assert_eq!(messages(&errors), ["Id must be greater than 0"]);

        let errors = ProductId::from_parts(&params("-4"), &json!({})).unwrap_err();
        assert_eq!(messages(&errors), ["Id must be greater than 0"]);

        assert_eq!(ProductId::from_parts(&params("42"), &json!({})).unwrap(), ProductId(42));
    }

    #[test]
    fn test_id_out_of_range() {
        let errors = ProductId::from_parts(&params("99999999999999999999"), &json!({})).unwrap_err();
        assert_eq!(messages(&errors), ["Incorrect value"]);
    }
}
