//! Rule predicates for [`Validator::check`](super::Validator).
//!
//! String rules operate on [`as_text`]; numeric comparisons use [`as_number`].

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use validator::ValidationError;

use super::{as_number, as_text};

static INT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("valid int regex"));

static NUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid numeric regex"));

fn ensure(ok: bool, code: &'static str) -> Result<(), ValidationError> {
    if ok { Ok(()) } else { Err(ValidationError::new(code)) }
}

/// Non-empty text. Missing and `null` are empty.
pub fn not_empty(value: Option<&Value>) -> Result<(), ValidationError> {
    ensure(!as_text(value).is_empty(), "not_empty")
}

/// Optionally signed decimal integer, leading zeros allowed.
pub fn is_int(value: Option<&Value>) -> Result<(), ValidationError> {
    ensure(INT_REGEX.is_match(&as_text(value)), "is_int")
}

/// Plain decimal number: optional sign, optional fraction, no exponent.
pub fn is_numeric(value: Option<&Value>) -> Result<(), ValidationError> {
    ensure(NUMERIC_REGEX.is_match(&as_text(value)), "is_numeric")
}

/// One of `true`, `false`, `1`, `0`.
pub fn is_boolean(value: Option<&Value>) -> Result<(), ValidationError> {
    ensure(
        matches!(as_text(value).as_str(), "true" | "false" | "1" | "0"),
        "is_boolean",
    )
}

/// Strictly positive after numeric coercion. Missing or non-numeric fails.
pub fn gt_zero(value: Option<&Value>) -> Result<(), ValidationError> {
    ensure(as_number(value).is_some_and(|n| n > 0.0), "gt_zero")
}
