use serde_json::Value;
use tracing::debug;
use validator::ValidationError;

use super::{FieldError, Location};

/// A rule predicate over an optional raw value.
pub type Rule = fn(Option<&Value>) -> Result<(), ValidationError>;

/// Collects rule violations across fields. Every check runs.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a chain of checks for one field.
    pub fn field<'a>(
        &'a mut self,
        location: Location,
        path: &'a str,
        value: Option<&'a Value>,
    ) -> FieldChain<'a> {
        FieldChain {
            validator: self,
            location,
            path,
            value,
            skip: false,
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Checks bound to one field; each failing check appends one error.
pub struct FieldChain<'a> {
    validator: &'a mut Validator,
    location: Location,
    path: &'a str,
    value: Option<&'a Value>,
    skip: bool,
}

impl FieldChain<'_> {
    /// Skip the remaining checks when the field is absent.
    pub fn optional(mut self) -> Self {
        self.skip = self.value.is_none();
        self
    }

    pub fn check(mut self, rule: Rule, msg: &str) -> Self {
        if self.skip {
            return self;
        }

        if let Err(e) = rule(self.value) {
            debug!(path = self.path, rule = %e.code, "Validation rule failed");
            self.validator
                .push(FieldError::new(self.location, self.path, self.value, msg));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules;
    use serde_json::json;

    #[test]
    fn test_every_failing_check_is_recorded_in_order() {
        let body = json!({ "price": "hello" });
        let mut v = Validator::new();
        v.field(Location::Body, "name", body.get("name"))
            .check(rules::not_empty, "Name is required");
        v.field(Location::Body, "price", body.get("price"))
            .check(rules::is_numeric, "Incorrect value")
            .check(rules::gt_zero, "Price must be greater than 0")
            .check(rules::not_empty, "Price is required");

        let msgs: Vec<_> = v.errors().iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(
            msgs,
            ["Name is required", "Incorrect value", "Price must be greater than 0"]
        );
        assert_eq!(v.finish().unwrap_err().len(), 3);
    }

    #[test]
    fn test_optional_skips_missing_field() {
        let body = json!({});
        let mut v = Validator::new();
        v.field(Location::Body, "availability", body.get("availability"))
            .optional()
            .check(rules::is_boolean, "Incorrect value");
        assert!(v.is_valid());
    }

    #[test]
    fn test_optional_still_checks_present_field() {
        let body = json!({ "availability": "maybe" });
        let mut v = Validator::new();
        v.field(Location::Body, "availability", body.get("availability"))
            .optional()
            .check(rules::is_boolean, "Incorrect value");

        let errors = v.finish().unwrap_err();
        assert_eq!(errors[0].path, "availability");
        assert_eq!(errors[0].value, Some(json!("maybe")));
    }
}
