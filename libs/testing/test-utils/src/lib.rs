//! Shared test utilities
//!
//! - `TestDatabase`: migrated PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: deterministic product payloads
//! - `assertions`: helpers for the JSON bodies returned by the API
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!     let body = builder.product_json("mouse");
//! }
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Value, json};

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic test data derived from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name, so each test gets stable, distinct data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// assert!(builder.name("mouse").starts_with("test-mouse-"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Product name, at most 100 characters.
    pub fn name(&self, suffix: &str) -> String {
        let mut name = format!("test-{}-{}", suffix, self.seed % 1_000_000);
        name.truncate(100);
        name
    }

    /// Positive price with two decimals, between 1.00 and 999.99.
    pub fn price(&self) -> Decimal {
        let cents = (self.seed % 99_900) as i64 + 100;
        Decimal::new(cents, 2)
    }

    /// A valid create/update body.
    pub fn product_json(&self, suffix: &str) -> Value {
        json!({
            "name": self.name(suffix),
            "price": self.price().to_f64().unwrap_or(1.0),
            "availability": true,
        })
    }
}

/// Assertions over API response bodies
pub mod assertions {
    use serde_json::Value;

    /// The `msg` of every entry in a `{ "errors": [...] }` body, in order.
    pub fn error_messages(body: &Value) -> Vec<String> {
        body["errors"]
            .as_array()
            .unwrap_or_else(|| panic!("expected an errors array, got {}", body))
            .iter()
            .map(|e| e["msg"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// Assert the exact, ordered list of validation messages.
    pub fn assert_error_messages(body: &Value, expected: &[&str]) {
        assert_eq!(
            error_messages(body),
            expected,
            "unexpected validation errors in {}",
            body
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::from_test_name("my_test");
        let b = TestDataBuilder::from_test_name("my_test");
        assert_eq!(a.name("mouse"), b.name("mouse"));
        assert_eq!(a.price(), b.price());
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");
        assert_ne!(a.name("mouse"), b.name("mouse"));
    }

    #[test]
    fn test_price_is_positive_with_two_decimals() {
        for seed in [0, 1, 99_899, u64::MAX] {
            let price = TestDataBuilder::new(seed).price();
            assert!(price > Decimal::ZERO);
            assert_eq!(price.scale(), 2);
        }
    }

    #[test]
    fn test_error_messages() {
        let body = json!({ "errors": [{ "msg": "Name is required" }, { "msg": "Incorrect value" }] });
        assertions::assert_error_messages(&body, &["Name is required", "Incorrect value"]);
    }
}
