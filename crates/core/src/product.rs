//! Product records and their validation rules.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Identifier assigned to a product by the store.
pub type ProductId = u64;

/// Minimum product name length, in characters.
pub const NAME_MIN_CHARS: usize = 2;

/// Maximum product name length, in characters.
pub const NAME_MAX_CHARS: usize = 12;

/// Prices must be strictly greater than this.
pub const PRICE_FLOOR: f64 = 1.0;

/// A validated product record.
///
/// Optional fields are serialized as `null` when absent, so a stored record
/// always has the same four keys.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub in_stock: Option<bool>,
    pub discount: Option<f64>,
}

impl Product {
    /// Create a product with only the required fields set.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            in_stock: None,
            discount: None,
        }
    }

    /// Set the stock flag.
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Set the discount.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Validate an untyped JSON value into a product.
    ///
    /// Every violated constraint is collected; validation does not stop at
    /// the first failure.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let Some(fields) = value.as_object() else {
            return Err(ValidationError::single("body", "must be a JSON object"));
        };

        let mut violations = Vec::new();
        let name = validate_name(fields, &mut violations);
        let price = validate_price(fields, &mut violations);
        let in_stock = optional_field(
            fields,
            "in_stock",
            "must be a boolean",
            &mut violations,
            Value::as_bool,
        );
        let discount = optional_field(
            fields,
            "discount",
            "must be a number",
            &mut violations,
            Value::as_f64,
        );

        match (name, price) {
            (Some(name), Some(price)) if violations.is_empty() => Ok(Self {
                name,
                price,
                in_stock,
                discount,
            }),
            _ => Err(ValidationError { violations }),
        }
    }
}

fn validate_name(fields: &Map<String, Value>, violations: &mut Vec<Violation>) -> Option<String> {
    match fields.get("name") {
        None => {
            violations.push(Violation::new("name", "field required"));
            None
        }
        Some(Value::String(name)) => {
            let len = name.chars().count();
            if (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
                Some(name.clone())
            } else {
                violations.push(Violation::new(
                    "name",
                    format!("must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
                ));
                None
            }
        }
        Some(_) => {
            violations.push(Violation::new("name", "must be a string"));
            None
        }
    }
}

fn validate_price(fields: &Map<String, Value>, violations: &mut Vec<Violation>) -> Option<f64> {
    match fields.get("price") {
        None => {
            violations.push(Violation::new("price", "field required"));
            None
        }
        Some(value) => match value.as_f64() {
            Some(price) if price > PRICE_FLOOR => Some(price),
            Some(_) => {
                violations.push(Violation::new("price", "must be greater than 1"));
                None
            }
            None => {
                violations.push(Violation::new("price", "must be a number"));
                None
            }
        },
    }
}

/// Extract an optional field. Absent and `null` both mean "not supplied".
fn optional_field<T>(
    fields: &Map<String, Value>,
    field: &str,
    message: &str,
    violations: &mut Vec<Violation>,
    extract: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let extracted = extract(value);
            if extracted.is_none() {
                violations.push(Violation::new(field, message));
            }
            extracted
        }
    }
}

/// A single violated constraint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Name of the offending field.
    pub field: String,
    /// What the field failed.
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Rejected input, listing every violated constraint.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// A validation error with exactly one violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, message)],
        }
    }

    /// Whether a given field was among the violations.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
