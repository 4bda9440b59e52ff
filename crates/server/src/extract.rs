//! Request extractors that report failures as validation errors.

use crate::error::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use inventory_core::{Product, ProductId, ValidationError};
use serde_json::Value;

/// A product body that passed validation.
///
/// The body is parsed as untyped JSON first so every violated field is
/// reported, not just the first one serde trips over.
#[derive(Debug)]
pub struct ProductBody(pub Product);

impl<S: Send + Sync> FromRequest<S> for ProductBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ValidationError::single("body", format!("unreadable body: {e}")))?;

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ValidationError::single("body", format!("invalid JSON: {e}")))?;

        Ok(Self(Product::from_value(&value)?))
    }
}

/// The `{id}` path segment as a product id.
///
/// Every failure, including a segment that does not decode as UTF-8, is an
/// `item_id` violation.
#[derive(Debug, Clone, Copy)]
pub struct ProductIdPath(pub ProductId);

impl<S: Send + Sync> FromRequestParts<S> for ProductIdPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_id())?;
        Ok(Self(parse_product_id(&raw)?))
    }
}

/// Parse an `{id}` path segment.
pub fn parse_product_id(raw: &str) -> ApiResult<ProductId> {
    raw.parse::<ProductId>().map_err(|_| invalid_id().into())
}

fn invalid_id() -> ValidationError {
    ValidationError::single("item_id", "value is not a valid integer")
}

/// Combine a path id and a body, reporting the violations of both at once.
pub fn id_and_body(
    id: ApiResult<ProductIdPath>,
    body: ApiResult<ProductBody>,
) -> ApiResult<(ProductId, Product)> {
    match (id, body) {
        (Ok(ProductIdPath(id)), Ok(ProductBody(product))) => Ok((id, product)),
        (Err(ApiError::Validation(mut id_err)), Err(ApiError::Validation(body_err))) => {
            id_err.violations.extend(body_err.violations);
            Err(id_err.into())
        }
        (Err(err), _) | (_, Err(err)) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("42").unwrap(), 42);

        for raw in ["abc", "-1", "1.5", ""] {
            match parse_product_id(raw) {
                Err(ApiError::Validation(err)) => assert!(err.has_field("item_id")),
                other => panic!("{raw:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_id_and_body_merges_violations() {
        let id = Err(invalid_id().into());
        let body = Err(ValidationError::single("price", "field required").into());

        match id_and_body(id, body) {
            Err(ApiError::Validation(err)) => {
                let fields: Vec<_> = err.violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, ["item_id", "price"]);
            }
            other => panic!("expected merged violations, got {other:?}"),
        }

        let body = Ok(ProductBody(Product::new("Widget", 2.0)));
        let (id, product) = id_and_body(Ok(ProductIdPath(3)), body).unwrap();
        assert_eq!(id, 3);
        assert_eq!(product, Product::new("Widget", 2.0));
    }
}
