//! Uniform response envelope for the HTTP surface.
//!
//! Every endpoint answers with the same JSON shape: `success` plus
//! either `data` or `error` (and `errors` for validation failures).
//! The envelope is a sum type internally; the flat JSON object only
//! exists at serialization time.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::error::{ProductError, ProductResult};

/// Outcome of a product operation, ready to serialize
#[derive(Debug)]
pub enum Envelope<T> {
    Success(T),
    Failure(ProductError),
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope::Success(data)
    }

    pub fn failure(error: ProductError) -> Self {
        Envelope::Failure(error)
    }
}

impl<T> From<ProductResult<T>> for Envelope<T> {
    fn from(result: ProductResult<T>) -> Self {
        match result {
            Ok(data) => Envelope::Success(data),
            Err(error) => Envelope::Failure(error),
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Success(data) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            Envelope::Failure(ProductError::Validation(field_errors)) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", "Validation failed")?;
                map.serialize_entry("errors", field_errors)?;
                map.end()
            }
            Envelope::Failure(error) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", &error.to_string())?;
                map.end()
            }
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = match &self {
            Envelope::Success(_) => StatusCode::OK,
            Envelope::Failure(error) => error.status_code(),
        };
        (status, Json(self)).into_response()
    }
}

/// Plain confirmation payload, e.g. for deletes
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::FieldError;
    use serde_json::{Value, json};
    use uuid::Uuid;

    #[test]
    fn success_serializes_with_data() {
        let envelope = Envelope::success(Message::new("Product deleted"));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "data": {"message": "Product deleted"}})
        );
    }

    #[test]
    fn validation_failure_carries_field_errors() {
        let envelope = Envelope::<Message>::failure(ProductError::Validation(vec![
            FieldError::new("name", "name must be between 3 and 100 characters"),
        ]));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], Value::Bool(false));
        assert_eq!(value["error"], "Validation failed");
        assert_eq!(value["errors"][0]["field"], "name");
    }

    #[test]
    fn non_validation_failure_has_no_errors_array() {
        let id = Uuid::nil();
        let envelope = Envelope::<Message>::failure(ProductError::NotFound(id));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], Value::Bool(false));
        assert_eq!(value["error"], format!("Product not found: {id}"));
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn from_result_maps_both_arms() {
        let ok: ProductResult<i32> = Ok(7);
        assert!(matches!(Envelope::from(ok), Envelope::Success(7)));

        let err: ProductResult<i32> = Err(ProductError::Database("down".to_string()));
        assert!(matches!(Envelope::from(err), Envelope::Failure(_)));
    }
}
