//! GraphQL scalars

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime as ChronoDateTime, Utc};

/// DateTime scalar (RFC 3339)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(pub ChronoDateTime<Utc>);

#[Scalar]
impl ScalarType for DateTime {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(s) = value {
            Ok(DateTime(
                ChronoDateTime::parse_from_rfc3339(&s)
                    .map_err(|e| InputValueError::custom(format!("Invalid DateTime: {}", e)))?
                    .with_timezone(&Utc),
            ))
        } else {
            Err(InputValueError::expected_type(value))
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_rfc3339())
    }
}

impl From<DateTime> for crate::Value {
    fn from(value: DateTime) -> Self {
        crate::Value::DateTime(value.0)
    }
}

/// UUID scalar
///
/// Accepts hyphenated, simple, braced and URN forms; always emits the
/// lowercase hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid(pub uuid::Uuid);

#[Scalar(name = "UUID")]
impl ScalarType for Uuid {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(s) = &value {
            uuid::Uuid::parse_str(s)
                .map(Uuid)
                .map_err(|e| InputValueError::custom(format!("Invalid UUID: {}", e)))
        } else {
            Err(InputValueError::expected_type(value))
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.hyphenated().to_string())
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(value: uuid::Uuid) -> Self {
        Uuid(value)
    }
}

impl From<Uuid> for crate::Value {
    fn from(value: Uuid) -> Self {
        crate::Value::Uuid(value.0)
    }
}
