//! Typed values read off records for ordering and cursors

use std::cmp::Ordering as CmpOrdering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single ordering-field value.
///
/// Values are totally ordered: `Null` sorts before everything else, values
/// of different kinds compare by kind, and floats use IEEE total ordering so
/// `NaN` has a fixed position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(#[serde(with = "float_bits")] f64),
    String(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::Uuid(_) => 4,
            Value::DateTime(_) => 5,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        match (self, other) {
            (Value::Null, Value::Null) => CmpOrdering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            // Mixed numeric columns compare numerically, ints first on a tie.
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b).then(CmpOrdering::Less),
            (Value::Float(a), Value::Int(b)) => {
                cmp_int_float(*b, *a).reverse().then(CmpOrdering::Greater)
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Exact comparison of an integer with a float, no rounding through `as f64`.
fn cmp_int_float(int: i64, float: f64) -> CmpOrdering {
    // 2^63, the first float above i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        // Matches `f64::total_cmp`: negative NaN below everything, positive above.
        return if float.is_sign_negative() {
            CmpOrdering::Greater
        } else {
            CmpOrdering::Less
        };
    }
    if float >= LIMIT {
        return CmpOrdering::Less;
    }
    if float < -LIMIT {
        return CmpOrdering::Greater;
    }

    let whole = float.trunc();
    let fract = float - whole;
    int.cmp(&(whole as i64)).then_with(|| {
        if fract > 0.0 {
            CmpOrdering::Less
        } else if fract < 0.0 {
            CmpOrdering::Greater
        } else {
            CmpOrdering::Equal
        }
    })
}

/// Floats travel as their raw bits so infinities and NaN survive JSON.
mod float_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        u64::deserialize(deserializer).map(f64::from_bits)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for Value {}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! int_into_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

int_into_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sorts_first() {
        assert!(Value::Null < Value::Int(i64::MIN));
        assert!(Value::Null < Value::String(String::new()));
        assert!(Value::Null < Value::Bool(false));
    }

    #[test]
    fn test_mixed_numeric_comparison() {
        assert!(Value::Int(1) < Value::Float(1.5));
        assert!(Value::Float(0.5) < Value::Int(1));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn test_float_nan_is_ordered() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(nan.cmp(&nan), CmpOrdering::Equal);
        assert!(Value::Float(f64::INFINITY) < nan);
    }

    #[test]
    fn test_mixed_numeric_comparison_is_exact() {
        let big = 1_i64 << 53;
        assert!(Value::Int(big + 1) > Value::Float(big as f64));
        assert!(Value::Float(big as f64) < Value::Int(big + 1));
        assert!(Value::Int(i64::MAX) < Value::Float(9_223_372_036_854_775_808.0));
        assert!(Value::Int(i64::MIN) > Value::Float(f64::NEG_INFINITY));
        assert!(Value::Int(-2) < Value::Float(-1.5));
        assert!(Value::Int(-1) > Value::Float(-1.5));
        assert!(Value::Int(0) < Value::Float(f64::NAN));
        assert!(Value::Int(0) > Value::Float(-f64::NAN));
    }

    #[test]
    fn test_non_finite_floats_survive_serde() {
        for float in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, -0.0, 0.1] {
            let json = serde_json::to_string(&Value::Float(float)).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            match back {
                Value::Float(back) => assert_eq!(back.to_bits(), float.to_bits()),
                other => panic!("expected a float, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }
}
