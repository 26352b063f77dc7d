//! Field access on records, including traversal through relations

use std::fmt;

use crate::value::Value;

/// Result of looking up a single field name on a record.
pub enum Field<'a> {
    /// A plain value.
    Value(Value),
    /// A related record. `None` stands for an empty (nullable) relation.
    Related(Option<&'a dyn Record>),
}

/// A record the paginator can read ordering values from.
///
/// Implementors expose their fields by name. Relations are exposed as
/// [`Field::Related`] so paths like `item__number` can hop into them.
///
/// ```rust
/// use graphql_cursor_pagination::{Field, Record};
///
/// struct Item {
///     number: String,
/// }
///
/// struct Charge {
///     order: u32,
///     item: Option<Item>,
/// }
///
/// impl Record for Item {
///     fn field(&self, name: &str) -> Option<Field<'_>> {
///         match name {
///             "number" => Some(Field::Value(self.number.clone().into())),
///             _ => None,
///         }
///     }
/// }
///
/// impl Record for Charge {
///     fn field(&self, name: &str) -> Option<Field<'_>> {
///         match name {
///             "order" => Some(Field::Value(self.order.into())),
///             "item" => Some(Field::Related(self.item.as_ref().map(|i| i as &dyn Record))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Look up a field by name, `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<Field<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for std::sync::Arc<R> {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

/// A dotted path to a value, e.g. `item__number` or `item.number`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a field identifier. Segments are separated by `__` or `.`.
    pub fn parse(raw: &str) -> crate::Result<Self> {
        let segments: Vec<String> = raw
            .split("__")
            .flat_map(|part| part.split('.'))
            .map(str::to_string)
            .collect();

        if segments.iter().any(|s| s.is_empty()) {
            return Err(crate::Error::InvalidOrdering(format!(
                "'{raw}' is not a valid field path"
            )));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Read the value this path points at on `record`.
    ///
    /// An empty relation anywhere along the path yields `Value::Null`.
    pub fn resolve(&self, record: &dyn Record) -> crate::Result<Value> {
        let (last, relations) = self
            .segments
            .split_last()
            .ok_or_else(|| crate::Error::UnknownField(self.to_string()))?;

        let mut current = record;
        for segment in relations {
            match current.field(segment) {
                Some(Field::Related(Some(related))) => current = related,
                Some(Field::Related(None)) => return Ok(Value::Null),
                Some(Field::Value(_)) => {
                    return Err(crate::Error::UnknownField(format!(
                        "{self}: '{segment}' is not a relation"
                    )))
                }
                None => return Err(crate::Error::UnknownField(self.to_string())),
            }
        }

        match current.field(last) {
            Some(Field::Value(value)) => Ok(value),
            Some(Field::Related(_)) => Err(crate::Error::UnknownField(format!(
                "{self}: '{last}' is a relation, not a value"
            ))),
            None => Err(crate::Error::UnknownField(self.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("__"))
    }
}
