//! Structured field errors for mutation payloads
//!
//! Validation layers usually report errors as a tree keyed by input field,
//! with nested objects and list indexes. GraphQL clients get a flat list
//! instead, each entry naming its field with a camelCase lookup path such as
//! `fieldTwo[0].nestedField`.

use async_graphql::SimpleObject;
use heck::ToLowerCamelCase;
use serde_json::Value as Json;

/// A single validation message
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub error: String,
    pub code: Option<String>,
}

impl ErrorDetail {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// All messages for one input field
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub name: String,
    pub values: Vec<ErrorDetail>,
}

/// Key of a nested error entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKey {
    Field(String),
    Index(usize),
}

/// Validation errors keyed by input field, in insertion order.
///
/// Trees read from JSON keep the order fields appear in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTree {
    Messages(Vec<ErrorDetail>),
    Nested(Vec<(ErrorKey, ErrorTree)>),
}

impl Default for ErrorTree {
    fn default() -> Self {
        ErrorTree::Nested(Vec::new())
    }
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add messages for `name`.
    pub fn field(self, name: impl Into<String>, details: Vec<ErrorDetail>) -> Self {
        self.push(ErrorKey::Field(name.into()), ErrorTree::Messages(details))
    }

    /// Add a nested object's errors under `name`.
    pub fn nested(self, name: impl Into<String>, tree: ErrorTree) -> Self {
        self.push(ErrorKey::Field(name.into()), tree)
    }

    /// Add a list element's errors under `index`.
    pub fn index(self, index: usize, tree: ErrorTree) -> Self {
        self.push(ErrorKey::Index(index), tree)
    }

    fn push(self, key: ErrorKey, tree: ErrorTree) -> Self {
        match self {
            ErrorTree::Nested(mut entries) => {
                entries.push((key, tree));
                ErrorTree::Nested(entries)
            }
            // A leaf gaining children keeps its own messages under `""`.
            ErrorTree::Messages(details) => ErrorTree::Nested(vec![
                (ErrorKey::Field(String::new()), ErrorTree::Messages(details)),
                (key, tree),
            ]),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ErrorTree::Messages(details) => details.is_empty(),
            ErrorTree::Nested(entries) => entries.iter().all(|(_, tree)| tree.is_empty()),
        }
    }

    /// Flatten into one [`FieldError`] per leaf, depth first.
    pub fn flatten(&self) -> Vec<FieldError> {
        let mut fields = Vec::new();
        self.traverse(String::new(), &mut fields);
        fields
    }

    fn traverse(&self, path: String, out: &mut Vec<FieldError>) {
        match self {
            ErrorTree::Messages(details) => out.push(FieldError {
                name: path,
                values: details.clone(),
            }),
            ErrorTree::Nested(entries) => {
                for (key, tree) in entries {
                    let inner = match key {
                        ErrorKey::Index(i) => format!("{path}[{i}]"),
                        ErrorKey::Field(name) if name.is_empty() => path.clone(),
                        ErrorKey::Field(name) if path.is_empty() => name.to_lower_camel_case(),
                        ErrorKey::Field(name) => format!("{path}.{}", name.to_lower_camel_case()),
                    };
                    tree.traverse(inner, out);
                }
            }
        }
    }
}

impl TryFrom<Json> for ErrorTree {
    type Error = crate::Error;

    /// Read the JSON error shape most validation libraries emit: objects
    /// map fields, arrays of strings are messages, arrays of objects are
    /// per-item errors (empty objects mean "no errors for this item").
    fn try_from(value: Json) -> crate::Result<Self> {
        match value {
            Json::String(message) => Ok(ErrorTree::Messages(vec![ErrorDetail::new(message)])),
            Json::Object(map) => map
                .into_iter()
                .map(|(name, value)| {
                    let key = match name.parse::<usize>() {
                        Ok(i) => ErrorKey::Index(i),
                        Err(_) => ErrorKey::Field(name),
                    };
                    Ok((key, ErrorTree::try_from(value)?))
                })
                .collect::<crate::Result<Vec<_>>>()
                .map(ErrorTree::Nested),
            Json::Array(items) if items.iter().all(|i| i.is_string()) => Ok(ErrorTree::Messages(
                items
                    .into_iter()
                    .filter_map(|i| i.as_str().map(ErrorDetail::new))
                    .collect(),
            )),
            Json::Array(items) => items
                .into_iter()
                .enumerate()
                .filter(|(_, item)| !matches!(item, Json::Object(m) if m.is_empty()))
                .map(|(i, item)| Ok((ErrorKey::Index(i), ErrorTree::try_from(item)?)))
                .collect::<crate::Result<Vec<_>>>()
                .map(ErrorTree::Nested),
            other => Err(crate::Error::InvalidArguments(format!(
                "unsupported error tree value: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail() -> Vec<ErrorDetail> {
        vec![ErrorDetail::new("An error").with_code("123")]
    }

    #[test]
    fn test_flatten_basic() {
        let tree = ErrorTree::new().field("field_one", detail());
        assert_eq!(
            tree.flatten(),
            [FieldError {
                name: "fieldOne".to_string(),
                values: detail()
            }]
        );
    }

    #[test]
    fn test_flatten_nested() {
        let tree = ErrorTree::new()
            .field("field_one", detail())
            .nested("field_two", ErrorTree::new().field("nested_field", detail()));
        let names: Vec<String> = tree.flatten().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["fieldOne", "fieldTwo.nestedField"]);
    }

    #[test]
    fn test_flatten_nested_index() {
        let tree = ErrorTree::new()
            .field("field_one", detail())
            .nested("field_two", ErrorTree::new().index(0, ErrorTree::Messages(detail())));
        let names: Vec<String> = tree.flatten().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["fieldOne", "fieldTwo[0]"]);
    }

    #[test]
    fn test_flatten_nested_index_object() {
        let tree = ErrorTree::new().field("field_one", detail()).nested(
            "field_two",
            ErrorTree::new().index(0, ErrorTree::new().field("nested_field", detail())),
        );
        let names: Vec<String> = tree.flatten().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["fieldOne", "fieldTwo[0].nestedField"]);
    }

    #[test]
    fn test_from_json() {
        let tree = ErrorTree::try_from(json!({
            "field_one": ["An error"],
            "items": [{}, {"unit_price": ["Too low", "Not a number"]}],
        }))
        .unwrap();
        let flat = tree.flatten();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].name, "fieldOne");
        assert_eq!(flat[1].name, "items[1].unitPrice");
        assert_eq!(flat[1].values.len(), 2);
        assert!(ErrorTree::try_from(json!({"a": 1})).is_err());
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let tree = ErrorTree::try_from(json!({
            "zip_code": ["Required"],
            "address": {"street_name": ["Too long"]},
            "amount": ["Not a number"],
        }))
        .unwrap();
        let names: Vec<String> = tree.flatten().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["zipCode", "address.streetName", "amount"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(ErrorTree::new().is_empty());
        assert!(ErrorTree::try_from(json!({"items": [{}, {}]})).unwrap().is_empty());
        assert!(!ErrorTree::new().field("a", detail()).is_empty());
    }
}
