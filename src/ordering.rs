//! Ordering specifications
//!
//! An ordering is written as a list of field identifiers, each optionally
//! prefixed with `-` for descending order, e.g. `["-created", "-id"]`.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashSet;
use std::fmt;

use crate::record::{FieldPath, Record};
use crate::value::Value;

/// Sort direction of a single ordering field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    fn apply(self, ordering: CmpOrdering) -> CmpOrdering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// One field of an ordering specification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderField {
    pub path: FieldPath,
    pub direction: Direction,
}

impl OrderField {
    /// Parse `field`, `+field` or `-field`.
    pub fn parse(raw: &str) -> crate::Result<Self> {
        let raw = raw.trim();
        let (direction, name) = if let Some(name) = raw.strip_prefix('-') {
            (Direction::Desc, name)
        } else if let Some(name) = raw.strip_prefix('+') {
            (Direction::Asc, name)
        } else {
            (Direction::Asc, raw)
        };

        Ok(Self {
            path: FieldPath::parse(name)?,
            direction,
        })
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "{}", self.path),
            Direction::Desc => write!(f, "-{}", self.path),
        }
    }
}

/// A validated, non-empty ordering specification.
///
/// All fields share one direction. Mixing ascending and descending fields is
/// rejected with [`crate::Error::InvalidOrdering`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    fields: Vec<OrderField>,
}

impl Ordering {
    /// Parse and validate an ordering specification.
    pub fn parse<I, S>(fields: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = fields
            .into_iter()
            .map(|raw| OrderField::parse(raw.as_ref()))
            .collect::<crate::Result<Vec<_>>>()?;
        Self::new(fields)
    }

    /// Validate already parsed fields.
    pub fn new(fields: Vec<OrderField>) -> crate::Result<Self> {
        let Some(first) = fields.first() else {
            return Err(crate::Error::InvalidOrdering(
                "ordering must name at least one field".to_string(),
            ));
        };

        if fields.iter().any(|f| f.direction != first.direction) {
            return Err(crate::Error::InvalidOrdering(format!(
                "direction of orderings must match: {}",
                display_fields(&fields)
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = fields.iter().find(|f| !seen.insert(&f.path)) {
            return Err(crate::Error::InvalidOrdering(format!(
                "field '{}' is listed more than once",
                dup.path
            )));
        }

        Ok(Self { fields })
    }

    /// Append `field` in the shared direction unless it is already present.
    ///
    /// Use a unique field (usually the primary key) so that no two records
    /// share a key and every cursor names exactly one position.
    pub fn with_tiebreak(mut self, field: &str) -> crate::Result<Self> {
        let path = FieldPath::parse(field)?;
        if !self.fields.iter().any(|f| f.path == path) {
            let direction = self.direction();
            self.fields.push(OrderField { path, direction });
        }
        Ok(self)
    }

    pub fn fields(&self) -> &[OrderField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The direction shared by every field.
    pub fn direction(&self) -> Direction {
        self.fields[0].direction
    }

    /// The same fields with every direction flipped.
    pub fn reversed(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|f| OrderField {
                    path: f.path.clone(),
                    direction: f.direction.reverse(),
                })
                .collect(),
        }
    }

    /// Read the ordering key of `record`, one value per field.
    pub fn key(&self, record: &dyn Record) -> crate::Result<Vec<Value>> {
        self.fields.iter().map(|f| f.path.resolve(record)).collect()
    }

    /// Compare two keys field by field, honouring each field's direction.
    pub fn compare(&self, a: &[Value], b: &[Value]) -> CmpOrdering {
        self.fields
            .iter()
            .zip(a.iter().zip(b))
            .map(|(field, (a, b))| field.direction.apply(a.cmp(b)))
            .find(|o| o.is_ne())
            .unwrap_or(CmpOrdering::Equal)
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_fields(&self.fields))
    }
}

fn display_fields(fields: &[OrderField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
