//! The ordered collection a paginator reads from
//!
//! A [`Collection`] answers [`Query`] values: sort by an ordering, keep only
//! records on one side of one or more key bounds, optionally walk the
//! result backwards, and stop after a limit. A SQL backend turns this into
//! `ORDER BY ... WHERE (a, b) > ($1, $2) LIMIT n`; [`Vec`] answers it in
//! memory.

use std::cmp::Ordering as CmpOrdering;
use std::sync::Arc;

use crate::ordering::Ordering;
use crate::record::Record;
use crate::value::Value;

/// Which side of a key a bound keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    After,
    Before,
}

/// A composite key bound, expressed in the ordering's natural direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub side: Side,
    pub keys: Vec<Value>,
    /// Whether a record whose key equals `keys` is kept.
    pub inclusive: bool,
}

impl Bound {
    /// Records strictly after `keys`.
    pub fn after(keys: Vec<Value>) -> Self {
        Self {
            side: Side::After,
            keys,
            inclusive: false,
        }
    }

    /// Records strictly before `keys`.
    pub fn before(keys: Vec<Value>) -> Self {
        Self {
            side: Side::Before,
            keys,
            inclusive: false,
        }
    }

    /// The records this bound drops, as a bound of its own.
    pub fn complement(&self) -> Self {
        Self {
            side: match self.side {
                Side::After => Side::Before,
                Side::Before => Side::After,
            },
            keys: self.keys.clone(),
            inclusive: !self.inclusive,
        }
    }

    /// Whether a record with `key` is kept under `ordering`.
    pub fn admits(&self, ordering: &Ordering, key: &[Value]) -> bool {
        match (self.side, ordering.compare(key, &self.keys)) {
            (_, CmpOrdering::Equal) => self.inclusive,
            (Side::After, o) => o.is_gt(),
            (Side::Before, o) => o.is_lt(),
        }
    }
}

/// A request against a [`Collection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub ordering: Ordering,
    /// Walk the ordered records from the end. Bounds are unaffected.
    pub reverse: bool,
    pub bounds: Vec<Bound>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(ordering: Ordering) -> Self {
        Self {
            ordering,
            reverse: false,
            bounds: Vec::new(),
            limit: None,
        }
    }

    pub fn bound(mut self, bound: Bound) -> Self {
        self.bounds.push(bound);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record with `key` passes every bound.
    pub fn admits(&self, key: &[Value]) -> bool {
        self.bounds.iter().all(|b| b.admits(&self.ordering, key))
    }
}

/// Ordered, filterable source of records.
///
/// Every call must reflect the collection's state at the time of the call;
/// the paginator relies on this and never keeps records between calls.
pub trait Collection {
    type Record: Record;

    /// Records matching `query`, in query order.
    fn fetch(&self, query: &Query) -> crate::Result<Vec<Self::Record>>;

    /// Number of records matching `query`, ignoring its limit.
    fn count(&self, query: &Query) -> crate::Result<usize> {
        let mut query = query.clone();
        query.limit = None;
        Ok(self.fetch(&query)?.len())
    }

    /// Whether at least one record matches `query`.
    fn exists(&self, query: &Query) -> crate::Result<bool> {
        Ok(!self.fetch(&query.clone().limit(1))?.is_empty())
    }
}

impl<C: Collection + ?Sized> Collection for &C {
    type Record = C::Record;

    fn fetch(&self, query: &Query) -> crate::Result<Vec<Self::Record>> {
        (**self).fetch(query)
    }

    fn count(&self, query: &Query) -> crate::Result<usize> {
        (**self).count(query)
    }

    fn exists(&self, query: &Query) -> crate::Result<bool> {
        (**self).exists(query)
    }
}

impl<C: Collection + ?Sized> Collection for Arc<C> {
    type Record = C::Record;

    fn fetch(&self, query: &Query) -> crate::Result<Vec<Self::Record>> {
        (**self).fetch(query)
    }

    fn count(&self, query: &Query) -> crate::Result<usize> {
        (**self).count(query)
    }

    fn exists(&self, query: &Query) -> crate::Result<bool> {
        (**self).exists(query)
    }
}

impl<R: Record + Clone> Collection for Vec<R> {
    type Record = R;

    fn fetch(&self, query: &Query) -> crate::Result<Vec<R>> {
        let mut keyed = Vec::with_capacity(self.len());
        for record in self {
            let key = query.ordering.key(record)?;
            if query.admits(&key) {
                keyed.push((key, record));
            }
        }

        // Stable: records with equal keys keep their insertion order.
        keyed.sort_by(|(a, _), (b, _)| query.ordering.compare(a, b));
        if query.reverse {
            keyed.reverse();
        }

        let limit = query.limit.unwrap_or(keyed.len());
        Ok(keyed
            .into_iter()
            .take(limit)
            .map(|(_, record)| record.clone())
            .collect())
    }
}
