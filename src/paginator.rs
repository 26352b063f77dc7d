//! Cursor paginator
//!
//! Translates `first`/`after`/`last`/`before` into keyset queries against a
//! [`Collection`] and packages the result as a [`Page`].
//!
//! Cursors compare on every ordering field at once, so a cursor taken in
//! the middle of a run of equal leading values still splits that run at the
//! right record.

use std::ops::Deref;

use crate::collection::{Bound, Collection, Query};
use crate::config::PaginationConfig;
use crate::cursor::Cursor;
use crate::ordering::Ordering;
use crate::value::Value;

/// Window requested from [`CursorPaginator::page`].
///
/// `first` takes precedence over `last` when both are set. With neither,
/// the whole (cursor-bounded) collection is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub first: Option<usize>,
    pub last: Option<usize>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl PageRequest {
    /// The whole collection.
    pub fn all() -> Self {
        Self::default()
    }

    /// At most `n` records from the front.
    pub fn first(n: usize) -> Self {
        Self {
            first: Some(n),
            ..Self::default()
        }
    }

    /// At most `n` records from the back.
    pub fn last(n: usize) -> Self {
        Self {
            last: Some(n),
            ..Self::default()
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }
}

/// One page of records plus navigation flags.
///
/// `has_next` / `has_previous` are relative to the whole collection, not to
/// the requested window.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    items: Vec<R>,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<R> Page<R> {
    pub fn new(items: Vec<R>, has_next: bool, has_previous: bool) -> Self {
        Self {
            items,
            has_next,
            has_previous,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn into_items(self) -> Vec<R> {
        self.items
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(R) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

impl<R> Deref for Page<R> {
    type Target = [R];

    fn deref(&self) -> &[R] {
        &self.items
    }
}

impl<R> IntoIterator for Page<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Page<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Keyset paginator over one collection and one fixed ordering.
///
/// The ordering must be unique per record. Cursors bound pages strictly, so
/// records sharing a cursor's whole key with the cursor's own record are
/// skipped; `page()` logs a warning when it sees such a tie. Append a unique
/// field (see [`PaginationConfig::tiebreak_field`]) to rule it out.
///
/// ```rust
/// use graphql_cursor_pagination::{CursorPaginator, Field, PageRequest, Record};
///
/// #[derive(Clone)]
/// struct Post {
///     id: i64,
/// }
///
/// impl Record for Post {
///     fn field(&self, name: &str) -> Option<Field<'_>> {
///         (name == "id").then(|| Field::Value(self.id.into()))
///     }
/// }
///
/// let posts: Vec<Post> = (0..5).map(|id| Post { id }).collect();
/// let paginator = CursorPaginator::new(posts, ["id"]).unwrap();
///
/// let page = paginator.page(&PageRequest::first(2)).unwrap();
/// assert!(page.has_next);
///
/// let cursor = paginator.cursor(&page[1]).unwrap();
/// let next = paginator.page(&PageRequest::first(2).after(cursor)).unwrap();
/// assert_eq!(next[0].id, 2);
/// ```
#[derive(Debug, Clone)]
pub struct CursorPaginator<C> {
    collection: C,
    ordering: Ordering,
}

impl<C: Collection> CursorPaginator<C> {
    /// Create a paginator, validating the ordering up front.
    pub fn new<I, S>(collection: C, ordering: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_ordering(collection, Ordering::parse(ordering)?))
    }

    /// Create a paginator with settings applied (tie-break field).
    pub fn with_config<I, S>(
        collection: C,
        ordering: I,
        config: &PaginationConfig,
    ) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;
        let mut ordering = Ordering::parse(ordering)?;
        if let Some(field) = &config.tiebreak_field {
            ordering = ordering.with_tiebreak(field)?;
        }
        Ok(Self::from_ordering(collection, ordering))
    }

    pub fn from_ordering(collection: C, ordering: Ordering) -> Self {
        Self {
            collection,
            ordering,
        }
    }

    pub fn ordering(&self) -> &Ordering {
        &self.ordering
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Fetch one page.
    ///
    /// Cursors are decoded before the collection is queried, so a bad
    /// cursor fails with [`crate::Error::InvalidCursor`] without any I/O.
    #[tracing::instrument(
        name = "paginate",
        skip_all,
        fields(
            ordering = %self.ordering,
            first = ?request.first,
            last = ?request.last,
            after = request.after.is_some(),
            before = request.before.is_some(),
        )
    )]
    pub fn page(&self, request: &PageRequest) -> crate::Result<Page<C::Record>> {
        let after = request.after.as_deref().map(|t| self.decode(t)).transpose()?;
        let before = request.before.as_deref().map(|t| self.decode(t)).transpose()?;

        for keys in after.iter().chain(before.iter()) {
            self.warn_on_tie(keys)?;
        }

        let mut query = Query::new(self.ordering.clone());
        if let Some(keys) = &after {
            query = query.bound(Bound::after(keys.clone()));
        }
        if let Some(keys) = &before {
            query = query.bound(Bound::before(keys.clone()));
        }

        let page = if let Some(first) = request.first {
            if request.last.is_some() {
                tracing::debug!("both 'first' and 'last' given, ignoring 'last'");
            }

            let mut items = self.collection.fetch(&query.limit(first.saturating_add(1)))?;
            let has_next = items.len() > first;
            items.truncate(first);

            let has_previous = match after {
                Some(keys) => self.any_outside(Bound::after(keys))?,
                None => false,
            };
            Page::new(items, has_next, has_previous)
        } else if let Some(last) = request.last {
            let mut items = self
                .collection
                .fetch(&query.reversed().limit(last.saturating_add(1)))?;
            let has_previous = items.len() > last;
            items.truncate(last);
            items.reverse();

            let has_next = match before {
                Some(keys) => self.any_outside(Bound::before(keys))?,
                None => false,
            };
            Page::new(items, has_next, has_previous)
        } else {
            Page::new(self.collection.fetch(&query)?, false, false)
        };

        tracing::debug!(
            len = page.len(),
            has_next = page.has_next,
            has_previous = page.has_previous,
            "page fetched"
        );
        Ok(page)
    }

    /// Encode the cursor pointing at `record`.
    pub fn cursor(&self, record: &C::Record) -> crate::Result<String> {
        Cursor::for_ordering(&self.ordering, self.ordering.key(record)?).encode()
    }

    /// Size of the whole collection, ignoring any page window.
    pub fn count(&self) -> crate::Result<usize> {
        self.collection.count(&Query::new(self.ordering.clone()))
    }

    /// Whether any record is cut off by `bound`.
    fn any_outside(&self, bound: Bound) -> crate::Result<bool> {
        let query = Query::new(self.ordering.clone()).bound(bound.complement());
        self.collection.exists(&query)
    }

    /// Warn when more than one record carries `keys`: the cursor cannot tell them apart.
    fn warn_on_tie(&self, keys: &[Value]) -> crate::Result<()> {
        let query = Query::new(self.ordering.clone())
            .bound(Bound::after(keys.to_vec()).complement())
            .bound(Bound::before(keys.to_vec()).complement())
            .limit(2);

        if self.collection.fetch(&query)?.len() > 1 {
            tracing::warn!(
                ordering = %self.ordering,
                "records share a cursor key, ties will be skipped; add a unique tie-break field"
            );
        }
        Ok(())
    }

    fn decode(&self, token: &str) -> crate::Result<Vec<Value>> {
        let cursor = Cursor::decode(token)
            .inspect_err(|e| tracing::warn!(error = %e, "rejected cursor"))?;

        let expected = self.ordering.to_string();
        if let Some(ordering) = cursor.ordering() {
            if ordering != expected {
                tracing::warn!(cursor = ordering, expected, "cursor issued for another ordering");
                return Err(crate::Error::InvalidCursor(format!(
                    "cursor was issued for ordering '{ordering}', not '{expected}'"
                )));
            }
        }

        let keys = cursor.into_keys();

        if keys.len() != self.ordering.len() {
            tracing::warn!(
                expected = self.ordering.len(),
                actual = keys.len(),
                "cursor does not match ordering"
            );
            return Err(crate::Error::InvalidCursor(format!(
                "cursor has {} keys, ordering '{}' needs {}",
                keys.len(),
                self.ordering,
                self.ordering.len()
            )));
        }

        Ok(keys)
    }
}
