//! # graphql-cursor-pagination
//!
//! Cursor pagination for GraphQL services.
//!
//! ## Features
//!
//! - **Cursor Paginator** - keyset pagination over any ordered collection,
//!   with composite (multi-field) cursors and Relay `first`/`after`/`last`/`before`
//! - **Connections** - Relay `edges` / `pageInfo` output types
//! - **Pagination Arguments** - validated GraphQL input object
//! - **Field Errors** - flat, camelCased field error payloads
//! - **Scalars** - `UUID` and `DateTime`
//!
//! ## Usage
//!
//! ```rust
//! use graphql_cursor_pagination::{CursorPaginator, Field, PageRequest, Record};
//!
//! #[derive(Clone)]
//! struct Charge {
//!     order: i64,
//! }
//!
//! impl Record for Charge {
//!     fn field(&self, name: &str) -> Option<Field<'_>> {
//!         (name == "order").then(|| Field::Value(self.order.into()))
//!     }
//! }
//!
//! let charges: Vec<Charge> = (0..20).map(|order| Charge { order }).collect();
//! let paginator = CursorPaginator::new(charges, ["order"]).unwrap();
//!
//! let connection = paginator.connection(&PageRequest::first(2)).unwrap();
//! assert!(connection.page_info.has_next_page);
//! ```

pub mod arguments;
pub mod collection;
pub mod config;
pub mod connection;
pub mod cursor;
pub mod ordering;
pub mod paginator;
pub mod payload;
pub mod record;
pub mod types;
pub mod value;

pub use arguments::PaginationInput;
pub use collection::{Bound, Collection, Query, Side};
pub use config::PaginationConfig;
pub use connection::{Connection, Edge, PageInfo};
pub use cursor::{Cursor, CursorCodec};
pub use ordering::{Direction, OrderField, Ordering};
pub use paginator::{CursorPaginator, Page, PageRequest};
pub use payload::{ErrorDetail, ErrorKey, ErrorTree, FieldError};
pub use record::{Field, FieldPath, Record};
pub use types::{DateTime, Uuid};
pub use value::Value;

use thiserror::Error;

/// Pagination errors
#[derive(Error, Debug)]
pub enum Error {
    /// The ordering specification can never be paginated.
    #[error("Invalid ordering: {0}")]
    InvalidOrdering(String),

    /// An `after`/`before` token could not be decoded for this paginator.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Invalid pagination arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Failure reported by a [`Collection`] backend.
    #[error("Collection error: {0}")]
    Collection(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a backend error.
    pub fn collection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Collection(Box::new(err))
    }
}

/// Result type for pagination operations
pub type Result<T> = std::result::Result<T, Error>;
