//! Relay-style connections
//!
//! Maps a [`Page`] onto the `edges` / `pageInfo` shape from the Relay
//! Cursor Connections Specification: https://relay.dev/graphql/connections.htm

use async_graphql::{Object, OutputType, SimpleObject};

use crate::collection::Collection;
use crate::paginator::{CursorPaginator, Page, PageRequest};

/// Page information
#[derive(SimpleObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    /// Size of the whole collection, when requested.
    pub count: Option<u64>,
}

/// Edge in a connection
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[Object]
impl<T: OutputType> Edge<T> {
    async fn cursor(&self) -> &str {
        &self.cursor
    }

    async fn node(&self) -> &T {
        &self.node
    }
}

/// Connection (paginated result)
#[derive(Debug, Clone, PartialEq)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

#[Object]
impl<T: OutputType> Connection<T> {
    async fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    async fn page_info(&self) -> &PageInfo {
        &self.page_info
    }
}

impl<T> Connection<T> {
    /// Create new connection from edges that already carry cursors
    pub fn new(edges: Vec<Edge<T>>, has_next: bool, has_previous: bool) -> Self {
        let start_cursor = edges.first().map(|e| e.cursor.clone());
        let end_cursor = edges.last().map(|e| e.cursor.clone());

        Self {
            edges,
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_previous,
                start_cursor,
                end_cursor,
                count: None,
            },
        }
    }

    /// Build a connection from a page, taking each edge cursor from `paginator`.
    pub fn from_page<C>(paginator: &CursorPaginator<C>, page: Page<T>) -> crate::Result<Self>
    where
        C: Collection<Record = T>,
    {
        let (has_next, has_previous) = (page.has_next, page.has_previous);
        let edges = page
            .into_iter()
            .map(|node| {
                Ok(Edge {
                    cursor: paginator.cursor(&node)?,
                    node,
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(Self::new(edges, has_next, has_previous))
    }

    /// Create empty connection, for resolvers that know there is nothing to
    /// page (e.g. a parent without the related collection) and skip the query.
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
        }
    }

    /// Attach the total collection size to `pageInfo.count`.
    pub fn with_count(mut self, count: usize) -> Self {
        self.page_info.count = Some(count as u64);
        self
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }

    /// Convert nodes (e.g. database rows into GraphQL objects), keeping cursors.
    pub fn map<U, F>(self, mut f: F) -> Connection<U>
    where
        F: FnMut(T) -> U,
    {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|e| Edge {
                    cursor: e.cursor,
                    node: f(e.node),
                })
                .collect(),
            page_info: self.page_info,
        }
    }
}

impl<C: Collection> CursorPaginator<C> {
    /// Fetch a page and shape it as a connection in one step.
    pub fn connection(&self, request: &PageRequest) -> crate::Result<Connection<C::Record>> {
        let page = self.page(request)?;
        Connection::from_page(self, page)
    }
}
