//! Pagination settings

use serde::Deserialize;

/// Hard ceiling for `first`/`last` unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Settings shared by paginators and GraphQL pagination arguments.
///
/// Deserializes from any serde source (service config files, env layers).
/// Missing keys fall back to [`PaginationConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a query passes neither `first` nor `last`.
    /// `None` returns the whole collection.
    pub default_page_size: Option<usize>,

    /// Largest accepted `first`/`last`.
    pub max_page_size: usize,

    /// Unique field appended to every ordering, e.g. `"id"`.
    pub tiebreak_field: Option<String>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: None,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            tiebreak_field: None,
        }
    }
}

impl PaginationConfig {
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = Some(size);
        self
    }

    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    pub fn with_tiebreak(mut self, field: impl Into<String>) -> Self {
        self.tiebreak_field = Some(field.into());
        self
    }

    /// Validate settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_page_size == 0 {
            return Err(crate::Error::InvalidArguments(
                "'max_page_size' must be positive".to_string(),
            ));
        }

        if let Some(size) = self.default_page_size {
            if size > self.max_page_size {
                return Err(crate::Error::InvalidArguments(format!(
                    "'default_page_size' ({size}) cannot exceed 'max_page_size' ({})",
                    self.max_page_size
                )));
            }
        }

        if let Some(field) = &self.tiebreak_field {
            crate::record::FieldPath::parse(field)?;
        }

        Ok(())
    }
}
