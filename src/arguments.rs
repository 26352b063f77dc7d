//! Pagination arguments for GraphQL fields

use async_graphql::InputObject;

use crate::config::PaginationConfig;
use crate::paginator::PageRequest;

/// Pagination input for GraphQL queries
///
/// Follows the Relay Cursor Connections Specification:
/// https://relay.dev/graphql/connections.htm
///
/// When both `first` and `last` are given, `first` wins.
#[derive(InputObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationInput {
    /// Number of items to return (forward pagination)
    pub first: Option<i32>,

    /// Cursor to start after (forward pagination)
    pub after: Option<String>,

    /// Number of items to return (backward pagination)
    pub last: Option<i32>,

    /// Cursor to end before (backward pagination)
    pub before: Option<String>,
}

impl PaginationInput {
    /// Validate pagination input against `config`
    pub fn validate(&self, config: &PaginationConfig) -> crate::Result<()> {
        check_size("first", self.first, config.max_page_size)?;
        check_size("last", self.last, config.max_page_size)?;
        Ok(())
    }

    /// Validate and convert into a [`PageRequest`].
    ///
    /// Without `first` or `last`, the configured default page size is
    /// applied as `first`, or as `last` when only `before` is given.
    pub fn into_request(self, config: &PaginationConfig) -> crate::Result<PageRequest> {
        self.validate(config)?;

        let mut request = PageRequest {
            first: self.first.map(to_size),
            last: self.last.map(to_size),
            after: self.after,
            before: self.before,
        };

        if request.first.is_none() && request.last.is_none() {
            if let Some(size) = config.default_page_size {
                if request.before.is_some() && request.after.is_none() {
                    request.last = Some(size);
                } else {
                    request.first = Some(size);
                }
            }
        }

        Ok(request)
    }
}

fn check_size(name: &str, value: Option<i32>, max: usize) -> crate::Result<()> {
    let Some(value) = value else {
        return Ok(());
    };

    if value < 0 {
        return Err(crate::Error::InvalidArguments(format!(
            "'{name}' must be non-negative"
        )));
    }
    if to_size(value) > max {
        return Err(crate::Error::InvalidArguments(format!(
            "'{name}' cannot exceed {max}"
        )));
    }
    Ok(())
}

fn to_size(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(first: Option<i32>, last: Option<i32>) -> PaginationInput {
        PaginationInput {
            first,
            last,
            ..PaginationInput::default()
        }
    }

    #[test]
    fn test_validate_bounds() {
        let config = PaginationConfig::default();
        assert!(input(Some(0), None).validate(&config).is_ok());
        assert!(input(Some(100), None).validate(&config).is_ok());
        assert!(input(Some(-1), None).validate(&config).is_err());
        assert!(input(None, Some(101)).validate(&config).is_err());
        assert!(matches!(
            input(None, Some(-5)).validate(&config),
            Err(crate::Error::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_first_and_last_both_allowed() {
        let request = input(Some(2), Some(3))
            .into_request(&PaginationConfig::default())
            .unwrap();
        assert_eq!(request.first, Some(2));
        assert_eq!(request.last, Some(3));
    }

    #[test]
    fn test_default_page_size() {
        let config = PaginationConfig::default().with_default_page_size(20);

        let request = PaginationInput::default().into_request(&config).unwrap();
        assert_eq!(request, PageRequest::first(20));

        let backward = PaginationInput {
            before: Some("cursor".to_string()),
            ..PaginationInput::default()
        };
        let request = backward.into_request(&config).unwrap();
        assert_eq!(request, PageRequest::last(20).before("cursor"));

        let request = PaginationInput::default()
            .into_request(&PaginationConfig::default())
            .unwrap();
        assert_eq!(request, PageRequest::all());
    }
}
