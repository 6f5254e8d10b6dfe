//! # obra-graphql
//!
//! GraphQL pagination library for the Obra art platform.
//!
//! ## Features
//!
//! - **Cursor Codec** - opaque value cursors with `(value, id)` tiebreaks
//! - **Relay Connections** - `edges`, `pageInfo` and `totalCount` for any node type
//! - **Page Loading** - one code path for every list field via [`PageSource`]
//! - **Axum Handler** - GraphQL endpoint carrying the page size configuration
//!
//! ## Usage
//!
//! ```rust
//! use obra_graphql::{paginate, CursorRecord, ResumePoint};
//!
//! struct Post {
//!     id: String,
//!     date: String,
//! }
//!
//! impl CursorRecord for Post {
//!     fn cursor_value(&self, field: &str) -> Option<String> {
//!         (field == "date").then(|| self.date.clone())
//!     }
//!
//!     fn cursor_id(&self) -> String {
//!         self.id.clone()
//!     }
//! }
//!
//! let posts = vec![Post { id: "p1".into(), date: "2021-08-14T09:00:00.000Z".into() }];
//! let connection = paginate(posts, "date", 10).unwrap();
//! assert!(!connection.page_info.has_next_page);
//!
//! let end = ResumePoint::decode(connection.page_info.end_cursor.as_deref().unwrap()).unwrap();
//! assert_eq!(end.value, "2021-08-14T09:00:00.000Z");
//! ```

pub mod config;
pub mod cursor;
pub mod pagination;
pub mod server;
pub mod source;

pub use config::PaginationConfig;
pub use cursor::{timestamp_value, CursorCodec, CursorRecord, ResumePoint, SortOrder};
pub use pagination::{paginate, Connection, Edge, PageInfo, PaginationInput};
pub use server::{graphql_handler, pagination_config};
pub use source::{load_page, PageSource};

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// GraphQL errors
#[derive(Error, Debug)]
pub enum GraphQLError {
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Pagination error: {0}")]
    PaginationError(String),

    #[error("Source error: {0}")]
    Source(String),
}

impl GraphQLError {
    /// Machine-readable code reported in `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            GraphQLError::InvalidCursor(_) => "INVALID_CURSOR",
            GraphQLError::InvalidLimit(_) => "INVALID_LIMIT",
            GraphQLError::PaginationError(_) => "PAGINATION_ERROR",
            GraphQLError::Source(_) => "SOURCE_ERROR",
        }
    }
}

impl ErrorExtensions for GraphQLError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Result type for GraphQL operations
pub type Result<T> = std::result::Result<T, GraphQLError>;
