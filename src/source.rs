//! Loading pages from a store
//!
//! A list resolver implements [`PageSource`] over its store query and calls
//! [`load_page`]; limit defaulting, cursor decoding and connection assembly
//! then happen the same way for every list field.

use async_trait::async_trait;

use crate::config::PaginationConfig;
use crate::cursor::{CursorRecord, ResumePoint, SortOrder};
use crate::pagination::{paginate, Connection, PaginationInput};
use crate::Result;

/// Store-backed, ordered record set
#[async_trait]
pub trait PageSource: Send + Sync {
    type Record: CursorRecord + Send;

    /// Field the set is sorted by and cursors are built from
    fn cursor_field(&self) -> &str;

    fn order(&self) -> SortOrder {
        SortOrder::Descending
    }

    /// Fetch up to `limit` records sorted by `(cursor_field, id)` in
    /// [`order`](Self::order), keeping only those `after` admits
    ///
    /// Store failures should be reported as [`GraphQLError::Source`](crate::GraphQLError::Source).
    async fn fetch(&self, after: Option<&ResumePoint>, limit: usize) -> Result<Vec<Self::Record>>;

    /// Size of the whole filtered set, if this field exposes `totalCount`
    async fn total_count(&self) -> Result<Option<i64>> {
        Ok(None)
    }
}

/// Resolve one page of `source` for the client's pagination arguments
pub async fn load_page<S: PageSource>(
    source: &S,
    input: &PaginationInput,
    config: &PaginationConfig,
) -> Result<Connection<S::Record>> {
    let limit = input.limit(config)?;
    let after = input.resume_point()?;

    tracing::debug!(
        field = source.cursor_field(),
        limit,
        resumed = after.is_some(),
        "fetching page"
    );

    let records = source.fetch(after.as_ref(), limit).await?;
    let connection = paginate(records, source.cursor_field(), limit)?;

    Ok(match source.total_count().await? {
        Some(total) => connection.with_total_count(total),
        None => connection,
    })
}
