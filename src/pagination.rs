//! Relay-style cursor pagination

use std::borrow::Cow;

use async_graphql::{InputObject, Object, OutputType, SimpleObject, TypeName};

use crate::config::PaginationConfig;
use crate::cursor::{CursorRecord, ResumePoint};
use crate::{GraphQLError, Result};

/// Page information
#[derive(SimpleObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// Edge in a connection
#[derive(Debug, Clone)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[Object(name_type)]
impl<T: OutputType> Edge<T> {
    async fn cursor(&self) -> &str {
        &self.cursor
    }

    async fn node(&self) -> &T {
        &self.node
    }
}

impl<T: OutputType> TypeName for Edge<T> {
    fn type_name() -> Cow<'static, str> {
        format!("{}Edge", T::type_name()).into()
    }
}

/// Connection (paginated result)
#[derive(Debug, Clone)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    /// Size of the whole filtered set, counted separately from the page
    pub total_count: Option<i64>,
}

#[Object(name_type)]
impl<T: OutputType> Connection<T> {
    async fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    async fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    async fn total_count(&self) -> Option<i64> {
        self.total_count
    }
}

impl<T: OutputType> TypeName for Connection<T> {
    fn type_name() -> Cow<'static, str> {
        format!("{}Connection", T::type_name()).into()
    }
}

impl<T> Connection<T> {
    /// Create empty connection
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: None,
        }
    }

    /// Attach the separately counted size of the filtered set
    pub fn with_total_count(mut self, total: i64) -> Self {
        self.total_count = Some(total);
        self
    }

    /// Nodes in page order
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

/// Assemble a connection from a batch the caller already sorted, filtered and limited
///
/// `has_next_page` is set when the batch fills the page. A batch longer than
/// `limit` (a caller fetching `limit + 1` to look ahead) is cut back to `limit`.
/// Edges keep the input order.
pub fn paginate<T: CursorRecord>(
    mut records: Vec<T>,
    field: &str,
    limit: usize,
) -> Result<Connection<T>> {
    if limit == 0 {
        return Err(GraphQLError::InvalidLimit(
            "'limit' must be positive".to_string(),
        ));
    }

    let has_next_page = records.len() >= limit;
    records.truncate(limit);

    let edges = records
        .into_iter()
        .map(|node| {
            let cursor = node.resume_point(field)?.encode();
            Ok(Edge { cursor, node })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(field, limit, edges = edges.len(), has_next_page, "assembled page");

    let start_cursor = edges.first().map(|e| e.cursor.clone());
    let end_cursor = edges.last().map(|e| e.cursor.clone());

    Ok(Connection {
        edges,
        page_info: PageInfo {
            has_next_page,
            start_cursor,
            end_cursor,
        },
        total_count: None,
    })
}

/// Pagination arguments accepted by every list field
#[derive(InputObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationInput {
    /// Cursor to resume after (an `endCursor` from a previous page)
    pub after: Option<String>,

    /// Number of items to return
    pub limit: Option<i32>,
}

impl PaginationInput {
    pub fn new(after: Option<String>, limit: Option<i32>) -> Self {
        Self { after, limit }
    }

    /// Page size to fetch, defaulted and capped by `config`
    pub fn limit(&self, config: &PaginationConfig) -> Result<usize> {
        match self.limit {
            None => Ok(config.default_limit),
            Some(limit) if limit <= 0 => Err(GraphQLError::InvalidLimit(format!(
                "'limit' must be positive, got {limit}"
            ))),
            Some(limit) => Ok((limit as usize).min(config.max_limit)),
        }
    }

    /// Decode `after`, if present
    pub fn resume_point(&self) -> Result<Option<ResumePoint>> {
        self.after.as_deref().map(ResumePoint::decode).transpose()
    }
}
