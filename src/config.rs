//! Page size configuration

use serde::Deserialize;

use crate::{GraphQLError, Result};

/// Page sizes applied when a client omits or oversizes `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Used when the client sends no `limit`
    pub default_limit: usize,
    /// Larger client limits are clamped to this
    pub max_limit: usize,
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(GraphQLError::InvalidLimit(
                "page sizes must be positive".to_string(),
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(GraphQLError::InvalidLimit(format!(
                "default_limit {} exceeds max_limit {}",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}
