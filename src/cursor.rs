//! Opaque pagination cursors
//!
//! Cursors are value cursors: they carry the sort-field value of a record, not
//! its offset, so inserts and deletes elsewhere in the ordered set do not shift
//! the next page. Every cursor minted here is composite (value plus record id)
//! so records sharing a value are never skipped or repeated.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{GraphQLError, Result};

/// Cursor encoding/decoding
pub struct CursorCodec;

impl CursorCodec {
    /// Encode a raw field value to base64
    pub fn encode(value: &str) -> String {
        BASE64.encode(value.as_bytes())
    }

    /// Decode a raw field value from base64
    ///
    /// Empty tokens are rejected: they never name a usable position.
    pub fn decode(cursor: &str) -> Result<String> {
        if cursor.is_empty() {
            return Err(GraphQLError::InvalidCursor("empty cursor".to_string()));
        }
        let bytes = BASE64
            .decode(cursor.as_bytes())
            .map_err(|e| GraphQLError::InvalidCursor(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| GraphQLError::InvalidCursor(e.to_string()))
    }

    /// Encode structured cursor (e.g., timestamp + ID)
    pub fn encode_structured<T: Serialize>(value: &T) -> Result<String> {
        let json =
            serde_json::to_string(value).map_err(|e| GraphQLError::InvalidCursor(e.to_string()))?;
        Ok(BASE64.encode(json.as_bytes()))
    }

    /// Decode structured cursor
    pub fn decode_structured<T: for<'de> Deserialize<'de>>(cursor: &str) -> Result<T> {
        let json = Self::decode(cursor)?;
        serde_json::from_str(&json).map_err(|e| GraphQLError::InvalidCursor(e.to_string()))
    }
}

/// Direction the caller's store query sorts the cursor field in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first (`date`, `dateIssued`); resume with `<`
    #[default]
    Descending,
    /// Alphabetical (`name`); resume with `>`
    Ascending,
}

/// Position to resume strictly after
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumePoint {
    #[serde(rename = "v")]
    pub value: String,
    /// Tiebreak id. `None` for tokens minted by the single-field format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ResumePoint {
    pub fn new(value: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            id: Some(id.into()),
        }
    }

    /// Resume point carrying only the sort-field value
    pub fn legacy(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            id: None,
        }
    }

    /// Encode as an opaque client-facing token
    pub fn encode(&self) -> String {
        match &self.id {
            // Serializing two strings cannot fail
            Some(_) => CursorCodec::encode_structured(self)
                .unwrap_or_else(|_| CursorCodec::encode(&self.value)),
            None => CursorCodec::encode(&self.value),
        }
    }

    /// Decode a client-supplied token
    ///
    /// Tokens that decode to plain text rather than a composite object are
    /// read as single-field resume points, so links handed out before the
    /// composite format keep working.
    pub fn decode(token: &str) -> Result<Self> {
        let raw = CursorCodec::decode(token).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected pagination cursor");
        })?;

        match serde_json::from_str::<ResumePoint>(&raw) {
            Ok(point) if point.id.is_some() => Ok(point),
            _ => Ok(Self::legacy(raw)),
        }
    }

    /// Whether a record at `(value, id)` lies strictly after this point
    pub fn admits(&self, order: SortOrder, value: &str, id: &str) -> bool {
        let ordering = match &self.id {
            Some(own_id) => (value, id).cmp(&(self.value.as_str(), own_id.as_str())),
            None => value.cmp(self.value.as_str()),
        };
        match order {
            SortOrder::Descending => ordering.is_lt(),
            SortOrder::Ascending => ordering.is_gt(),
        }
    }
}

/// Render a timestamp so that string order matches chronological order
pub fn timestamp_value(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A record that can be positioned by a cursor
pub trait CursorRecord {
    /// Raw value of the named cursor field, `None` if the record has no such field
    fn cursor_value(&self, field: &str) -> Option<String>;

    /// Unique identifier used to break ties between equal cursor values
    fn cursor_id(&self) -> String;

    /// Resume point just after this record
    fn resume_point(&self, field: &str) -> Result<ResumePoint> {
        let value = self.cursor_value(field).ok_or_else(|| {
            GraphQLError::PaginationError(format!("record has no cursor field `{field}`"))
        })?;
        Ok(ResumePoint::new(value, self.cursor_id()))
    }
}
