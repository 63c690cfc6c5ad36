use serde::{Deserialize, Serialize};

/// One page of a list call.
///
/// Paginated endpoints return an opaque `cursor` when more pages are
/// available. Non-paginated collections (status, statistics, interfaces)
/// share the same envelope and never carry a cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<i64>,
}

impl<T> ListResult<T> {
    /// Create a final page (no continuation cursor).
    pub fn last(results: Vec<T>) -> Self {
        Self {
            results,
            cursor: None,
            result_count: None,
        }
    }

    /// Create a page followed by another one.
    pub fn with_cursor(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            results,
            cursor: Some(cursor.into()),
            result_count: None,
        }
    }

    /// The cursor to request the next page with, if any.
    ///
    /// NSX returns either no cursor or an empty string on the last page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}
