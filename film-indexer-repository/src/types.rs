//! Response types for search index operations.

use serde_json::Value;

use crate::errors::SearchError;

/// Result of a bulk operation for a single document.
///
/// A document succeeded when the index reported no `error` for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemResult {
    /// The document id the item refers to.
    pub id: String,
    /// HTTP status reported for the item, when present.
    pub status: Option<u16>,
    /// Error payload if the document was rejected.
    pub error: Option<Value>,
}

impl BulkItemResult {
    /// A successful item.
    pub fn success(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Some(200),
            error: None,
        }
    }

    /// A rejected item.
    pub fn failure(id: impl Into<String>, error: Value) -> Self {
        Self {
            id: id.into(),
            status: Some(400),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a bulk operation containing aggregate statistics and individual results.
///
/// Results are in submission order, so `results[i]` belongs to the i-th
/// document of the batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkSummary {
    /// Total number of items in the response.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BulkItemResult>,
}

impl BulkSummary {
    /// Build a summary from individual results.
    pub fn from_results(results: Vec<BulkItemResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Parse the JSON body returned by the `_bulk` endpoint.
    ///
    /// Each entry of `items` is keyed by its action name (`index`, `create`,
    /// ...); the action key is not checked.
    pub fn from_response(body: &Value) -> Result<Self, SearchError> {
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| SearchError::parse("Bulk response has no items array"))?;

        let results = items
            .iter()
            .map(|item| {
                let outcome = item
                    .as_object()
                    .and_then(|actions| actions.values().next())
                    .ok_or_else(|| SearchError::parse(format!("Malformed bulk item: {}", item)))?;

                Ok(BulkItemResult {
                    id: outcome
                        .get("_id")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    status: outcome
                        .get("status")
                        .and_then(Value::as_u64)
                        .and_then(|s| u16::try_from(s).ok()),
                    error: outcome.get("error").filter(|e| !e.is_null()).cloned(),
                })
            })
            .collect::<Result<Vec<_>, SearchError>>()?;

        Ok(Self::from_results(results))
    }

    /// Whether at least one document was accepted.
    pub fn any_succeeded(&self) -> bool {
        self.succeeded > 0
    }

    /// Whether every document was accepted.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Results for rejected documents.
    pub fn failures(&self) -> impl Iterator<Item = &BulkItemResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}
