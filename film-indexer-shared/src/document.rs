//! Search documents and the bulk action headers that route them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a person inside a film document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: Uuid,
    pub name: String,
}

/// Denormalized film work as stored in the search index.
///
/// List fields are always serialized, empty or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmDocument {
    pub id: Uuid,
    pub imdb_rating: Option<f64>,
    pub genre: Vec<String>,
    pub title: String,
    pub description: Option<String>,
    /// Director names joined with `", "`.
    pub director: String,
    pub actors_names: Vec<String>,
    pub writers_names: Vec<String>,
    pub actors: Vec<PersonRef>,
    pub writers: Vec<PersonRef>,
}

/// Target of a bulk `index` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTarget {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
}

/// Header line that precedes each document in a bulk request.
///
/// Serializes as `{"index": {"_index": "<name>", "_id": "<id>"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAction {
    pub index: IndexTarget,
}

impl BulkAction {
    /// Index (create or replace) the document with the given id.
    pub fn index(index_name: impl Into<String>, id: impl ToString) -> Self {
        Self {
            index: IndexTarget {
                index: index_name.into(),
                id: id.to_string(),
            },
        }
    }

    /// Document id the action targets.
    pub fn id(&self) -> &str {
        &self.index.id
    }
}
