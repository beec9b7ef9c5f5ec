//! Raw film work rows as produced by the extraction query.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::watermark::Watermark;

/// Error returned for a role tag outside the known set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Part a person played in a film work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Director,
    Writer,
    Actor,
}

impl Role {
    /// The tag stored in the `person_film_work.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "director",
            Role::Writer => "writer",
            Role::Actor => "actor",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "director" => Ok(Role::Director),
            "writer" => Ok(Role::Writer),
            "actor" => Ok(Role::Actor),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person linked to a film work, with the role tag as stored.
///
/// The role is kept raw because the link table allows nulls; use
/// [`PersonEntry::role`] to get a typed role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonEntry {
    #[serde(default)]
    pub role: Option<String>,
    pub id: Uuid,
    pub name: String,
}

impl PersonEntry {
    pub fn new(role: Option<Role>, id: Uuid, name: impl Into<String>) -> Self {
        Self {
            role: role.map(|r| r.as_str().to_string()),
            id,
            name: name.into(),
        }
    }

    /// Typed role, `None` when the tag is null or empty.
    ///
    /// Returns an error for a non-empty tag that is not a known role.
    pub fn role(&self) -> Option<Result<Role, UnknownRole>> {
        match self.role.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(tag) => Some(tag.parse()),
        }
    }
}

/// A film work row with its genres and persons folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFilmWork {
    pub id: Uuid,
    pub title: String,
    pub rating: Option<f64>,
    pub description: Option<String>,
    /// Latest change time across the film work and its linked genres and persons.
    pub modified_at: DateTime<Utc>,
    pub genres: Vec<String>,
    pub persons: Vec<PersonEntry>,
}

impl RawFilmWork {
    /// Watermark this record moves the checkpoint to once indexed.
    pub fn watermark(&self) -> Watermark {
        Watermark::new(self.modified_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("director".parse::<Role>().unwrap(), Role::Director);
        assert_eq!(" actor ".parse::<Role>().unwrap(), Role::Actor);
        assert!("producer".parse::<Role>().is_err());
    }

    #[test]
    fn test_person_entry_role() {
        let id = Uuid::new_v4();

        assert_eq!(
            PersonEntry::new(Some(Role::Writer), id, "W").role(),
            Some(Ok(Role::Writer))
        );
        assert_eq!(PersonEntry::new(None, id, "N").role(), None);

        let empty = PersonEntry {
            role: Some("  ".to_string()),
            id,
            name: "E".to_string(),
        };
        assert_eq!(empty.role(), None);

        let unknown = PersonEntry {
            role: Some("composer".to_string()),
            id,
            name: "C".to_string(),
        };
        assert!(matches!(unknown.role(), Some(Err(_))));
    }

    #[test]
    fn test_person_entry_deserialize_null_role() {
        let json = r#"{"role": null, "id": "550e8400-e29b-41d4-a716-446655440000", "name": "Anon"}"#;
        let entry: PersonEntry = serde_json::from_str(json).unwrap();

        assert!(entry.role.is_none());
        assert_eq!(entry.name, "Anon");
    }
}
