//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the film search index.

use serde_json::{json, Value};

/// The default name of the search index.
pub const DEFAULT_INDEX_NAME: &str = "movies";

/// Index name plus the settings used when the index has to be created.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub name: String,
}

impl IndexConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Settings and mappings for the film search index.
    ///
    /// - Text fields go through a shared English analyzer; `title` keeps a
    ///   `raw` keyword sub-field for sorting and exact matches
    /// - `genre` and ids are keywords for filtering
    /// - `actors` and `writers` are nested so id/name pairs stay together
    pub fn settings(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": 1,
                "number_of_replicas": 1,
                "refresh_interval": "1s",
                "analysis": {
                    "analyzer": {
                        "film_analyzer": {
                            "type": "custom",
                            "tokenizer": "standard",
                            "filter": ["lowercase", "english_stop", "english_stemmer"]
                        }
                    },
                    "filter": {
                        "english_stop": {"type": "stop", "stopwords": "_english_"},
                        "english_stemmer": {"type": "stemmer", "language": "english"}
                    }
                }
            },
            "mappings": {
                "dynamic": "strict",
                "properties": {
                    "id": {"type": "keyword"},
                    "imdb_rating": {"type": "float"},
                    "genre": {"type": "keyword"},
                    "title": {
                        "type": "text",
                        "analyzer": "film_analyzer",
                        "fields": {"raw": {"type": "keyword"}}
                    },
                    "description": {"type": "text", "analyzer": "film_analyzer"},
                    "director": {"type": "text", "analyzer": "film_analyzer"},
                    "actors_names": {"type": "text", "analyzer": "film_analyzer"},
                    "writers_names": {"type": "text", "analyzer": "film_analyzer"},
                    "actors": person_mapping(),
                    "writers": person_mapping()
                }
            }
        })
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

fn person_mapping() -> Value {
    json!({
        "type": "nested",
        "dynamic": "strict",
        "properties": {
            "id": {"type": "keyword"},
            "name": {"type": "text", "analyzer": "film_analyzer"}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = IndexConfig::default().settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["analysis"]["analyzer"]["film_analyzer"].is_object());

        let properties = &settings["mappings"]["properties"];
        assert_eq!(properties["id"]["type"], "keyword");
        assert_eq!(properties["imdb_rating"]["type"], "float");
        assert_eq!(properties["genre"]["type"], "keyword");
        assert_eq!(properties["title"]["fields"]["raw"]["type"], "keyword");
        assert_eq!(properties["actors"]["type"], "nested");
        assert_eq!(properties["writers"]["properties"]["id"]["type"], "keyword");
    }

    #[test]
    fn test_index_name() {
        assert_eq!(IndexConfig::default().name, "movies");
        assert_eq!(IndexConfig::new("films").name, "films");
    }
}
