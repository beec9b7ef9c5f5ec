//! Film transformer implementation.
//!
//! Turns raw film works into documents for the search index and collects
//! them into fixed-size batches. Performs no I/O.

use tracing::{debug, instrument, warn};

use film_indexer_shared::{
    Batch, BulkAction, FilmDocument, PersonEntry, PersonRef, RawFilmWork, Role,
};

/// Default number of film works per batch (200 bulk lines).
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Persons of one film work bucketed by role.
#[derive(Debug, Default)]
struct Crew {
    directors: Vec<String>,
    actors: Vec<PersonRef>,
    writers: Vec<PersonRef>,
}

impl Crew {
    fn from_entries(film_id: &uuid::Uuid, entries: Vec<PersonEntry>) -> Self {
        let mut crew = Crew::default();

        for entry in entries {
            let role = match entry.role() {
                Some(Ok(role)) => role,
                Some(Err(e)) => {
                    warn!(film_id = %film_id, person_id = %entry.id, error = %e, "Skipping person with unknown role");
                    continue;
                }
                None => {
                    debug!(film_id = %film_id, person_id = %entry.id, "Skipping person without role");
                    continue;
                }
            };

            match role {
                Role::Director => crew.directors.push(entry.name),
                Role::Actor => crew.actors.push(PersonRef {
                    id: entry.id,
                    name: entry.name,
                }),
                Role::Writer => crew.writers.push(PersonRef {
                    id: entry.id,
                    name: entry.name,
                }),
            }
        }

        crew
    }
}

/// Transformer that reshapes film works and batches them for bulk loading.
pub struct FilmTransformer {
    index_name: String,
    batch_size: usize,
    current: Batch,
}

impl FilmTransformer {
    /// Create a transformer that targets `index_name`.
    ///
    /// `batch_size` is the number of film works per batch; zero is treated as one.
    pub fn new(index_name: impl Into<String>, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            index_name: index_name.into(),
            batch_size,
            current: Batch::with_capacity(batch_size),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Reshape a raw film work into its search document.
    pub fn transform(record: RawFilmWork) -> FilmDocument {
        let crew = Crew::from_entries(&record.id, record.persons);

        FilmDocument {
            id: record.id,
            imdb_rating: record.rating,
            genre: record.genres,
            title: record.title,
            description: record.description,
            director: crew.directors.join(", "),
            actors_names: crew.actors.iter().map(|p| p.name.clone()).collect(),
            writers_names: crew.writers.iter().map(|p| p.name.clone()).collect(),
            actors: crew.actors,
            writers: crew.writers,
        }
    }

    /// Add a film work to the batch in progress.
    ///
    /// Returns the batch once it holds `batch_size` film works; a new empty
    /// batch is started in its place.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub fn push(&mut self, record: RawFilmWork) -> Option<Batch> {
        let watermark = record.watermark();
        let document = Self::transform(record);
        let action = BulkAction::index(self.index_name.as_str(), document.id);

        self.current.push(action, document, watermark);

        if self.current.len() >= self.batch_size {
            debug!(documents = self.current.len(), "Batch full");
            Some(self.take())
        } else {
            None
        }
    }

    /// Hand over the batch in progress, full or not, possibly empty.
    pub fn finish(&mut self) -> Batch {
        debug!(documents = self.current.len(), "Flushing final batch");
        self.take()
    }

    fn take(&mut self) -> Batch {
        std::mem::replace(&mut self.current, Batch::with_capacity(self.batch_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{film_work, watermark};
    use uuid::Uuid;

    #[test]
    fn test_role_bucketing() {
        let director = Uuid::new_v4();
        let actor = Uuid::new_v4();
        let writer = Uuid::new_v4();
        let mut record = film_work("Heat", "2021-01-01T00:00:00Z");
        record.persons = vec![
            PersonEntry::new(Some(Role::Director), director, "A"),
            PersonEntry::new(Some(Role::Actor), actor, "B"),
            PersonEntry::new(Some(Role::Writer), writer, "C"),
        ];

        let doc = FilmTransformer::transform(record);

        assert_eq!(doc.director, "A");
        assert_eq!(doc.actors_names, vec!["B".to_string()]);
        assert_eq!(doc.writers_names, vec!["C".to_string()]);
        assert_eq!(
            doc.actors,
            vec![PersonRef {
                id: actor,
                name: "B".to_string()
            }]
        );
        assert_eq!(
            doc.writers,
            vec![PersonRef {
                id: writer,
                name: "C".to_string()
            }]
        );
    }

    #[test]
    fn test_multiple_directors_are_comma_joined() {
        let mut record = film_work("Matrix", "2021-01-01T00:00:00Z");
        record.persons = vec![
            PersonEntry::new(Some(Role::Director), Uuid::new_v4(), "Lana Wachowski"),
            PersonEntry::new(Some(Role::Director), Uuid::new_v4(), "Lilly Wachowski"),
        ];

        let doc = FilmTransformer::transform(record);

        assert_eq!(doc.director, "Lana Wachowski, Lilly Wachowski");
        assert!(doc.actors.is_empty());
    }

    #[test]
    fn test_persons_without_known_role_are_dropped() {
        let mut record = film_work("Heat", "2021-01-01T00:00:00Z");
        record.persons = vec![
            PersonEntry::new(None, Uuid::new_v4(), "Nobody"),
            PersonEntry {
                role: Some(String::new()),
                id: Uuid::new_v4(),
                name: "Empty".to_string(),
            },
            PersonEntry {
                role: Some("composer".to_string()),
                id: Uuid::new_v4(),
                name: "Zimmer".to_string(),
            },
            PersonEntry::new(Some(Role::Actor), Uuid::new_v4(), "Pacino"),
        ];

        let doc = FilmTransformer::transform(record);

        assert_eq!(doc.actors_names, vec!["Pacino".to_string()]);
        assert!(doc.writers.is_empty());
        assert_eq!(doc.director, "");
    }

    #[test]
    fn test_empty_collections_stay_empty_lists() {
        let mut record = film_work("Silent", "2021-01-01T00:00:00Z");
        record.genres = vec![];
        record.persons = vec![];

        let doc = FilmTransformer::transform(record);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["genre"], serde_json::json!([]));
        assert_eq!(value["actors"], serde_json::json!([]));
        assert_eq!(value["writers"], serde_json::json!([]));
        assert_eq!(value["actors_names"], serde_json::json!([]));
        assert_eq!(value["writers_names"], serde_json::json!([]));
    }

    #[test]
    fn test_scalar_fields_pass_through() {
        let mut record = film_work("Heat", "2021-01-01T00:00:00Z");
        record.rating = Some(8.3);
        record.description = Some("Cops and robbers".to_string());
        record.genres = vec!["Crime".to_string(), "Drama".to_string()];
        let id = record.id;

        let doc = FilmTransformer::transform(record);

        assert_eq!(doc.id, id);
        assert_eq!(doc.title, "Heat");
        assert_eq!(doc.imdb_rating, Some(8.3));
        assert_eq!(doc.description.as_deref(), Some("Cops and robbers"));
        assert_eq!(doc.genre, vec!["Crime".to_string(), "Drama".to_string()]);
    }

    #[test]
    fn test_batches_fill_to_size_then_remainder() {
        let mut transformer = FilmTransformer::new("movies", 2);
        let mut batches = Vec::new();

        for (i, ts) in [
            "2021-01-01T00:00:00Z",
            "2021-01-02T00:00:00Z",
            "2021-01-03T00:00:00Z",
            "2021-01-04T00:00:00Z",
            "2021-01-05T00:00:00Z",
        ]
        .iter()
        .enumerate()
        {
            if let Some(batch) = transformer.push(film_work(&format!("Film {}", i), ts)) {
                batches.push(batch);
            }
        }
        batches.push(transformer.finish());

        let sizes: Vec<usize> = batches.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(batches[0].line_count(), 4);
        assert_eq!(batches[0].watermark(), Some(watermark("2021-01-02T00:00:00Z")));
        assert_eq!(batches[1].watermark(), Some(watermark("2021-01-04T00:00:00Z")));
        assert_eq!(batches[2].watermark(), Some(watermark("2021-01-05T00:00:00Z")));
    }

    #[test]
    fn test_finish_on_exact_multiple_yields_empty_batch() {
        let mut transformer = FilmTransformer::new("movies", 1);

        let first = transformer.push(film_work("Only", "2021-01-01T00:00:00Z"));
        let last = transformer.finish();

        assert_eq!(first.map(|b| b.len()), Some(1));
        assert!(last.is_empty());
        assert!(last.watermark().is_none());
    }

    #[test]
    fn test_action_targets_index_and_film_id() {
        let mut transformer = FilmTransformer::new("films", 10);
        let record = film_work("Heat", "2021-01-01T00:00:00Z");
        let id = record.id.to_string();

        assert!(transformer.push(record).is_none());
        let batch = transformer.finish();

        let (action, document) = &batch.entries()[0];
        assert_eq!(action.index.index, "films");
        assert_eq!(action.id(), id);
        assert_eq!(document.id.to_string(), id);
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        assert_eq!(FilmTransformer::new("movies", 0).batch_size(), 1);
    }
}
