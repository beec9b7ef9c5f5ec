//! In-memory collaborators shared by the pipeline tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::time::Instant;
use uuid::Uuid;

use crate::transformer::FilmTransformer;
use film_indexer_repository::{
    BulkItemResult, BulkSummary, CheckpointError, CheckpointStore, FilmWorkSource,
    FilmWorkStream, SearchError, SearchIndexProvider, SourceError,
};
use film_indexer_shared::{Batch, BulkAction, FilmDocument, RawFilmWork, Watermark};

pub fn watermark(value: &str) -> Watermark {
    Watermark::parse(value).unwrap()
}

/// A film work with one genre and no persons.
pub fn film_work(title: &str, modified_at: &str) -> RawFilmWork {
    RawFilmWork {
        id: Uuid::new_v4(),
        title: title.to_string(),
        rating: None,
        description: None,
        modified_at: watermark(modified_at).as_datetime(),
        genres: vec!["Drama".to_string()],
        persons: vec![],
    }
}

/// A batch holding one document per `(title, modified_at)` pair.
pub fn batch_of(films: &[(&str, &str)]) -> Batch {
    let mut batch = Batch::new();
    for (title, modified_at) in films {
        let record = film_work(title, modified_at);
        let candidate = record.watermark();
        let action = BulkAction::index("movies", record.id);
        batch.push(action, FilmTransformer::transform(record), candidate);
    }
    batch
}

/// Source serving a fixed set of film works.
pub struct MemoryFilmWorkSource {
    records: Vec<RawFilmWork>,
    failure: Mutex<Option<(usize, SourceError)>>,
}

impl MemoryFilmWorkSource {
    pub fn new(records: Vec<RawFilmWork>) -> Self {
        Self {
            records,
            failure: Mutex::new(None),
        }
    }

    /// Fail the next extraction with `error` after `count` records.
    pub fn failing_after(self, count: usize, error: SourceError) -> Self {
        *self.failure.lock().unwrap() = Some((count, error));
        self
    }
}

#[async_trait]
impl FilmWorkSource for MemoryFilmWorkSource {
    fn changed_since(&self, since: Watermark) -> FilmWorkStream<'_> {
        let mut records: Vec<RawFilmWork> = self
            .records
            .iter()
            .filter(|r| r.watermark() > since)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.modified_at.cmp(&b.modified_at).then(a.id.cmp(&b.id)));

        let mut items: Vec<Result<RawFilmWork, SourceError>> =
            records.into_iter().map(Ok).collect();
        if let Some((count, error)) = self.failure.lock().unwrap().take() {
            items.truncate(count);
            items.push(Err(error));
        }

        futures::stream::iter(items).boxed()
    }

    async fn ping(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Search index keeping documents in a map keyed by id.
#[derive(Default)]
pub struct MockSearchIndex {
    scripted: Mutex<VecDeque<SearchError>>,
    bootstrap_failures: Mutex<VecDeque<SearchError>>,
    attempt_times: Mutex<Vec<Instant>>,
    documents: Mutex<HashMap<String, FilmDocument>>,
    rejected: Mutex<HashSet<String>>,
    index_created: Mutex<bool>,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next bulk request with `error`. Calls queue up in order.
    pub fn fail_next(&self, error: SearchError) {
        self.scripted.lock().unwrap().push_back(error);
    }

    /// Fail the next index bootstrap with `error`.
    pub fn fail_next_bootstrap(&self, error: SearchError) {
        self.bootstrap_failures.lock().unwrap().push_back(error);
    }

    /// Reject the document with this id on every bulk request.
    pub fn reject(&self, id: impl Into<String>) {
        self.rejected.lock().unwrap().insert(id.into());
    }

    /// Number of bulk requests received, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempt_times.lock().unwrap().len()
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.attempt_times.lock().unwrap().clone()
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn document(&self, id: &str) -> Option<FilmDocument> {
        self.documents.lock().unwrap().get(id).cloned()
    }

    pub fn index_created(&self) -> bool {
        *self.index_created.lock().unwrap()
    }
}

#[async_trait]
impl SearchIndexProvider for MockSearchIndex {
    async fn bulk_index(&self, batch: &Batch) -> Result<BulkSummary, SearchError> {
        self.attempt_times.lock().unwrap().push(Instant::now());

        if let Some(error) = self.scripted.lock().unwrap().pop_front() {
            return Err(error);
        }

        let rejected = self.rejected.lock().unwrap();
        let mut documents = self.documents.lock().unwrap();
        let results = batch
            .entries()
            .iter()
            .map(|(action, document)| {
                let id = action.id();
                if rejected.contains(id) {
                    BulkItemResult::failure(
                        id,
                        serde_json::json!({"type": "mapper_parsing_exception"}),
                    )
                } else {
                    documents.insert(id.to_string(), document.clone());
                    BulkItemResult::success(id)
                }
            })
            .collect();

        Ok(BulkSummary::from_results(results))
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchError> {
        if let Some(error) = self.bootstrap_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        *self.index_created.lock().unwrap() = true;
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(true)
    }
}

/// Checkpoint store backed by a map.
#[derive(Default)]
pub struct MemoryCheckpointStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn get(&self, key: &str) -> Result<Option<String>, CheckpointError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CheckpointError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
