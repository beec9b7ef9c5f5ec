//! # Film Indexer Shared
//!
//! Types that flow between the extractor, transformer and loader stages of
//! the film indexer, plus the watermark that ties runs together.

pub mod batch;
pub mod document;
pub mod film_work;
pub mod watermark;

pub use batch::Batch;
pub use document::{BulkAction, FilmDocument, PersonRef};
pub use film_work::{PersonEntry, RawFilmWork, Role, UnknownRole};
pub use watermark::{Watermark, WatermarkParseError};
