//! Postgres implementation of the film work source.

mod queries;
mod source;

pub use source::{PoolConfig, PostgresFilmWorkSource};
