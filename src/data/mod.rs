//! Corpus, metadata and cache access layer.

pub mod corpus;
pub mod metadata;
pub mod store;
