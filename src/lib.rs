//! Biomedical corpus entity mining: extraction, frequency counts and keyword reports.

pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod nlp;
pub mod report;
