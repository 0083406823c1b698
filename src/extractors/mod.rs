// src/extractors/mod.rs
pub mod contact;
pub mod name;
pub mod pagination;
pub mod selection;

// Re-export key extraction types for convenience
pub use contact::{RecordExtractor, DEFAULT_KEYWORDS};
pub use pagination::{CrawlOutcome, PaginationDriver, PaginationSettings};
pub use selection::{select_sample, summary_line};
