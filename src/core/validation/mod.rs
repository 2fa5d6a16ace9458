//! Validation for request payloads and filters
//!
//! Payload types derive `validator::Validate`; the custom rules they share
//! live in [`validators`]. The extractors in [`extractor`] run that validation
//! before a handler sees the payload.

pub mod extractor;
pub mod validators;

pub use extractor::{ValidatedJson, ValidatedQuery};
