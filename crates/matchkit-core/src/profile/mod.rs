//! Candidate profile model: schema, normalization, experience queries.

pub mod schema;

pub use schema::{Experience, Location, Profile};
