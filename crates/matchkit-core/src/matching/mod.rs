//! Candidate matching engine.
//!
//! Target positions are described as a set of named criteria; each criteria
//! maps to a `Specification` and all specifications for a position are
//! chained with AND. Evaluation prints one verdict line per candidate plus
//! an explanation for the first failed criteria.

pub mod constants;
pub mod error;
pub mod specifications;
pub mod util;

pub use error::CriteriaError;
pub use specifications::{chain_specifications_for_position, Specification};
