//! Virtual environment builder.
//!
//! Commands pass project paths; this module creates the environment,
//! installs manifest dependencies, and returns interpreter paths. The
//! runner receives only `RuntimePaths`.

pub mod builder;
