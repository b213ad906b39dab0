//! Port trait definitions
//!
//! These traits define the query surface that catalog implementations provide.

pub mod catalog;

pub use catalog::Catalog;
