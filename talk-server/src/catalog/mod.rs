//! Catalog facade over the upstream adapter.
//!
//! Composes the parsers, the expiring cache, and the teacher directory into
//! the five operations the web layer serves.

mod facade;


pub use facade::Catalog;
