//! Talk catalog server.
//!
//! Serves a normalized talk/teacher catalog backed by an upstream site that
//! has no public structured API for most of its content: listings are
//! scraped from HTML, retreat listings come from RSS feeds, and talk/teacher
//! detail from a minimal JSON endpoint. Expensive lookups are cached with a
//! 24-hour TTL and the teacher directory is bootstrapped once per process.

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod teachers;
pub mod upstream;
pub mod web;
