//! Infrastructure layer for JobStar.
//!
//! Contains implementations of the store and oracle traits defined in
//! `jobstar-core`: SQLite storage with an embedded migration set, an
//! in-memory store for tests and embedding, the local profile registries
//! that stand in for the external identity registry, and the configuration
//! loader.

pub mod config;
pub mod memory;
pub mod sqlite;
