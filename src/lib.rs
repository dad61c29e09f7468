//! Hash-indexed name catalogue resolver for content-addressed archives.
//!
//! ## Scope
//! Archive formats in this family identify stored items only by an opaque
//! 64-bit name hash. This crate resolves those hashes back to readable
//! names by ingesting an externally supplied name catalogue (a flat text
//! list of file paths), normalizing and hashing each name, and building an
//! immutable hash → name index.
//!
//! ## Key invariants
//! - Streaming reads happen through a fixed-capacity window; caller
//!   destinations are never overrun, even when lines straddle refills.
//! - A failed refill ends the stream silently: a truncated or partially
//!   unreadable catalogue yields fewer entries, never garbled ones.
//! - Normalization (ASCII uppercase, backslash separators) affects hashing
//!   only; stored display names keep their original bytes.
//! - A build either yields a complete catalogue or nothing; partial builds
//!   are discarded as one unit.
//!
//! ## Flow
//! `path or buffer -> EntryStream -> trimmed lines -> CatalogBuilder ->
//! NameCatalog -> name_for_hash`
//!
//! ## Notable entry points
//! - [`build_from_path`]: one-call catalogue construction from a file.
//! - [`EntryStream`]: line-at-a-time iteration with glob filtering.
//! - [`CatalogBuilder`] / [`NameCatalog`]: manual accumulation and lookup.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hash;
pub mod source;
pub mod stream;
pub mod wildcard;

pub use cache::LineCache;
pub use catalog::{build_from_path, build_from_source, CatalogBuilder, Entries, NameCatalog};
pub use config::{CatalogConfig, ConfigError};
pub use error::CatalogError;
pub use source::{ByteSource, FileSource};
pub use stream::EntryStream;
pub use wildcard::wildcard_match;
