//! Packed-arena catalogue builder and the finalized hash → name index.
//!
//! # Invariants
//! - Arena records are self-delimiting: each header stores the record
//!   length, so a linear walk needs no external bookkeeping.
//! - Growth preserves previously stored bytes; a failed growth leaves the
//!   builder terminal.
//! - Stored display names keep their original bytes; normalization affects
//!   hashing only.
//!
//! # Design Notes
//! - Record layout: `[key: u64 LE][record_len: u32 LE][name][NUL][pad]`,
//!   padded with zeros to 8-byte alignment.
//! - Capacity grows by 1.5x, a throughput choice keeping reallocation
//!   amortized over large catalogues.
//! - Key collisions between distinct normalized names are last-write-wins,
//!   an accepted low-probability risk of the 64-bit key space.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::hash::{name_hash, normalize_name};
use crate::source::ByteSource;
use crate::stream::EntryStream;

/// Per-record header: 64-bit key plus 32-bit record length.
const ENTRY_HEADER_LEN: usize = 12;
const ENTRY_ALIGN: usize = 8;

#[inline]
fn align_up(n: usize) -> usize {
    (n + (ENTRY_ALIGN - 1)) & !(ENTRY_ALIGN - 1)
}

/// Arena footprint of a record holding a `name_len`-byte name.
#[inline]
pub(crate) fn max_record_len(name_len: usize) -> usize {
    align_up(ENTRY_HEADER_LEN + name_len + 1)
}

type NameIndex = HashMap<u64, usize, ahash::RandomState>;

/// Growable accumulator of hashed catalogue entries.
///
/// Single-writer by `&mut`; consumed by [`CatalogBuilder::finish`]. After
/// any `OutOfMemory` failure the builder is terminal and must be dropped.
pub struct CatalogBuilder {
    arena: Vec<u8>,
    /// Arena capacity governed by the 1.5x growth policy. Tracked
    /// separately from `Vec::capacity`, which may over-reserve.
    capacity: usize,
    entries: usize,
    max_name_len: usize,
    norm_buf: Vec<u8>,
}

impl CatalogBuilder {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut arena = Vec::new();
        arena
            .try_reserve_exact(config.arena_initial_capacity)
            .map_err(|_| CatalogError::OutOfMemory)?;
        Ok(Self {
            arena,
            capacity: config.arena_initial_capacity,
            entries: 0,
            max_name_len: config.max_name_len,
            norm_buf: Vec::with_capacity(config.max_name_len),
        })
    }

    /// Number of entries inserted so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Hash `name` and append its record to the arena.
    ///
    /// The stored display name keeps the original bytes; the hash is taken
    /// over the normalized form. Names longer than the configured maximum
    /// are truncated.
    pub fn insert_name(&mut self, name: &[u8]) -> Result<(), CatalogError> {
        let name = &name[..name.len().min(self.max_name_len)];
        let record_len = max_record_len(name.len());

        if self.arena.len() + record_len > self.capacity {
            let grown = (self.capacity / 2).saturating_add(self.capacity);
            let new_capacity = grown.max(self.arena.len() + record_len);
            self.arena
                .try_reserve_exact(new_capacity - self.arena.len())
                .map_err(|_| CatalogError::OutOfMemory)?;
            self.capacity = new_capacity;
        }

        normalize_name(&mut self.norm_buf, name);
        let key = name_hash(&self.norm_buf);

        let start = self.arena.len();
        self.arena.extend_from_slice(&key.to_le_bytes());
        self.arena
            .extend_from_slice(&(record_len as u32).to_le_bytes());
        self.arena.extend_from_slice(name);
        self.arena.resize(start + record_len, 0);
        self.entries += 1;
        Ok(())
    }

    /// Build the immutable index and finalize into a catalogue.
    ///
    /// The arena moves into the catalogue without copying. On index
    /// allocation failure everything is released and no catalogue exists.
    pub fn finish(self) -> Result<NameCatalog, CatalogError> {
        let mut index = NameIndex::default();
        index
            .try_reserve(self.entries)
            .map_err(|_| CatalogError::OutOfMemory)?;

        let mut offset = 0;
        while offset < self.arena.len() {
            let key = read_key(&self.arena, offset);
            if index.insert(key, offset).is_some() {
                debug!(key, "catalogue key collision, keeping the later entry");
            }
            offset += read_record_len(&self.arena, offset);
        }

        debug!(
            entries = self.entries,
            arena_bytes = self.arena.len(),
            "catalogue finalized"
        );
        Ok(NameCatalog {
            arena: self.arena,
            index,
        })
    }
}

/// Immutable hash → display-name catalogue.
///
/// Read-only after construction; safe for concurrent lookups.
#[derive(Debug)]
pub struct NameCatalog {
    arena: Vec<u8>,
    index: NameIndex,
}

impl NameCatalog {
    /// Original display name for `hash`, or `None` when unindexed.
    pub fn name_for_hash(&self, hash: u64) -> Option<&[u8]> {
        let &offset = self.index.get(&hash)?;
        Some(entry_name(&self.arena, offset))
    }

    /// Number of indexed keys (collisions collapse).
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Walk all records in insertion order as `(key, name)` pairs.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            arena: &self.arena,
            offset: 0,
        }
    }
}

/// Linear walk over the packed arena.
pub struct Entries<'a> {
    arena: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (u64, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.arena.len() {
            return None;
        }
        let key = read_key(self.arena, self.offset);
        let name = entry_name(self.arena, self.offset);
        self.offset += read_record_len(self.arena, self.offset);
        Some((key, name))
    }
}

#[inline]
fn read_key(arena: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(arena[offset..offset + 8].try_into().unwrap())
}

#[inline]
fn read_record_len(arena: &[u8], offset: usize) -> usize {
    u32::from_le_bytes(arena[offset + 8..offset + 12].try_into().unwrap()) as usize
}

#[inline]
fn entry_name(arena: &[u8], offset: usize) -> &[u8] {
    let record_len = read_record_len(arena, offset);
    let body = &arena[offset + ENTRY_HEADER_LEN..offset + record_len];
    let end = memchr::memchr(0, body).unwrap_or(body.len());
    &body[..end]
}

/// Build a catalogue by streaming every entry of the file at `path`.
///
/// Any failure abandons the whole build; no partial catalogue is returned.
/// The stream and the source it owns are closed on every path out.
pub fn build_from_path<P: AsRef<Path>>(
    path: P,
    config: &CatalogConfig,
) -> Result<NameCatalog, CatalogError> {
    config.validate()?;
    debug!(path = %path.as_ref().display(), "building name catalogue");
    let stream = EntryStream::open(path, config)?;
    build_from_stream(stream, config)
}

/// Build a catalogue from an already-open byte source.
pub fn build_from_source<S: ByteSource>(
    source: S,
    config: &CatalogConfig,
) -> Result<NameCatalog, CatalogError> {
    config.validate()?;
    let stream = EntryStream::from_source(source, config)?;
    build_from_stream(stream, config)
}

fn build_from_stream<S: ByteSource>(
    mut stream: EntryStream<'_, S>,
    config: &CatalogConfig,
) -> Result<NameCatalog, CatalogError> {
    let mut builder = CatalogBuilder::new(config)?;
    let mut line = vec![0u8; config.max_name_len];
    let result = loop {
        let n = stream.next_matching(b"*", &mut line);
        if n == 0 {
            break builder.finish();
        }
        if let Err(err) = builder.insert_name(&line[..n]) {
            break Err(err);
        }
    };
    stream.close();
    result
}
