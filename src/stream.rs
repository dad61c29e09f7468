//! Entry stream: line cache plus optional wildcard filtering.
//!
//! Thin layer over [`LineCache`] exposing the catalogue iteration surface:
//! open a path or wrap a buffer, pull lines, optionally filtered by a glob
//! pattern. Exhaustion is a zero-length result.

use std::path::Path;

use crate::cache::LineCache;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::source::{ByteSource, FileSource};
use crate::wildcard::wildcard_match;

/// Streaming reader of catalogue entries.
pub struct EntryStream<'a, S: ByteSource = FileSource> {
    cache: LineCache<'a, S>,
}

impl EntryStream<'static, FileSource> {
    /// Open a file-backed stream; the stream owns the file until closed.
    pub fn open<P: AsRef<Path>>(path: P, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let source = FileSource::open(path).map_err(CatalogError::Source)?;
        Self::from_source(source, config)
    }
}

impl<'a, S: ByteSource> EntryStream<'a, S> {
    /// Open over an arbitrary owned byte source.
    pub fn from_source(source: S, config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            cache: LineCache::open(source, config)?,
        })
    }

    /// Next trimmed entry; 0 means exhausted.
    #[inline]
    pub fn next_line(&mut self, out: &mut [u8]) -> usize {
        self.cache.next_line(out)
    }

    /// Next entry matching the glob `pattern` (`*`, `?`); 0 on exhaustion
    /// without a match.
    pub fn next_matching(&mut self, pattern: &[u8], out: &mut [u8]) -> usize {
        loop {
            let n = self.cache.next_line(out);
            if n == 0 {
                return 0;
            }
            if wildcard_match(&out[..n], pattern) {
                return n;
            }
        }
    }

    /// Close the stream and the source it owns.
    pub fn close(self) {
        self.cache.close();
    }
}

impl<'a> EntryStream<'a, FileSource> {
    /// Wrap a caller-owned buffer; no copy, closing is a no-op.
    pub fn from_buffer(buf: &'a [u8]) -> Self {
        Self {
            cache: LineCache::from_buffer(buf),
        }
    }
}
