//! Byte-source contract for catalogue streaming.
//!
//! # Invariants
//! - Reads are sequential and exact-length: anything short of filling the
//!   destination is a failure, never a partial success.
//! - `total_len` is fixed for the lifetime of the source.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Readable origin of catalogue text.
///
/// The stream layer reads strictly forward in window-sized requests and
/// never asks for more than `total_len` bytes overall. Closing happens on
/// drop.
pub trait ByteSource {
    /// Total length of the source in bytes.
    fn total_len(&self) -> u64;

    /// Fill `dst` exactly; any shortfall is an error.
    fn read(&mut self, dst: &mut [u8]) -> io::Result<()>;
}

/// File-backed byte source. The size is captured once at open.
pub struct FileSource {
    file: File,
    len: u64,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self { file, len })
    }
}

impl ByteSource for FileSource {
    #[inline]
    fn total_len(&self) -> u64 {
        self.len
    }

    #[inline]
    fn read(&mut self, dst: &mut [u8]) -> io::Result<()> {
        self.file.read_exact(dst)
    }
}
