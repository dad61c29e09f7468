//! Fixed-capacity read-ahead window producing trimmed catalogue lines.
//!
//! # Invariants
//! - `pos <= filled <= window capacity` at all times.
//! - `consumed + filled <= total_len`; `consumed` advances only on refill.
//! - Caller destinations are never overrun: at most `out.len()` bytes are
//!   written per line.
//! - A failed refill ends the stream permanently and silently; the
//!   remainder of the catalogue is treated as unavailable, not as an error.
//!
//! # Design Notes
//! - Stream-backed caches own their source and window; buffer-backed caches
//!   borrow the caller's bytes with no copy and never refill.
//! - Window scanning uses `memchr` rather than a byte-at-a-time loop.

use memchr::memchr3;
use tracing::trace;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::source::{ByteSource, FileSource};

#[derive(Debug)]
enum Backing<'a, S: ByteSource> {
    Stream { source: S, window: Vec<u8> },
    Buffer(&'a [u8]),
}

/// Read-ahead line cache over a byte source or borrowed buffer.
///
/// Lines are maximal runs terminated by CR or LF; leading bytes `<= 0x20`
/// are skipped, trailing ones trimmed, and a `~P(...)` patch suffix is
/// stripped. Exhaustion is a zero-length result, never an error.
#[derive(Debug)]
pub struct LineCache<'a, S: ByteSource = FileSource> {
    backing: Backing<'a, S>,
    /// Read cursor within the current window.
    pos: usize,
    /// Valid bytes in the current window.
    filled: usize,
    /// Total source length in bytes.
    total_len: u64,
    /// Source offset of the current window's first byte.
    consumed: u64,
    /// Set once the stream is permanently exhausted.
    done: bool,
}

impl<'a, S: ByteSource> LineCache<'a, S> {
    /// Open over an owned source, performing the initial window fill.
    ///
    /// Rejects empty and oversized sources; an initial read failure is a
    /// `Source` error (unlike later refills, which end the stream quietly).
    pub fn open(mut source: S, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let total_len = source.total_len();
        if total_len == 0 {
            return Err(CatalogError::EmptySource);
        }
        if total_len > config.max_source_len {
            return Err(CatalogError::SourceTooLarge {
                len: total_len,
                max: config.max_source_len,
            });
        }
        let first = total_len.min(config.window_capacity as u64) as usize;
        let mut window = vec![0u8; first];
        source.read(&mut window).map_err(CatalogError::Source)?;
        Ok(Self {
            backing: Backing::Stream { source, window },
            pos: 0,
            filled: first,
            total_len,
            consumed: 0,
            done: false,
        })
    }

    #[inline]
    fn window(&self) -> &[u8] {
        match &self.backing {
            Backing::Stream { window, .. } => &window[..self.filled],
            Backing::Buffer(buf) => buf,
        }
    }

    /// Load the next window. Returns the new window length, 0 at end.
    fn refill(&mut self) -> usize {
        if self.done {
            return 0;
        }
        let (source, window) = match &mut self.backing {
            Backing::Stream { source, window } => (source, window),
            Backing::Buffer(_) => {
                self.done = true;
                return 0;
            }
        };
        self.consumed += self.filled as u64;
        if self.consumed >= self.total_len {
            self.done = true;
            return 0;
        }
        let remaining = self.total_len - self.consumed;
        let want = remaining.min(window.len() as u64) as usize;
        if source.read(&mut window[..want]).is_err() {
            // Once a region fails to read, the rest of the catalogue is
            // unreliable; stop cleanly instead of surfacing garbage.
            trace!(offset = self.consumed, "catalogue refill failed, ending stream early");
            self.done = true;
            return 0;
        }
        self.pos = 0;
        self.filled = want;
        want
    }

    /// Copy the next trimmed line into `out`, returning its length.
    ///
    /// 0 means the stream is exhausted. A line longer than `out` is
    /// truncated; the remainder surfaces as the next line.
    pub fn next_line(&mut self, out: &mut [u8]) -> usize {
        // Skip leading control/whitespace bytes, across refills if needed.
        loop {
            if self.pos == self.filled {
                if self.refill() == 0 {
                    return 0;
                }
            }
            let win = self.window();
            match win[self.pos..].iter().position(|&b| b > 0x20) {
                Some(i) => {
                    self.pos += i;
                    break;
                }
                None => self.pos = self.filled,
            }
        }

        let mut written = 0usize;
        let mut tilde: Option<usize> = None;
        while written < out.len() {
            if self.pos == self.filled {
                if self.refill() == 0 {
                    break;
                }
            }
            let win = self.window();
            let avail = &win[self.pos..];
            let room = out.len() - written;
            let scan = &avail[..avail.len().min(room)];
            match memchr3(b'\r', b'\n', b'~', scan) {
                Some(i) if scan[i] == b'~' => {
                    // Copy through the tilde and keep going; only the first
                    // one marks a candidate patch suffix.
                    let copy = i + 1;
                    out[written..written + copy].copy_from_slice(&scan[..copy]);
                    if tilde.is_none() {
                        tilde = Some(written + i);
                    }
                    written += copy;
                    self.pos += copy;
                }
                Some(i) => {
                    out[written..written + i].copy_from_slice(&scan[..i]);
                    written += i;
                    self.pos += i;
                    // The CR/LF stays in the window; the next skip eats it.
                    return finish_line(out, written, tilde);
                }
                None => {
                    out[written..written + scan.len()].copy_from_slice(scan);
                    written += scan.len();
                    self.pos += scan.len();
                }
            }
        }
        finish_line(out, written, tilde)
    }

    /// Close the cache, releasing the window and the owned source.
    ///
    /// Buffer-backed caches borrow their bytes, so this is a no-op for them.
    pub fn close(self) {}
}

impl<'a> LineCache<'a, FileSource> {
    /// Wrap a caller-owned buffer directly; no copy, refill never happens.
    pub fn from_buffer(buf: &'a [u8]) -> Self {
        Self {
            backing: Backing::Buffer(buf),
            pos: 0,
            filled: buf.len(),
            total_len: buf.len() as u64,
            consumed: 0,
            done: false,
        }
    }
}

/// Apply the `~P` suffix strip and trailing trim to a copied line.
fn finish_line(out: &[u8], mut written: usize, tilde: Option<usize>) -> usize {
    if let Some(t) = tilde {
        if t + 1 < written && out[t + 1] == b'P' {
            written = t;
        }
    }
    while written > 0 && out[written - 1] <= 0x20 {
        written -= 1;
    }
    written
}
