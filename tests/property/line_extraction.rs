//! Line extraction soundness over arbitrary byte soup.

use std::io;

use proptest::prelude::*;

use name_catalog::{ByteSource, CatalogConfig, EntryStream};

/// In-memory byte source for exercising the windowed (stream-backed) path.
struct VecSource {
    data: Vec<u8>,
    pos: usize,
}

impl ByteSource for VecSource {
    fn total_len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read(&mut self, dst: &mut [u8]) -> io::Result<()> {
        let end = self.pos + dst.len();
        if end > self.data.len() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "short read"));
        }
        dst.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }
}

fn drain<S: ByteSource>(stream: &mut EntryStream<'_, S>) -> Vec<Vec<u8>> {
    let mut out = [0u8; 4096];
    let mut lines = Vec::new();
    loop {
        let n = stream.next_line(&mut out);
        if n == 0 {
            break;
        }
        lines.push(out[..n].to_vec());
    }
    lines
}

/// Reference model: split on CR/LF, trim both ends of bytes <= 0x20, drop
/// empties. Valid only for inputs without `~` (no patch-suffix handling).
fn model_lines(input: &[u8]) -> Vec<Vec<u8>> {
    input
        .split(|&b| b == b'\r' || b == b'\n')
        .filter_map(|field| {
            let start = field.iter().position(|&b| b > 0x20)?;
            let end = field.iter().rposition(|&b| b > 0x20).unwrap() + 1;
            Some(field[start..end].to_vec())
        })
        .collect()
}

proptest! {
    /// Buffer-backed extraction matches the trim/split model exactly.
    #[test]
    fn buffer_extraction_matches_model(
        input in prop::collection::vec(any::<u8>().prop_filter("no tilde", |&b| b != b'~'), 0..2048)
    ) {
        let mut stream = EntryStream::from_buffer(&input);
        prop_assert_eq!(drain(&mut stream), model_lines(&input));
    }

    /// Windowed streaming agrees with buffer-backed reading for every
    /// window size, so refill boundaries are unobservable.
    #[test]
    fn window_size_is_unobservable(
        input in prop::collection::vec(any::<u8>().prop_filter("no tilde", |&b| b != b'~'), 1..1024),
        window in 1usize..64
    ) {
        let cfg = CatalogConfig { window_capacity: window, ..CatalogConfig::default() };
        let source = VecSource { data: input.clone(), pos: 0 };
        let mut windowed = EntryStream::from_source(source, &cfg).unwrap();
        let mut buffered = EntryStream::from_buffer(&input);
        prop_assert_eq!(drain(&mut windowed), drain(&mut buffered));
    }

    /// Structural invariants hold for fully arbitrary input, tildes and
    /// all: no panics, no line breaks or edge control bytes in output.
    #[test]
    fn produced_lines_are_always_trimmed(
        input in prop::collection::vec(any::<u8>(), 0..2048)
    ) {
        let mut stream = EntryStream::from_buffer(&input);
        for line in drain(&mut stream) {
            prop_assert!(!line.is_empty());
            prop_assert!(!line.contains(&b'\r'));
            prop_assert!(!line.contains(&b'\n'));
            prop_assert!(line[0] > 0x20);
            prop_assert!(line[line.len() - 1] > 0x20);
        }
    }

    /// A one-byte destination never overruns or panics.
    #[test]
    fn one_byte_destination_is_safe(
        input in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let mut stream = EntryStream::from_buffer(&input);
        let mut out = [0u8; 1];
        let mut calls = 0usize;
        loop {
            let n = stream.next_line(&mut out);
            if n == 0 {
                break;
            }
            prop_assert_eq!(n, 1);
            calls += 1;
            prop_assert!(calls <= input.len());
        }
    }
}
