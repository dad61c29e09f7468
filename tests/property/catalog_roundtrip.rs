//! Catalogue round trips: every inserted name must come back verbatim.

use std::collections::HashMap;

use proptest::prelude::*;

use name_catalog::hash::{name_hash, normalize_name};
use name_catalog::{CatalogBuilder, CatalogConfig, EntryStream};

fn key_of(name: &[u8]) -> u64 {
    let mut norm = Vec::new();
    normalize_name(&mut norm, name);
    name_hash(&norm)
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._][A-Za-z0-9._\\\\/-]{0,39}"
}

proptest! {
    /// Streaming names through a small-window stream into a small-arena
    /// builder loses nothing: the last writer per normalized name wins and
    /// is returned byte-for-byte.
    #[test]
    fn every_streamed_name_is_retrievable(
        names in prop::collection::vec(name_strategy(), 1..150),
        window in 1usize..48
    ) {
        let mut text = Vec::new();
        for name in &names {
            text.extend_from_slice(name.as_bytes());
            text.extend_from_slice(b"\r\n");
        }

        // Small arena forces repeated growth; small window forces refills.
        let cfg = CatalogConfig {
            window_capacity: window,
            arena_initial_capacity: 512,
            ..CatalogConfig::default()
        };
        let mut stream = EntryStream::from_buffer(&text);
        let mut builder = CatalogBuilder::new(&cfg).unwrap();
        let mut out = [0u8; 512];
        loop {
            let n = stream.next_matching(b"*", &mut out);
            if n == 0 {
                break;
            }
            builder.insert_name(&out[..n]).unwrap();
        }
        prop_assert_eq!(builder.len(), names.len());
        let catalog = builder.finish().unwrap();

        // Model: duplicates by normalized form are last-write-wins.
        let mut expected: HashMap<u64, &[u8]> = HashMap::new();
        for name in &names {
            expected.insert(key_of(name.as_bytes()), name.as_bytes());
        }
        prop_assert_eq!(catalog.len(), expected.len());
        for (key, name) in &expected {
            prop_assert_eq!(catalog.name_for_hash(*key), Some(*name));
        }
    }

    /// Hashing is deterministic and insensitive to case and slash
    /// direction, and only to those.
    #[test]
    fn key_derivation_is_stable(name in name_strategy()) {
        let lower = name.to_ascii_lowercase().replace('\\', "/");
        let upper = name.to_ascii_uppercase().replace('/', "\\");
        prop_assert_eq!(key_of(name.as_bytes()), key_of(lower.as_bytes()));
        prop_assert_eq!(key_of(name.as_bytes()), key_of(upper.as_bytes()));
    }
}
