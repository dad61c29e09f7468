//! Property-based soundness tests.
//!
//! Run with: `cargo test --test property`

mod catalog_roundtrip;
mod line_extraction;
