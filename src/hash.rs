//! Name normalization and the two-part name hash.
//!
//! # Invariants
//! - Hashing operates on the normalized form (ASCII uppercase, backslash
//!   separators); stored display names are never normalized.
//! - Keys must match the hashes embedded in archive indices bit-for-bit, so
//!   the primitive is Bob Jenkins' lookup3 `hashlittle2`, unchanged.
//!
//! # Design Notes
//! - The two 32-bit halves combine into one 64-bit key with the primary
//!   half in the upper bits.

/// Normalize a name into `out` for hashing: ASCII uppercase, `/` → `\`.
///
/// `out` is cleared first; reuse the buffer across calls to avoid
/// per-name allocation.
pub fn normalize_name(out: &mut Vec<u8>, name: &[u8]) {
    out.clear();
    out.reserve(name.len());
    for &b in name {
        out.push(match b {
            b'/' => b'\\',
            _ => b.to_ascii_uppercase(),
        });
    }
}

/// Combine the two hash halves into one 64-bit key, primary half high.
#[inline]
pub fn combine_hash(high: u32, low: u32) -> u64 {
    ((high as u64) << 32) | (low as u64)
}

/// Hash a normalized name into its 64-bit catalogue key.
#[inline]
pub fn name_hash(normalized: &[u8]) -> u64 {
    let (high, low) = hashlittle2(normalized);
    combine_hash(high, low)
}

#[inline(always)]
fn mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(4);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(6);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(8);
    *b = b.wrapping_add(*a);
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(16);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(19);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(4);
    *b = b.wrapping_add(*a);
}

#[inline(always)]
fn final_mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(14));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(11));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(25));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(16));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(4));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(14));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(24));
}

/// lookup3 `hashlittle2`: returns `(primary, secondary)` 32-bit halves.
///
/// Both seeds are zero, matching the catalogue format's key derivation.
pub fn hashlittle2(key: &[u8]) -> (u32, u32) {
    let init = 0xdead_beef_u32.wrapping_add(key.len() as u32);
    let mut a = init;
    let mut b = init;
    let mut c = init;

    // All but a final 1..=12 byte tail is consumed in 12-byte blocks; the
    // last full block deliberately falls through to the tail, matching the
    // reference loop.
    let mut tail = key;
    while tail.len() > 12 {
        a = a.wrapping_add(u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]));
        b = b.wrapping_add(u32::from_le_bytes([tail[4], tail[5], tail[6], tail[7]]));
        c = c.wrapping_add(u32::from_le_bytes([tail[8], tail[9], tail[10], tail[11]]));
        mix(&mut a, &mut b, &mut c);
        tail = &tail[12..];
    }

    // Tail: 1..=12 remaining bytes folded in without a trailing mix.
    match tail.len() {
        0 => return (c, b),
        n => {
            let mut word = [0u8; 12];
            word[..n].copy_from_slice(tail);
            if n > 8 {
                a = a.wrapping_add(u32::from_le_bytes([word[0], word[1], word[2], word[3]]));
                b = b.wrapping_add(u32::from_le_bytes([word[4], word[5], word[6], word[7]]));
                c = c.wrapping_add(u32::from_le_bytes([word[8], word[9], word[10], word[11]]));
            } else if n > 4 {
                a = a.wrapping_add(u32::from_le_bytes([word[0], word[1], word[2], word[3]]));
                b = b.wrapping_add(u32::from_le_bytes([word[4], word[5], word[6], word[7]]));
            } else {
                a = a.wrapping_add(u32::from_le_bytes([word[0], word[1], word[2], word[3]]));
            }
        }
    }
    final_mix(&mut a, &mut b, &mut c);
    (c, b)
}
