// fnv.rs — FNV-1a 64-bit hashing
//
// Compresses over-long template-argument fragments into a fixed-width token
// inside generated names. The constants are load-bearing: hashed fragments
// appear verbatim in exported names, so downstream keys only stay stable
// across versions if the hash stays bit-for-bit identical.
//
// Preconditions: none.
// Postconditions: `fnv64(b"")` returns the offset basis.
// Failure modes: none (total over all byte strings).
// Side effects: none.

/// FNV-1a 64-bit offset basis.
pub const FNV64_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;

/// FNV-1a 64-bit prime.
pub const FNV64_PRIME: u64 = 1_099_511_628_211;

/// Hash a byte string with 64-bit FNV-1a.
pub fn fnv64(bytes: &[u8]) -> u64 {
    fnv64_with(FNV64_OFFSET_BASIS, bytes)
}

/// Continue an FNV-1a hash from a previous accumulator state.
///
/// `fnv64_with(fnv64(a), b)` equals `fnv64(a ++ b)`, so fragments can be
/// hashed incrementally without concatenating.
pub fn fnv64_with(state: u64, bytes: &[u8]) -> u64 {
    let mut hash = state;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV64_PRIME);
    }
    hash
}

// ── Tests ──
