//! Declaration fingerprinting.
//!
//! Every distinct declaration string is identified by a raw reflected
//! CRC-32: polynomial `0xEDB88320`, initial value 0, no final xor. The
//! same function is used at build time and at query time; databases built
//! with any other hash would not resolve.

/// 32-bit fingerprint of a declaration string.
pub type Crc = u32;

/// Fingerprint a declaration string.
///
/// `crc32fast` speaks the standard CRC-32 convention (init `0xFFFFFFFF`,
/// complemented output). Seeding with `!0` cancels the implicit input
/// complement and complementing the result cancels the output one, which
/// leaves the raw register value the databases are keyed by.
pub fn fingerprint(text: &str) -> Crc {
    let mut hasher = crc32fast::Hasher::new_with_initial(!0);
    hasher.update(text.as_bytes());
    !hasher.finalize()
}
