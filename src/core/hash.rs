//! Content hashing for analysis seeds
//!
//! A 32-bit rolling hash over UTF-16 code units. The accumulator wraps like a
//! two's-complement `i32` after every step so the result matches existing
//! analyses bit for bit.

/// Number of leading UTF-16 code units that contribute to the hash
pub const HASH_WINDOW: usize = 1000;

/// Hash document text to a seed
///
/// Only the first [`HASH_WINDOW`] code units are considered. Empty input
/// hashes to 0.
pub fn content_hash(text: &str) -> u32 {
    let acc = text
        .encode_utf16()
        .take(HASH_WINDOW)
        .fold(0i32, |acc, unit| {
            // (acc << 5) - acc + c, i.e. acc * 31 + c
            acc.wrapping_shl(5)
                .wrapping_sub(acc)
                .wrapping_add(i32::from(unit))
        });

    acc.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hashes_to_zero() {
        assert_eq!(content_hash(""), 0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(content_hash("a"), 97);
        assert_eq!(content_hash("abc"), 96354);
        assert_eq!(content_hash("ISO-10303-21;"), 527269534);
    }

    #[test]
    fn test_wraps_past_32_bits() {
        let text = "The quick brown fox jumps over the lazy dog and keeps running far away";
        assert_eq!(text.len(), 70);
        assert_eq!(content_hash(text), 1223099200);
    }

    #[test]
    fn test_only_window_contributes() {
        let base = "a".repeat(HASH_WINDOW);
        let extended = format!("{}zzz", base);
        assert_eq!(content_hash(&base), 904019584);
        assert_eq!(content_hash(&base), content_hash(&extended));
    }

    #[test]
    fn test_counts_utf16_code_units() {
        assert_eq!(content_hash("é"), 233);
        // Surrogate pair: two code units
        assert_eq!(content_hash("😀"), 1772899);
    }

    #[test]
    fn test_minimum_accumulator_does_not_overflow() {
        // abs(i32::MIN) must still fit
        assert_eq!(i32::MIN.unsigned_abs(), 2_147_483_648u32);
    }
}
