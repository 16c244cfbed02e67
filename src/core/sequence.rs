//! Seeded pseudo-random sequence
//!
//! Linear congruential generator with multiplier 9301, increment 49297 and
//! modulus 233280. The constants are part of the output contract: changing
//! any of them changes every synthesized analysis.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Repeatable stream of values in [0, 1)
///
/// Owned by a single synthesis pass; never shared.
#[derive(Debug, Clone)]
pub struct SeededSequence {
    state: u64,
}

impl SeededSequence {
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Advance the generator and return the next value in [0, 1)
    pub fn next_value(&mut self) -> f64 {
        // seed < 2^32 so the product stays well inside u64
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Draw an index in [0, bound)
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next_value() * bound as f64).floor() as usize
    }

    /// Draw `base + next * span`
    pub fn next_in(&mut self, base: f64, span: f64) -> f64 {
        base + self.next_value() * span
    }

    /// Draw `(next - 0.5) * span`, centered on zero
    pub fn next_centered(&mut self, span: f64) -> f64 {
        (self.next_value() - 0.5) * span
    }
}

impl Iterator for SeededSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_values_for_seed() {
        let mut seq = SeededSequence::new(0);
        assert_eq!(seq.next_value(), 49297.0 / 233280.0);
        // (49297 * 9301 + 49297) % 233280
        assert_eq!(seq.next_value(), 165494.0 / 233280.0);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<f64> = SeededSequence::new(96354).take(64).collect();
        let b: Vec<f64> = SeededSequence::new(96354).take(64).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a: Vec<f64> = SeededSequence::new(1).take(8).collect();
        let b: Vec<f64> = SeededSequence::new(2).take(8).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_values_in_unit_interval() {
        for seed in [0, 1, 96354, 233_279, 233_280, u32::MAX] {
            for value in SeededSequence::new(seed).take(2000) {
                assert!((0.0..1.0).contains(&value), "{} out of range", value);
            }
        }
    }

    #[test]
    fn test_large_seed_does_not_overflow() {
        let mut seq = SeededSequence::new(u32::MAX);
        let expected = ((u32::MAX as u64) * 9301 + 49297) % 233_280;
        assert_eq!(seq.next_value(), expected as f64 / 233_280.0);
    }

    #[test]
    fn test_next_index_bounds() {
        let mut seq = SeededSequence::new(42);
        for _ in 0..1000 {
            assert!(seq.next_index(8) < 8);
        }
    }
}
