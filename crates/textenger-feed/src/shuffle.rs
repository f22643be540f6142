//! Seeded Fisher-Yates shuffle.
//!
//! The seed string is folded into a 32-bit rolling hash, which seeds a small
//! linear congruential generator. This is for visual variety only and is not
//! cryptographically secure.

use rand::seq::SliceRandom;

const LCG_MULTIPLIER: i64 = 9301;
const LCG_INCREMENT: i64 = 49297;
const LCG_MODULUS: i64 = 233_280;

/// Polynomial rolling hash (`h * 31 + c`) over the UTF-16 code units of the
/// seed, wrapping at 32 bits.
pub fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    })
}

/// Linear congruential generator yielding values in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededRng {
    state: i64,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        Self::from_hash(hash_seed(seed))
    }

    pub fn from_hash(hash: i32) -> Self {
        Self {
            state: i64::from(hash),
        }
    }

    pub fn next_f64(&mut self) -> f64 {
        // Euclidean remainder keeps the state non-negative for negative hashes.
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT).rem_euclid(LCG_MODULUS);
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        let scaled = (self.next_f64() * bound as f64) as usize;
        scaled.min(bound - 1)
    }
}

/// Shuffle `posts` deterministically for one session seed.
///
/// Empty and single-element inputs come back unchanged. An empty seed yields
/// an unshuffled copy.
pub fn shuffle_posts_for_user<T: Clone>(posts: &[T], seed: &str) -> Vec<T> {
    let mut shuffled = posts.to_vec();
    if shuffled.len() < 2 || seed.is_empty() {
        return shuffled;
    }

    let mut rng = SeededRng::new(seed);
    for i in (1..shuffled.len()).rev() {
        let j = rng.below(i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Unseeded Fisher-Yates shuffle using the thread-local RNG.
pub fn shuffle_array<T: Clone>(items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());
    shuffled
}
