//! 32-bit Mersenne Twister (MT19937).
//!
//! The generator reproduces the reference MT19937 output for both the
//! single-word (`init_genrand`) and key-array (`init_by_array`) seeding
//! schemes, so seeded sequences match other implementations bit for bit.

#![expect(
    clippy::indexing_slicing,
    reason = "state indices are always reduced modulo the state length"
)]

use rand::RngCore;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const ARRAY_INIT_SEED: u32 = 19_650_218;

/// MT19937 pseudo-random engine.
///
/// # Example
///
/// ```
/// use address_faker::Mt19937;
/// use rand::RngCore;
///
/// let mut engine = Mt19937::new(5489);
/// assert_eq!(engine.next_u32(), 3_499_211_612);
/// ```
#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl Mt19937 {
    /// Creates an engine seeded with a single word.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let mut state = [0_u32; N];
        state[0] = seed;
        let mut counter: u32 = 1;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253_u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(counter);
            counter = counter.wrapping_add(1);
        }
        Self { state, index: N }
    }

    /// Creates an engine seeded with a key array.
    ///
    /// An empty key is treated as the single word `0`.
    #[must_use]
    pub fn from_key(words: &[u32]) -> Self {
        let zero = [0_u32];
        let key = if words.is_empty() { &zero[..] } else { words };

        let mut engine = Self::new(ARRAY_INIT_SEED);
        let state = &mut engine.state;
        let mut i: usize = 1;
        let mut j: usize = 0;

        for _ in 0..N.max(key.len()) {
            let prev = state[i - 1];
            let j_word = u32::try_from(j).unwrap_or(u32::MAX);
            state[i] = (state[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j_word);
            i += 1;
            j += 1;
            if i >= N {
                state[0] = state[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }

        for _ in 0..N - 1 {
            let prev = state[i - 1];
            let i_word = u32::try_from(i).unwrap_or(u32::MAX);
            state[i] = (state[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i_word);
            i += 1;
            if i >= N {
                state[0] = state[N - 1];
                i = 1;
            }
        }

        state[0] = UPPER_MASK;
        engine
    }

    fn twist(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 0 { 0 } else { MATRIX_A };
            self.state[i] = self.state[(i + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }

    /// Draws the next tempered 32-bit word.
    pub fn next_word(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_word());
        let high = u64::from(self.next_word());
        (high << 32) | low
    }

    #[expect(
        clippy::little_endian_bytes,
        reason = "byte streams are defined as little-endian words on every host"
    )]
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_word().to_le_bytes();
            for (slot, byte) in chunk.iter_mut().zip(bytes) {
                *slot = byte;
            }
        }
    }
}
