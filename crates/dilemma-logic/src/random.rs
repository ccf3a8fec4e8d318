//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG so that games with probabilistic strategies can be
//! replayed from their seed. Uses xorshift64*.

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a seed and a stream index (usually the game index)
    pub fn new(seed: u64, stream: u32) -> Self {
        let mut state = seed ^ 0x6a09e667f3bcc909;
        state ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);

        // xorshift has a fixed point at zero
        if state == 0 {
            state = 0x9e3779b97f4a7c15;
        }

        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Derive an independent generator for one seat in one round
    pub fn for_round(&self, round: usize, seat_index: u8) -> Self {
        let lane = (round as u64) * 2 + seat_index as u64;
        let mut state = self.state ^ (lane + 1).wrapping_mul(0x9e3779b97f4a7c15);
        if state == 0 {
            state = 0x2545f4914f6cdd1d;
        }

        let mut rng = Self { state };
        rng.next_u64();
        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Uniform float in [0, 1) with 53 bits of precision
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Bernoulli trial: true with probability `p`.
    ///
    /// `p <= 0` never fires, `p >= 1` always fires.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }
}
