const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49_297;
const MODULUS: u64 = 233_280;

/// Linear congruential stream shared by every generation system.
///
/// Two instances built from the same seed produce identical sequences. The
/// state is kept reduced modulo `MODULUS`, so the recurrence never overflows
/// and any `u64` seed (including 0) is accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Integer in `[min, max)`. A degenerate range returns `min` without
    /// advancing the stream.
    #[inline]
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min) as f64;
        (self.next_f64() * span).floor() as i64 + min
    }
}
