/// Linear congruential generator behind every layout decision.
///
/// Same seed, same sequence of draws, same dungeon. Combat rolls never
/// touch this generator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutRng {
    state: u32,
}

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const MODULUS: f64 = 4_294_967_296.0;

impl LayoutRng {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns it normalised to `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state as f64 / MODULUS
    }

    /// Uniform integer in `[low, low + span)`.
    pub fn offset(&mut self, low: i32, span: i32) -> i32 {
        low + (self.next_f64() * span as f64).floor() as i32
    }
}
