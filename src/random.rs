use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Source of randomness for generation and carving.
///
/// Everything that draws randomness takes one of these explicitly, so a seeded or
/// scripted source makes traversal order reproducible.
pub trait RandomSource {
    /// Shuffles `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]);

    /// Draws an integer in `[1, bound]`. A `bound` of 0 is treated as 1.
    fn rand_int(&mut self, bound: usize) -> usize;
}

/// [`RandomSource`] backed by any [`rand::Rng`], [`StdRng`] by default.
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Get a random source, optionally seeded for reproducibility.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        RngSource { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl<R: Rng> RngSource<R> {
    pub fn from_rng(rng: R) -> Self {
        RngSource { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    fn rand_int(&mut self, bound: usize) -> usize {
        self.rng.random_range(1..=bound.max(1))
    }
}

/// Deterministic source for tests: shuffles are the identity and `rand_int`
/// replays a fixed script, clamped into range.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    values: Vec<usize>,
    position: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(values: Vec<usize>) -> Self {
        ScriptedSource {
            values,
            position: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}

    fn rand_int(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 1;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value.clamp(1, bound.max(1))
    }
}
