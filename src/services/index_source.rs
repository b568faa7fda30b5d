use rand::Rng;

/// Source of uniformly distributed indices used to draw from a historical sample.
pub trait IndexSource {
    /// Returns an index in `[0, bound)`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> IndexSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}
