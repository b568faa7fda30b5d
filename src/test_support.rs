use crate::services::index_source::IndexSource;

// An IndexSource that replays a fixed list of indices, wrapping around at the end
pub struct FixedIndices {
    indices: Vec<usize>,
    position: usize,
}

impl FixedIndices {
    pub fn new(indices: Vec<usize>) -> Self {
        assert!(!indices.is_empty(), "FixedIndices needs at least one index");
        Self {
            indices,
            position: 0,
        }
    }
}

impl IndexSource for FixedIndices {
    fn next_index(&mut self, bound: usize) -> usize {
        let index = self.indices[self.position % self.indices.len()];
        self.position += 1;
        assert!(index < bound, "index {index} out of bounds for {bound}");
        index
    }
}
