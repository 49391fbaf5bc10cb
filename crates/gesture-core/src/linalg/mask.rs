//! Feature masks for sub-matrix selection.

/// Set of selected indices in `0..len`, stored as a boolean array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMask {
    bits: Vec<bool>,
}

impl FeatureMask {
    /// Mask of `len` indices, none selected.
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Mask of `len` indices, all selected.
    pub fn full(len: usize) -> Self {
        Self {
            bits: vec![true; len],
        }
    }

    /// Size of the index space.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Select `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if let Some(b) = self.bits.get_mut(index) {
            *b = true;
        }
    }

    /// Deselect `index`. Out-of-range indices are ignored.
    pub fn clear(&mut self, index: usize) {
        if let Some(b) = self.bits.get_mut(index) {
            *b = false;
        }
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Number of selected indices.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }
}
