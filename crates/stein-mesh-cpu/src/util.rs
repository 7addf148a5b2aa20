use crate::constants::{BITS_PER_WORD, WORD_INDEX_MASK, WORD_INDEX_SHIFT};

// Local small bitset type; tracks which cell indices a pass has claimed.
#[derive(Default)]
pub(crate) struct Bitset {
    data: Vec<u64>,
}

impl Bitset {
    pub(crate) fn new(nbits: usize) -> Self {
        Self {
            data: vec![0; (nbits + WORD_INDEX_MASK) / BITS_PER_WORD],
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize) {
        let w = i >> WORD_INDEX_SHIFT;
        let b = i & WORD_INDEX_MASK;
        self.data[w] |= 1u64 << b;
    }

    #[inline]
    pub(crate) fn get(&self, i: usize) -> bool {
        let w = i >> WORD_INDEX_SHIFT;
        let b = i & WORD_INDEX_MASK;
        (self.data[w] >> b) & 1 != 0
    }
}
