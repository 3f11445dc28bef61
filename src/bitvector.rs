use std::fmt;

use crate::errors::*;

const WORD_BITS: usize = 64;

#[inline]
fn words_for(size: usize) -> usize {
    (size + WORD_BITS - 1) / WORD_BITS
}

/// A fixed size set of bits with a forward scan for the next set bit.
///
/// Bits past `len()` in the last storage word are never touched.
#[derive(Clone, Eq, PartialEq)]
pub struct BitVector {
    size: usize,
    words: Vec<u64>,
}

impl BitVector {
    /// A bit vector of `size` cleared bits.
    pub fn new(size: usize) -> Result<BitVector> {
        let words_count = words_for(size);
        let mut words = Vec::new();
        words.try_reserve_exact(words_count)?;
        words.resize(words_count, 0);
        Ok(BitVector { size, words })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    fn check_index(&self, index: usize) {
        if index >= self.size {
            panic!("Bit index {} out of range for a bit vector of {} bits",
                   index,
                   self.size);
        }
    }

    /// # Panics
    /// If `index >= len()`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        self.check_index(index);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// # Panics
    /// If `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.check_index(index);
        self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// The smallest set bit strictly after `after`, or the smallest set bit at all when `after`
    /// is `None`.
    ///
    /// Cost is linear in the number of words scanned, so a mostly clear vector is a full scan.
    ///
    /// # Panics
    /// If `after` is `Some(index)` with `index >= len()`.
    pub fn search(&self, after: Option<usize>) -> Option<usize> {
        let start = match after {
            None => 0,
            Some(index) => {
                self.check_index(index);
                index + 1
            }
        };
        if start >= self.size {
            return None;
        }

        let mut word_index = start / WORD_BITS;
        let mut word = self.words[word_index] & (!0u64 << (start % WORD_BITS));
        loop {
            if word != 0 {
                let found = word_index * WORD_BITS + word.trailing_zeros() as usize;
                // never report the unused tail of the last word
                return if found < self.size { Some(found) } else { None };
            }
            word_index += 1;
            if word_index == self.words.len() {
                return None;
            }
            word = self.words[word_index];
        }
    }

    /// Every set bit in ascending order.
    pub fn iter(&self) -> SetBits {
        SetBits {
            bits: self,
            last: None,
            done: false,
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn has_any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    #[inline]
    pub fn has_none(&self) -> bool {
        !self.has_any()
    }

    pub fn has_all(&self) -> bool {
        self.count_ones() == self.size
    }

    pub fn clear(&mut self) {
        for w in self.words.iter_mut() {
            *w = 0;
        }
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BitVector({}) ", self.size)?;
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the set bits of a `BitVector`, driven by `BitVector::search`.
#[derive(Debug, Clone)]
pub struct SetBits<'a> {
    bits: &'a BitVector,
    last: Option<usize>,
    done: bool,
}

impl<'a> Iterator for SetBits<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let found = self.bits.search(self.last);
        match found {
            Some(_) => self.last = found,
            None => self.done = true,
        }
        found
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = usize;
    type IntoIter = SetBits<'a>;

    fn into_iter(self) -> SetBits<'a> {
        self.iter()
    }
}
