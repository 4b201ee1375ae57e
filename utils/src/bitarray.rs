//! Fixed-size bitmap with a compact byte-packed layout.

use std::fmt;

/// A fixed-size array of bits.
///
/// Bit `i` is stored in byte `i / 8` under mask `0x80 >> (i % 8)`, so the
/// first bit occupies the most significant position of the first byte. This
/// layout appears in persisted payloads, so it must not change.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitArray {
    size: usize,
    storage: Vec<u8>,
}

impl BitArray {
    /// Creates a bit array of `size` bits, all cleared.
    pub fn zeroes(size: usize) -> Self {
        Self {
            size,
            storage: vec![0u8; size.div_ceil(8)],
        }
    }

    /// Returns the number of bits.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns bit `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.size {
            return None;
        }
        Some(self.storage[Self::block_index(index)] & Self::bit_mask(index) != 0)
    }

    /// Sets bit `index`.
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize) {
        assert!(index < self.size, "index out of range");
        self.storage[Self::block_index(index)] |= Self::bit_mask(index);
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.storage
            .iter()
            .map(|block| block.count_ones() as usize)
            .sum()
    }

    /// Iterates over the indices of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(|index| self.get(*index) == Some(true))
    }

    fn block_index(index: usize) -> usize {
        index / 8
    }

    fn bit_mask(index: usize) -> u8 {
        0x80 >> (index % 8)
    }
}

impl FromIterator<bool> for BitArray {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let bits: Vec<bool> = iter.into_iter().collect();
        let mut array = Self::zeroes(bits.len());
        for (index, bit) in bits.into_iter().enumerate() {
            if bit {
                array.set(index);
            }
        }
        array
    }
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.size {
            f.write_str(if self.get(index) == Some(true) {
                "1"
            } else {
                "0"
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroes() {
        let array = BitArray::zeroes(10);
        assert_eq!(array.len(), 10);
        assert!(!array.is_empty());
        assert_eq!(array.count_ones(), 0);
        assert_eq!(array.storage.len(), 2);
        for index in 0..10 {
            assert_eq!(array.get(index), Some(false));
        }
        assert_eq!(array.get(10), None);
    }

    #[test]
    fn test_empty() {
        let array = BitArray::zeroes(0);
        assert!(array.is_empty());
        assert_eq!(array.get(0), None);
    }

    #[test]
    fn test_first_bit_is_high_order() {
        // Compatibility-critical: bit 0 is the MSB of the first byte.
        let mut array = BitArray::zeroes(1);
        array.set(0);
        assert_eq!(array.storage, vec![0x80]);
    }

    #[test]
    fn test_set_and_get() {
        let mut array = BitArray::zeroes(12);
        array.set(0);
        array.set(7);
        array.set(11);
        assert_eq!(array.get(0), Some(true));
        assert_eq!(array.get(1), Some(false));
        assert_eq!(array.get(7), Some(true));
        assert_eq!(array.get(11), Some(true));
        assert_eq!(array.count_ones(), 3);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_set_out_of_range() {
        let mut array = BitArray::zeroes(8);
        array.set(8);
    }

    #[test]
    fn test_iter_ones_ascending() {
        let mut array = BitArray::zeroes(16);
        array.set(13);
        array.set(2);
        array.set(9);
        assert_eq!(array.iter_ones().collect::<Vec<_>>(), vec![2, 9, 13]);
    }

    #[test]
    fn test_from_iterator() {
        let array: BitArray = [true, false, true, true].into_iter().collect();
        assert_eq!(array.len(), 4);
        assert_eq!(array.count_ones(), 3);
        assert_eq!(array.iter_ones().collect::<Vec<_>>(), vec![0, 2, 3]);
    }

    #[test]
    fn test_debug() {
        let mut array = BitArray::zeroes(5);
        array.set(0);
        array.set(3);
        assert_eq!(format!("{array:?}"), "10010");
    }
}
