//! A square bitboard whose side length is chosen at runtime.
//!
//! The type is `no_std` friendly. Cells of an `size×size` grid are packed
//! row-major into a vector of unsigned words `T`, so any grid size fits.
//! Used for per-cell shot marks and for the targeting AI's memory of tried cells.

use alloc::vec;
use alloc::vec::Vec;
use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::Coord;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoardError {
    /// Column or row index is out of bounds [0..size).
    IndexOutOfBounds { col: usize, row: usize, size: usize },
    /// Two boards of different sizes were combined.
    SizeMismatch { left: usize, right: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { col, row, size } => {
                write!(f, "IndexOutOfBounds: col={}, row={}, size={}", col, row, size)
            }
            BitBoardError::SizeMismatch { left, right } => {
                write!(f, "SizeMismatch: {}x{} vs {}x{}", left, left, right, right)
            }
        }
    }
}

/// A `size×size` bitboard stored in words of the unsigned integer `T`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitBoard<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    size: usize,
    words: Vec<T>,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Create an empty `size×size` board (all bits cleared).
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        let len = cells.div_ceil(Self::WORD_BITS);
        BitBoard {
            size,
            words: vec![T::zero(); len],
        }
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Returns true if every cell is set.
    pub fn is_full(&self) -> bool {
        self.count_ones() == self.size * self.size
    }

    /// Gets the bit at `coord`.
    pub fn get(&self, coord: Coord) -> Result<bool, BitBoardError> {
        let (word, bit) = self.locate(coord)?;
        Ok(((self.words[word] >> bit) & T::one()) != T::zero())
    }

    /// Sets the bit at `coord` to 1.
    pub fn set(&mut self, coord: Coord) -> Result<(), BitBoardError> {
        let (word, bit) = self.locate(coord)?;
        self.words[word] = self.words[word] | (T::one() << bit);
        Ok(())
    }

    /// Clears the bit at `coord` to 0.
    pub fn clear(&mut self, coord: Coord) -> Result<(), BitBoardError> {
        let (word, bit) = self.locate(coord)?;
        self.words[word] = self.words[word] & !(T::one() << bit);
        Ok(())
    }

    /// Clears all bits to `0`.
    #[inline]
    pub fn clear_all(&mut self) {
        for w in self.words.iter_mut() {
            *w = T::zero();
        }
    }

    /// Bitwise union of two boards of the same size.
    pub fn union(&self, other: &Self) -> Result<Self, BitBoardError> {
        if self.size != other.size {
            return Err(BitBoardError::SizeMismatch {
                left: self.size,
                right: other.size,
            });
        }
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(&a, &b)| a | b)
            .collect();
        Ok(BitBoard {
            size: self.size,
            words,
        })
    }

    #[inline]
    fn locate(&self, coord: Coord) -> Result<(usize, usize), BitBoardError> {
        if coord.col >= self.size || coord.row >= self.size {
            return Err(BitBoardError::IndexOutOfBounds {
                col: coord.col,
                row: coord.row,
                size: self.size,
            });
        }
        let idx = coord.row * self.size + coord.col;
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }

    /// Creates a board from an iterator over coordinates.
    pub fn from_coords<I>(size: usize, iter: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut board = Self::new(size);
        for coord in iter {
            board.set(coord)?;
        }
        Ok(board)
    }

    /// Iterator over the set cells, row-major.
    #[inline]
    pub fn iter_set(&self) -> Cells<'_, T> {
        Cells {
            board: self,
            idx: 0,
            want: true,
        }
    }

    /// Iterator over the cleared cells, row-major.
    #[inline]
    pub fn iter_clear(&self) -> Cells<'_, T> {
        Cells {
            board: self,
            idx: 0,
            want: false,
        }
    }

    #[inline]
    fn bit_at(&self, idx: usize) -> bool {
        let word = self.words[idx / Self::WORD_BITS];
        ((word >> (idx % Self::WORD_BITS)) & T::one()) != T::zero()
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>({}x{}):", any::type_name::<T>(), self.size, self.size)?;
        fmt::Display::fmt(self, f)
    }
}

impl<T> fmt::Display for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.bit_at(r * self.size + c) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set or cleared cells of a bitboard.
#[derive(Clone)]
pub struct Cells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T>,
    idx: usize,
    want: bool,
}

impl<'a, T> Iterator for Cells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.board.size;
        while self.idx < size * size {
            let idx = self.idx;
            self.idx += 1;
            if self.board.bit_at(idx) == self.want {
                return Some(Coord::new(idx % size, idx / size));
            }
        }
        None
    }
}
