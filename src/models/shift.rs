//! Shift model.
//!
//! A shift is one contiguous availability window for an employee,
//! expressed in block coordinates as a half-open interval `[start, end)`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::time::{time_to_block, time_to_boundary, TOTAL_BLOCKS};
use crate::error::OutOfRangeError;

/// A half-open block interval `[start_block, end_block)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shift {
    /// First block on shift (inclusive).
    pub start_block: usize,
    /// First block after the shift (exclusive).
    pub end_block: usize,
}

impl Shift {
    /// Creates a shift.
    ///
    /// # Errors
    /// `OutOfRangeError::Shift` unless `start < end <= TOTAL_BLOCKS`.
    pub fn new(start_block: usize, end_block: usize) -> Result<Self, OutOfRangeError> {
        if start_block >= end_block || end_block > TOTAL_BLOCKS {
            return Err(OutOfRangeError::Shift {
                start: start_block,
                end: end_block,
                total: TOTAL_BLOCKS,
            });
        }
        Ok(Self {
            start_block,
            end_block,
        })
    }

    /// Creates a shift from wall-clock `(hour, minute)` bounds.
    ///
    /// The end may be the window end itself (`(2, 0)`), and may cross
    /// midnight: `(20, 30)..(0, 30)` is valid.
    pub fn from_clock(start: (u32, u32), end: (u32, u32)) -> Result<Self, OutOfRangeError> {
        let start_block = time_to_block(start.0, start.1)?;
        let end_block = time_to_boundary(end.0, end.1)?;
        Self::new(start_block, end_block)
    }

    /// Whether `block` is on shift.
    #[inline]
    pub fn contains(&self, block: usize) -> bool {
        self.start_block <= block && block < self.end_block
    }

    /// Number of blocks covered.
    #[inline]
    pub fn duration(&self) -> usize {
        self.end_block - self.start_block
    }

    /// Covered blocks as a range.
    pub fn blocks(&self) -> Range<usize> {
        self.start_block..self.end_block
    }

    /// Whether two shifts share a block.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_block < other.end_block && other.start_block < self.end_block
    }
}
