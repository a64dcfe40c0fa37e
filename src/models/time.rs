//! Time-block arithmetic.
//!
//! The scheduling day is a virtual window from `START_HOUR` to
//! `PHYSICAL_END_HOUR`, which may run past midnight (06:00 to 02:00 the
//! next morning). The window is cut into fixed 15-minute blocks; a block
//! index is the atomic unit of assignment everywhere in this crate.
//!
//! # Day Boundary
//! A wall-clock hour strictly below `START_HOUR` belongs to the following
//! day, so `01:30` maps to effective hour 25. Displayed clock times wrap
//! back modulo 24.
//!
//! # Resolution
//! The window bounds and resolution are constants shared by every
//! component of a scheduling run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OutOfRangeError;

/// First wall-clock hour of the scheduling day.
pub const START_HOUR: u32 = 6;
/// Effective hour at which the day ends (exclusive). `26` is 02:00 next day.
pub const PHYSICAL_END_HOUR: u32 = 26;
/// Number of blocks per hour.
pub const BLOCKS_PER_HOUR: u32 = 4;
/// Minutes covered by one block.
pub const MINUTES_PER_BLOCK: u32 = 60 / BLOCKS_PER_HOUR;
/// Number of blocks in the scheduling day.
pub const TOTAL_BLOCKS: usize = ((PHYSICAL_END_HOUR - START_HOUR) * BLOCKS_PER_HOUR) as usize;

/// A wall-clock time of day, as shown to people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    /// Hour of day (0..24).
    pub hour: u32,
    /// Minute of hour (0..60).
    pub minute: u32,
}

impl ClockTime {
    /// Creates a clock time.
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Effective hour within the virtual day (hours before the start roll over).
#[inline]
fn effective_hour(hour: u32) -> u32 {
    if hour < START_HOUR {
        hour + 24
    } else {
        hour
    }
}

/// Converts a wall-clock time to the block that contains it.
///
/// Minutes floor to their block. Hours before `START_HOUR` are taken as the
/// next day.
///
/// # Errors
/// `OutOfRangeError::Time` when the minute is not below 60 or the effective
/// hour falls outside `[START_HOUR, PHYSICAL_END_HOUR)`.
pub fn time_to_block(hour: u32, minute: u32) -> Result<usize, OutOfRangeError> {
    let h = effective_hour(hour);
    if minute >= 60 || !(START_HOUR..PHYSICAL_END_HOUR).contains(&h) {
        return Err(OutOfRangeError::Time { hour, minute });
    }
    Ok(((h - START_HOUR) * BLOCKS_PER_HOUR + minute / MINUTES_PER_BLOCK) as usize)
}

/// Converts a wall-clock time to a block boundary.
///
/// Like [`time_to_block`], but also accepts the exact end of the window
/// (e.g. `02:00`), returning `TOTAL_BLOCKS`. Used for exclusive shift ends.
pub fn time_to_boundary(hour: u32, minute: u32) -> Result<usize, OutOfRangeError> {
    if effective_hour(hour) == PHYSICAL_END_HOUR && minute == 0 {
        return Ok(TOTAL_BLOCKS);
    }
    time_to_block(hour, minute)
}

/// Converts a block index back to the wall-clock time it starts at.
///
/// # Errors
/// `OutOfRangeError::Block` for `block >= TOTAL_BLOCKS`.
pub fn block_to_time(block: usize) -> Result<ClockTime, OutOfRangeError> {
    check_block(block)?;
    let minutes = block as u32 * MINUTES_PER_BLOCK;
    Ok(ClockTime {
        hour: (START_HOUR + minutes / 60) % 24,
        minute: minutes % 60,
    })
}

/// Fails unless `block` lies in `[0, TOTAL_BLOCKS)`.
#[inline]
pub fn check_block(block: usize) -> Result<(), OutOfRangeError> {
    if block < TOTAL_BLOCKS {
        Ok(())
    } else {
        Err(OutOfRangeError::Block {
            block,
            total: TOTAL_BLOCKS,
        })
    }
}

/// Formats a block for messages, falling back to the raw index.
pub(crate) fn describe_block(block: usize) -> String {
    match block_to_time(block) {
        Ok(t) => t.to_string(),
        Err(_) => format!("block {block}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_constants() {
        assert_eq!(MINUTES_PER_BLOCK, 15);
        assert_eq!(TOTAL_BLOCKS, 80);
    }

    #[test]
    fn test_time_to_block_basic() {
        assert_eq!(time_to_block(6, 0).unwrap(), 0);
        assert_eq!(time_to_block(6, 14).unwrap(), 0);
        assert_eq!(time_to_block(6, 15).unwrap(), 1);
        assert_eq!(time_to_block(8, 0).unwrap(), 8);
        assert_eq!(time_to_block(23, 45).unwrap(), 71);
    }

    #[test]
    fn test_time_past_midnight() {
        assert_eq!(time_to_block(0, 0).unwrap(), 72);
        assert_eq!(time_to_block(24, 0).unwrap(), 72);
        assert_eq!(time_to_block(1, 45).unwrap(), 79);
    }

    #[test]
    fn test_time_out_of_range() {
        assert!(time_to_block(2, 0).is_err());
        assert!(time_to_block(5, 59).is_err());
        assert!(time_to_block(26, 0).is_err());
        assert!(time_to_block(8, 60).is_err());
        assert_eq!(
            time_to_block(3, 0),
            Err(OutOfRangeError::Time { hour: 3, minute: 0 })
        );
    }

    #[test]
    fn test_boundary() {
        assert_eq!(time_to_boundary(2, 0).unwrap(), TOTAL_BLOCKS);
        assert_eq!(time_to_boundary(26, 0).unwrap(), TOTAL_BLOCKS);
        assert_eq!(time_to_boundary(12, 0).unwrap(), 24);
        assert!(time_to_boundary(2, 15).is_err());
    }

    #[test]
    fn test_block_to_time() {
        assert_eq!(block_to_time(0).unwrap(), ClockTime::new(6, 0));
        assert_eq!(block_to_time(9).unwrap(), ClockTime::new(8, 15));
        assert_eq!(block_to_time(72).unwrap(), ClockTime::new(0, 0));
        assert_eq!(block_to_time(79).unwrap().to_string(), "01:45");
        assert!(block_to_time(TOTAL_BLOCKS).is_err());
    }

    #[test]
    fn test_round_trip_all_blocks() {
        for h in 0..24 {
            for m in (0..60).step_by(MINUTES_PER_BLOCK as usize) {
                if let Ok(b) = time_to_block(h, m) {
                    assert_eq!(block_to_time(b).unwrap(), ClockTime::new(h % 24, m));
                }
            }
        }
        for b in 0..TOTAL_BLOCKS {
            let t = block_to_time(b).unwrap();
            assert_eq!(time_to_block(t.hour, t.minute).unwrap(), b);
        }
    }

    #[test]
    fn test_describe_block() {
        assert_eq!(describe_block(4), "07:00");
        assert_eq!(describe_block(500), "block 500");
    }
}
