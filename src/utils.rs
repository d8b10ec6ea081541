//! Free-standing bit-scan helpers used throughout move generation and eval.

use crate::bitboard::BitboardExt;

/// Pops and returns the index of the least significant set bit, clearing it in `bb`.
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> u32 {
    bb.pop_lsb() as u32
}

/// Index of the least significant set bit without mutating `bb`.
#[inline(always)]
pub fn lsb_index(bb: u64) -> u32 {
    bb.lsb() as u32
}

/// Converts a (rank, file) pair into a 0..64 square index.
#[inline(always)]
pub fn square_index(rank: usize, file: usize) -> usize {
    rank * 8 + file
}
