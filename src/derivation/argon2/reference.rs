//! Reference block position computation for Argon2.
//!
//! When filling a block at position (lane, index), Argon2 needs to select
//! a reference block to mix with the previous block. The selection algorithm
//! uses pseudo-random values J1 and J2 to determine which block to reference,
//! with constraints to ensure the referenced block has already been computed.

use super::memory::MemoryLayout;

/// Coordinates of the block currently being filled.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Position {
    pub pass: u32,
    pub slice: u32,
    pub lane: u32,
    /// Index within the current segment.
    pub index: u32,
}

/// Returns 1 if `a == b`, 0 otherwise, without branching.
#[inline(always)]
fn eq_mask_bit(a: u32, b: u32) -> u32 {
    (((a ^ b) as u64).wrapping_sub(1) >> 63) as u32
}

/// Computes the reference block position for the Argon2 filling algorithm.
///
/// `pseudo_rand` is either a word of the address block (data-independent
/// addressing) or the first word of the previous block (data-dependent
/// addressing). Its low half is J1, its high half J2.
///
/// The reference lane is `J2 mod lanes`, except in the first slice of the
/// first pass where only the current lane has been written. The reference
/// area covers every block already finished in the chosen lane, minus the
/// segment currently being filled by other lanes, and minus the block
/// immediately preceding the current one (which is mixed in anyway).
///
/// Whether the reference lane is the current lane depends on secret data
/// in data-dependent mode, so the area size is chosen with a mask rather
/// than a branch.
///
/// # Returns
///
/// A tuple `(reference_lane, reference_index)` identifying the block to use.
pub(crate) fn reference_position(
    pos: Position,
    layout: &MemoryLayout,
    pseudo_rand: u64,
) -> (u32, u32) {
    let segment_len = layout.segment_len;
    let lane_len = layout.lane_len;

    let j1 = pseudo_rand & 0xffff_ffff;
    let j2 = (pseudo_rand >> 32) as u32;

    let ref_lane = if pos.pass == 0 && pos.slice == 0 {
        pos.lane
    } else {
        j2 % layout.lanes
    };

    let finished = if pos.pass == 0 {
        pos.slice * segment_len
    } else {
        lane_len - segment_len
    };

    let same_lane_area = finished.wrapping_add(pos.index).wrapping_sub(1);
    let other_lane_area = finished.wrapping_sub((pos.index == 0) as u32);

    let mask = 0u32.wrapping_sub(eq_mask_bit(ref_lane, pos.lane));
    let area = (same_lane_area & mask) | (other_lane_area & !mask);

    // Phi: x = J1² / 2³², relative = W - 1 - (W × x / 2³²)
    let x = (j1 * j1) >> 32;
    let area = area as u64;
    let relative = area - 1 - ((area * x) >> 32);

    let start = if pos.pass == 0 || pos.slice == 3 {
        0
    } else {
        (pos.slice + 1) * segment_len
    };

    let ref_index = ((start as u64 + relative) % lane_len as u64) as u32;

    (ref_lane, ref_index)
}
