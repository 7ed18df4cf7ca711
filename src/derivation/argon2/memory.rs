//! Memory organization for Argon2.
//!
//! Memory is organized as a matrix of lanes (rows) and columns, with each
//! cell containing a 1024-byte block. Lanes can be processed independently
//! within each slice, enabling parallelism.

use core::marker::PhantomData;

use super::block::Block;
use super::params::Argon2Params;
use crate::error::Error;

/// Number of slices per lane (synchronization points per pass).
pub(crate) const SYNC_POINTS: u32 = 4;

/// Memory layout parameters for Argon2.
///
/// The memory is organized as follows:
/// - Total memory is divided into `lanes` independent rows.
/// - Each lane contains `lane_len` blocks.
/// - Each lane is divided into 4 slices (sync points).
/// - Each slice contains `segment_len` blocks.
#[derive(Debug, Clone)]
pub(crate) struct MemoryLayout {
    pub lanes: u32,
    pub lane_len: u32,
    pub segment_len: u32,
    pub total_blocks: u32,
}

impl MemoryLayout {
    pub(crate) fn new(params: &Argon2Params) -> Self {
        let lanes = params.lanes;
        let total_blocks = params.block_count();
        let lane_len = total_blocks / lanes;
        let segment_len = lane_len / SYNC_POINTS;

        Self {
            lanes,
            lane_len,
            segment_len,
            total_blocks,
        }
    }

    #[inline]
    pub(crate) fn index(&self, lane: u32, index_in_lane: u32) -> usize {
        lane as usize * self.lane_len as usize + index_in_lane as usize
    }

    #[inline]
    pub(crate) fn last_in_lane(&self, lane: u32) -> usize {
        self.index(lane, self.lane_len - 1)
    }
}

/// The memory matrix, owned by a single hash invocation.
///
/// Every block zeroes itself on drop, so password-derived state does not
/// outlive the computation.
pub(crate) struct Memory {
    blocks: Vec<Block>,
}

impl Memory {
    /// Allocates `layout.total_blocks` zeroed blocks.
    ///
    /// The reservation is fallible so an oversized request surfaces as
    /// [`Error::Allocation`] instead of aborting the process.
    pub(crate) fn allocate(layout: &MemoryLayout) -> Result<Self, Error> {
        let count = layout.total_blocks as usize;
        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(count)
            .map_err(|_| Error::Allocation {
                blocks: layout.total_blocks as u64,
            })?;
        blocks.resize(count, Block::ZERO);

        Ok(Self { blocks })
    }

    pub(crate) fn block(&self, index: usize) -> &Block {
        &self.blocks[index]
    }

    pub(crate) fn block_mut(&mut self, index: usize) -> &mut Block {
        &mut self.blocks[index]
    }

    /// Hands out a view that lets several lane workers fill the matrix
    /// concurrently.
    pub(crate) fn shared(&mut self) -> SharedMemory<'_> {
        SharedMemory {
            ptr: self.blocks.as_mut_ptr(),
            len: self.blocks.len(),
            _marker: PhantomData,
        }
    }
}

/// Concurrent view over the memory matrix.
///
/// Within one slice each worker writes only the segment of the lanes it
/// owns, and reads either its own lanes or segments of other lanes that
/// were completed before the last barrier. No block is ever written and
/// read by two threads between two barriers, which is what makes the
/// unsynchronized accessors below sound.
pub(crate) struct SharedMemory<'a> {
    ptr: *mut Block,
    len: usize,
    _marker: PhantomData<&'a mut [Block]>,
}

// SAFETY: access discipline is described on the type; the pointer is
// derived from a `&mut` borrow that outlives every worker.
unsafe impl Send for SharedMemory<'_> {}
unsafe impl Sync for SharedMemory<'_> {}

impl SharedMemory<'_> {
    /// # Safety
    ///
    /// No other thread may hold a mutable reference to block `index`.
    #[inline]
    pub(crate) unsafe fn get(&self, index: usize) -> &Block {
        assert!(index < self.len);
        // SAFETY: in bounds; exclusivity is guaranteed by the caller.
        unsafe { &*self.ptr.add(index) }
    }

    /// # Safety
    ///
    /// Block `index` must belong to the segment the calling worker is
    /// filling, and no other reference to it may be alive.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn get_mut(&self, index: usize) -> &mut Block {
        assert!(index < self.len);
        // SAFETY: in bounds; exclusivity is guaranteed by the caller.
        unsafe { &mut *self.ptr.add(index) }
    }
}
