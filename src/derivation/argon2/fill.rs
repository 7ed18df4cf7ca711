//! Memory-filling passes.
//!
//! Each pass iterates through all 4 slices in order. Within each slice,
//! all lanes are processed. The slice boundaries act as synchronization
//! points: a lane can only reference blocks from other lanes that were
//! completed in previous slices.
//!
//! With the `parallel` feature the lanes of a slice are spread over a
//! fixed pool of scoped threads that meet at a barrier after every slice.

use log::trace;

use super::block::{AddressBlock, Block};
use super::memory::{Memory, MemoryLayout, SYNC_POINTS, SharedMemory};
use super::params::{Argon2Params, Variant, Version};
use super::reference::{Position, reference_position};

/// Per-invocation constants needed to fill a segment.
pub(crate) struct Filler<'a> {
    layout: &'a MemoryLayout,
    variant: Variant,
    version: Version,
    time: u32,
}

impl<'a> Filler<'a> {
    pub(crate) fn new(layout: &'a MemoryLayout, params: &Argon2Params) -> Self {
        Self {
            layout,
            variant: params.variant,
            version: params.version,
            time: params.time,
        }
    }

    /// Fills all memory blocks over the configured number of passes.
    pub(crate) fn fill(&self, memory: &mut Memory) {
        let workers = self.worker_count();
        let shared = memory.shared();

        if workers <= 1 {
            self.fill_sequential(&shared);
        } else {
            self.fill_parallel(&shared, workers);
        }
    }

    #[cfg(feature = "parallel")]
    fn worker_count(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(self.layout.lanes as usize)
    }

    #[cfg(not(feature = "parallel"))]
    fn worker_count(&self) -> usize {
        1
    }

    fn fill_sequential(&self, memory: &SharedMemory<'_>) {
        for pass in 0..self.time {
            trace!("argon2 pass {}/{}", pass + 1, self.time);
            for slice in 0..SYNC_POINTS {
                for lane in 0..self.layout.lanes {
                    // SAFETY: single thread, one segment at a time.
                    unsafe { self.fill_segment(memory, pass, slice, lane) };
                }
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn fill_parallel(&self, memory: &SharedMemory<'_>, workers: usize) {
        use std::sync::Barrier;

        let barrier = Barrier::new(workers);
        let lanes = self.layout.lanes;

        std::thread::scope(|scope| {
            for worker in 0..workers {
                let barrier = &barrier;
                scope.spawn(move || {
                    for pass in 0..self.time {
                        if worker == 0 {
                            trace!("argon2 pass {}/{} on {} workers", pass + 1, self.time, workers);
                        }
                        for slice in 0..SYNC_POINTS {
                            for lane in (worker as u32..lanes).step_by(workers) {
                                // SAFETY: each lane belongs to exactly one
                                // worker, and the barrier below separates
                                // slices.
                                unsafe { self.fill_segment(memory, pass, slice, lane) };
                            }
                            barrier.wait();
                        }
                    }
                });
            }
        });
    }

    #[cfg(not(feature = "parallel"))]
    fn fill_parallel(&self, memory: &SharedMemory<'_>, _workers: usize) {
        self.fill_sequential(memory);
    }

    fn data_independent(&self, pass: u32, slice: u32) -> bool {
        match self.variant {
            Variant::Argon2i => true,
            Variant::Argon2d => false,
            Variant::Argon2id => pass == 0 && slice < SYNC_POINTS / 2,
        }
    }

    /// Fills one segment (portion of a lane within a slice).
    ///
    /// For each block position, this function:
    /// 1. Takes the pseudo-random word from the address block or the
    ///    previous block
    /// 2. Computes the reference block position from it
    /// 3. Computes the new block as G(previous, reference), XOR-ed into the
    ///    existing block on later passes of version 1.3
    ///
    /// # Safety
    ///
    /// The caller must be the only thread filling `(slice, lane)` and every
    /// slice before `slice` of the current pass must be complete in all
    /// lanes.
    unsafe fn fill_segment(&self, memory: &SharedMemory<'_>, pass: u32, slice: u32, lane: u32) {
        let layout = self.layout;
        let with_xor = pass > 0 && self.version == Version::V0x13;

        let mut addresses = self.data_independent(pass, slice).then(|| {
            AddressBlock::new(
                pass,
                lane,
                slice,
                layout.total_blocks,
                self.time,
                self.variant,
            )
        });

        let start = if pass == 0 && slice == 0 {
            // The first two blocks come from H′; the loop below would only
            // generate addresses at index 0.
            if let Some(addresses) = addresses.as_mut() {
                addresses.advance();
            }
            2
        } else {
            0
        };

        for i in start..layout.segment_len {
            let index_in_lane = slice * layout.segment_len + i;
            let prev_in_lane = if index_in_lane == 0 {
                layout.lane_len - 1
            } else {
                index_in_lane - 1
            };

            let cur = layout.index(lane, index_in_lane);
            let prev = layout.index(lane, prev_in_lane);

            // SAFETY: `prev` lies in this lane and was written either
            // earlier in this segment or before the last barrier.
            let prev_block = unsafe { memory.get(prev) };

            let pseudo_rand = match addresses.as_mut() {
                Some(addresses) => {
                    if i % 128 == 0 {
                        addresses.advance();
                    }
                    addresses.word(i)
                }
                None => prev_block.0[0],
            };

            let position = Position {
                pass,
                slice,
                lane,
                index: i,
            };
            let (ref_lane, ref_index) = reference_position(position, layout, pseudo_rand);
            let reference = layout.index(ref_lane, ref_index);

            // SAFETY: `reference` is never the current block nor part of
            // another lane's current segment; `cur` is owned by this
            // worker and differs from `prev` and `reference`.
            unsafe {
                let ref_block = memory.get(reference);
                let dst: &mut Block = memory.get_mut(cur);
                Block::compress_into(dst, prev_block, ref_block, with_xor);
            }
        }
    }
}
