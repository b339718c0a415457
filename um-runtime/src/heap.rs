//! Block heap
//!
//! Blocks are addressed by opaque `u32` indices. Block 0 always holds the
//! running program. Reclaimed indices go onto a free list and are handed out
//! again last-in first-out before any fresh index is minted.

use std::collections::TryReserveError;
use thiserror::Error;
use tracing::debug;
use um_spec::{Word, PROGRAM_BLOCK};

/// Heap access failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("Array {index} is not an active allocation")]
    OutOfBoundsArray { index: u32 },

    #[error("Offset {offset} out of bounds for array {index} of {len} words")]
    OutOfBoundsOffset { index: u32, offset: u32, len: usize },

    #[error("Cannot abandon array {index}")]
    InvalidReclaim { index: u32 },

    #[error("Allocation of {requested} words exceeds the limit of {limit}")]
    AllocationTooLarge { requested: u32, limit: u32 },

    #[error("Array index space exhausted")]
    IndexSpaceExhausted,

    #[error("Could not allocate {requested} words")]
    OutOfMemory { requested: u32 },
}

/// Heap lifecycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Successful allocations
    pub allocations: u64,
    /// Successful reclamations
    pub reclamations: u64,
    /// Highest number of simultaneously live blocks, block 0 included
    pub peak_live_blocks: usize,
    /// Times block 0 was replaced by another block
    pub program_loads: u64,
}

#[derive(Debug, Clone)]
pub struct Heap {
    blocks: Vec<Option<Vec<Word>>>,
    free: Vec<u32>,
    live: usize,
    max_block_words: u32,
    stats: HeapStats,
}

impl Heap {
    /// Create a heap whose block 0 holds `program`
    pub fn new(program: Vec<Word>) -> Self {
        Self::with_limit(program, u32::MAX)
    }

    /// Create a heap that refuses allocations larger than `max_block_words`
    pub fn with_limit(program: Vec<Word>, max_block_words: u32) -> Self {
        Heap {
            blocks: vec![Some(program)],
            free: Vec::new(),
            live: 1,
            max_block_words,
            stats: HeapStats {
                peak_live_blocks: 1,
                ..HeapStats::default()
            },
        }
    }

    /// Allocate a zero-filled block of `size` words
    pub fn allocate(&mut self, size: u32) -> Result<u32, HeapError> {
        if size > self.max_block_words {
            return Err(HeapError::AllocationTooLarge {
                requested: size,
                limit: self.max_block_words,
            });
        }

        let block = zeroed_block(size as usize)
            .map_err(|_| HeapError::OutOfMemory { requested: size })?;
        let index = match self.free.pop() {
            Some(index) => {
                self.blocks[index as usize] = Some(block);
                index
            }
            None => {
                let index =
                    u32::try_from(self.blocks.len()).map_err(|_| HeapError::IndexSpaceExhausted)?;
                self.blocks.push(Some(block));
                index
            }
        };

        self.live += 1;
        self.stats.allocations += 1;
        self.stats.peak_live_blocks = self.stats.peak_live_blocks.max(self.live);
        debug!(index, size, "allocate");
        Ok(index)
    }

    /// Read one word
    pub fn read(&self, index: u32, offset: u32) -> Result<Word, HeapError> {
        let block = self.block(index)?;
        block
            .get(offset as usize)
            .copied()
            .ok_or(HeapError::OutOfBoundsOffset {
                index,
                offset,
                len: block.len(),
            })
    }

    /// Write one word
    pub fn write(&mut self, index: u32, offset: u32, value: Word) -> Result<(), HeapError> {
        let block = self
            .blocks
            .get_mut(index as usize)
            .and_then(Option::as_mut)
            .ok_or(HeapError::OutOfBoundsArray { index })?;
        let len = block.len();
        let slot = block
            .get_mut(offset as usize)
            .ok_or(HeapError::OutOfBoundsOffset { index, offset, len })?;
        *slot = value;
        Ok(())
    }

    /// Abandon a block, making its index available for reuse
    pub fn reclaim(&mut self, index: u32) -> Result<(), HeapError> {
        if index == PROGRAM_BLOCK {
            return Err(HeapError::InvalidReclaim { index });
        }
        match self.blocks.get_mut(index as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => return Err(HeapError::InvalidReclaim { index }),
        }

        self.free.push(index);
        self.live -= 1;
        self.stats.reclamations += 1;
        debug!(index, "reclaim");
        Ok(())
    }

    /// Replace block 0 with a copy of block `index`
    pub fn replace_zero(&mut self, index: u32) -> Result<(), HeapError> {
        if index == PROGRAM_BLOCK {
            return Ok(());
        }
        let copy = self.block(index)?.clone();
        debug!(index, words = copy.len(), "load program");
        self.blocks[PROGRAM_BLOCK as usize] = Some(copy);
        self.stats.program_loads += 1;
        Ok(())
    }

    /// Size of a live block
    pub fn len(&self, index: u32) -> Result<usize, HeapError> {
        self.block(index).map(Vec::len)
    }

    pub fn is_live(&self, index: u32) -> bool {
        self.block(index).is_ok()
    }

    /// Number of live blocks, block 0 included
    pub fn live_blocks(&self) -> usize {
        self.live
    }

    /// Indices waiting on the free list, most recently freed last
    pub fn free_slots(&self) -> &[u32] {
        &self.free
    }

    /// Current contents of block 0
    pub fn program(&self) -> &[Word] {
        self.blocks
            .first()
            .and_then(Option::as_deref)
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> HeapStats {
        self.stats
    }

    fn block(&self, index: u32) -> Result<&Vec<Word>, HeapError> {
        self.blocks
            .get(index as usize)
            .and_then(Option::as_ref)
            .ok_or(HeapError::OutOfBoundsArray { index })
    }
}

/// Zero-filled block that reports allocation failure instead of aborting
fn zeroed_block(words: usize) -> Result<Vec<Word>, TryReserveError> {
    let mut block = Vec::new();
    block.try_reserve_exact(words)?;
    block.resize(words, 0);
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_program_is_block_zero() {
        let heap = Heap::new(vec![1, 2, 3]);
        assert_eq!(heap.program(), &[1, 2, 3]);
        assert!(heap.is_live(0));
        assert_eq!(heap.live_blocks(), 1);
    }

    #[test]
    fn test_allocate_zero_filled() {
        let mut heap = Heap::new(vec![]);
        let index = heap.allocate(4).unwrap();
        assert_ne!(index, 0);
        assert_eq!(heap.len(index).unwrap(), 4);
        for offset in 0..4 {
            assert_eq!(heap.read(index, offset).unwrap(), 0);
        }
    }

    #[test]
    fn test_allocate_empty_block() {
        let mut heap = Heap::new(vec![]);
        let index = heap.allocate(0).unwrap();
        assert!(heap.is_live(index));
        assert_eq!(
            heap.read(index, 0),
            Err(HeapError::OutOfBoundsOffset {
                index,
                offset: 0,
                len: 0
            })
        );
    }

    #[test]
    fn test_write_then_read() {
        let mut heap = Heap::new(vec![]);
        let index = heap.allocate(10).unwrap();
        heap.write(index, 3, 42).unwrap();
        assert_eq!(heap.read(index, 3).unwrap(), 42);
    }

    #[test]
    fn test_unallocated_index() {
        let mut heap = Heap::new(vec![]);
        assert_eq!(heap.read(5, 0), Err(HeapError::OutOfBoundsArray { index: 5 }));
        assert_eq!(heap.write(5, 0, 1), Err(HeapError::OutOfBoundsArray { index: 5 }));
        assert!(!heap.is_live(5));
    }

    #[test]
    fn test_reclaim_zero_fails() {
        let mut heap = Heap::new(vec![7]);
        assert_eq!(heap.reclaim(0), Err(HeapError::InvalidReclaim { index: 0 }));
        assert_eq!(heap.program(), &[7]);
    }

    #[test]
    fn test_double_reclaim_fails() {
        let mut heap = Heap::new(vec![]);
        let index = heap.allocate(1).unwrap();
        heap.reclaim(index).unwrap();
        assert_eq!(heap.reclaim(index), Err(HeapError::InvalidReclaim { index }));
        assert_eq!(heap.read(index, 0), Err(HeapError::OutOfBoundsArray { index }));
    }

    #[test]
    fn test_reuse_is_lifo() {
        let mut heap = Heap::new(vec![]);
        let a = heap.allocate(1).unwrap();
        let b = heap.allocate(1).unwrap();
        heap.reclaim(a).unwrap();
        heap.reclaim(b).unwrap();
        assert_eq!(heap.free_slots(), &[a, b]);
        assert_eq!(heap.allocate(1).unwrap(), b);
        assert_eq!(heap.allocate(1).unwrap(), a);
        assert!(heap.free_slots().is_empty());
    }

    #[test]
    fn test_reused_block_is_zeroed() {
        let mut heap = Heap::new(vec![]);
        let index = heap.allocate(2).unwrap();
        heap.write(index, 1, 99).unwrap();
        heap.reclaim(index).unwrap();
        let again = heap.allocate(2).unwrap();
        assert_eq!(again, index);
        assert_eq!(heap.read(again, 1).unwrap(), 0);
    }

    #[test]
    fn test_replace_zero_copies() {
        let mut heap = Heap::new(vec![0xAAAA]);
        let index = heap.allocate(2).unwrap();
        heap.write(index, 0, 1).unwrap();
        heap.write(index, 1, 2).unwrap();

        heap.replace_zero(index).unwrap();
        assert_eq!(heap.program(), &[1, 2]);

        // Source stays independent
        heap.write(index, 0, 9).unwrap();
        assert_eq!(heap.program(), &[1, 2]);
        assert_eq!(heap.stats().program_loads, 1);
    }

    #[test]
    fn test_replace_zero_with_itself() {
        let mut heap = Heap::new(vec![5, 6]);
        heap.replace_zero(0).unwrap();
        assert_eq!(heap.program(), &[5, 6]);
        assert_eq!(heap.stats().program_loads, 0);
    }

    #[test]
    fn test_replace_zero_dead_block() {
        let mut heap = Heap::new(vec![]);
        assert_eq!(heap.replace_zero(3), Err(HeapError::OutOfBoundsArray { index: 3 }));
    }

    #[test]
    fn test_allocation_limit() {
        let mut heap = Heap::with_limit(vec![], 8);
        assert!(heap.allocate(8).is_ok());
        assert_eq!(
            heap.allocate(9),
            Err(HeapError::AllocationTooLarge {
                requested: 9,
                limit: 8
            })
        );
    }

    #[test]
    fn test_unsatisfiable_block_is_an_error() {
        assert!(zeroed_block(usize::MAX).is_err());
        assert_eq!(zeroed_block(3).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_stats() {
        let mut heap = Heap::new(vec![]);
        let a = heap.allocate(1).unwrap();
        let _b = heap.allocate(1).unwrap();
        heap.reclaim(a).unwrap();
        let _c = heap.allocate(1).unwrap();

        let stats = heap.stats();
        assert_eq!(stats.allocations, 3);
        assert_eq!(stats.reclamations, 1);
        assert_eq!(stats.peak_live_blocks, 3);
        assert_eq!(heap.live_blocks(), 3);
    }

    proptest! {
        #[test]
        fn prop_reclaim_then_allocate_returns_same_index(sizes in prop::collection::vec(0u32..64, 1..16), pick in any::<prop::sample::Index>()) {
            let mut heap = Heap::new(vec![]);
            let indices: Vec<u32> = sizes.iter().map(|&s| heap.allocate(s).unwrap()).collect();
            let victim = indices[pick.index(indices.len())];

            heap.reclaim(victim).unwrap();
            prop_assert_eq!(heap.allocate(3).unwrap(), victim);
        }

        #[test]
        fn prop_live_indices_are_distinct(ops in prop::collection::vec(any::<bool>(), 1..64)) {
            let mut heap = Heap::new(vec![]);
            let mut live: Vec<u32> = Vec::new();
            for alloc in ops {
                if alloc || live.is_empty() {
                    let index = heap.allocate(1).unwrap();
                    prop_assert!(index != 0);
                    prop_assert!(!live.contains(&index));
                    live.push(index);
                } else if let Some(index) = live.pop() {
                    heap.reclaim(index).unwrap();
                }
            }
            prop_assert_eq!(heap.live_blocks(), live.len() + 1);
        }
    }
}
