use crate::{
    block::{Address, Block},
    strategy::Strategy,
};

use log::debug;

/// Simulated allocator over one fixed, contiguous address
/// range. It owns the free and allocated block lists and
/// applies a single placement strategy to every request; the
/// free and allocated ranges together always cover the whole
/// managed range exactly, with no overlap.
pub struct Allocator {
    /// Sub-ranges not currently handed out, in the order the
    /// strategy maintains (by address or by size).
    free_list: Vec<Block>,
    /// Blocks currently handed out, in allocation order.
    allocated_list: Vec<Block>,
    /// Fixed number of cells managed by this allocator.
    total_size: usize,
    /// Address the managed range starts at.
    base_addr: Address,
    strategy: Strategy,
}

impl Allocator {
    /// Creates an allocator over `[base_addr, base_addr +
    /// total_size)`, seeded with a single free block covering
    /// the whole range.
    pub fn new(total_size: usize, base_addr: Address, strategy: Strategy) -> Self {
        Self {
            free_list: vec![Block::new(base_addr, total_size)],
            allocated_list: Vec::new(),
            total_size,
            base_addr,
            strategy,
        }
    }

    /// Allocates `size` cells, reporting whether a block could
    /// be placed. Sizes are assumed positive; validating user
    /// input is the caller's job.
    pub fn allocate(&mut self, size: usize) -> bool {
        self.allocate_block(size).is_some()
    }

    /// Allocates `size` cells and returns the placed block. On
    /// failure both lists are left exactly as they were.
    pub fn allocate_block(&mut self, size: usize) -> Option<Block> {
        let placed = self
            .strategy
            .allocate(size, &mut self.free_list, &mut self.allocated_list);

        match &placed {
            Some(block) => debug!("allocated {block} ({size} cells)"),
            None => debug!("no free block can hold {size} cells"),
        }

        placed
    }

    /// Frees the allocated block starting at `addr`, reporting
    /// whether one existed there.
    pub fn free(&mut self, addr: Address) -> bool {
        self.free_block(addr).is_some()
    }

    /// Frees the allocated block starting at `addr` and
    /// returns it as it was handed out, before any merging
    /// with neighbouring free blocks. Returns `None`, leaving
    /// both lists untouched, when nothing is allocated there.
    pub fn free_block(&mut self, addr: Address) -> Option<Block> {
        let freed = self
            .strategy
            .free(addr, &mut self.free_list, &mut self.allocated_list);

        match &freed {
            Some(block) => debug!("freed {block}"),
            None => debug!("nothing allocated at address {addr}"),
        }

        freed
    }

    /// Blocks currently handed out, in allocation order.
    pub fn allocated(&self) -> &[Block] {
        &self.allocated_list
    }

    /// Blocks currently free, in the strategy's maintenance
    /// order.
    pub fn free_blocks(&self) -> &[Block] {
        &self.free_list
    }

    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn base_addr(&self) -> Address {
        self.base_addr
    }
}
