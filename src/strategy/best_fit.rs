use crate::{
    block::{Address, Block},
    freelist::{carve, reinsert_size_ordered, take_allocated},
};

// Best fit keeps the free list sorted ascending by size, so
// the first block large enough for a request is also the
// tightest fit for it. The price is paid on the maintenance
// side: any operation that changes a block's size has to
// restore the order.

pub(super) fn allocate(
    size: usize,
    free: &mut Vec<Block>,
    allocated: &mut Vec<Block>,
) -> Option<Block> {
    let index = free.iter().position(|block| block.size >= size)?;
    let exact = free[index].size == size;

    let taken = carve(free, index, size);
    allocated.push(taken);

    // The remainder is smaller than the block it was carved
    // from, so it may now sort before entries it used to
    // follow. An exact fit removes the entry instead and the
    // order is undisturbed.
    if !exact {
        free.sort_by_key(|block| block.size);
    }

    Some(taken)
}

pub(super) fn free(
    addr: Address,
    free: &mut Vec<Block>,
    allocated: &mut Vec<Block>,
) -> Option<Block> {
    let freed = take_allocated(allocated, addr)?;
    reinsert_size_ordered(free, freed);

    Some(freed)
}
