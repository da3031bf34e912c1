use crate::{
    block::{Address, Block},
    freelist::{carve, coalesce, insert_by_addr, take_allocated},
};

// First fit keeps the free list sorted ascending by address,
// so scanning in list order finds the lowest-addressed block
// that can hold the request.

pub(super) fn allocate(
    size: usize,
    free: &mut Vec<Block>,
    allocated: &mut Vec<Block>,
) -> Option<Block> {
    let index = free.iter().position(|block| block.size >= size)?;

    let taken = carve(free, index, size);
    allocated.push(taken);

    Some(taken)
}

pub(super) fn free(
    addr: Address,
    free: &mut Vec<Block>,
    allocated: &mut Vec<Block>,
) -> Option<Block> {
    let freed = take_allocated(allocated, addr)?;

    // The block goes back in at its address-sorted position,
    // then any runs it closed up are merged.
    insert_by_addr(free, freed);
    coalesce(free);

    Some(freed)
}
