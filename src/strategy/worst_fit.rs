use crate::{
    block::{Address, Block},
    freelist::{carve, reinsert_size_ordered, take_allocated},
};

// Worst fit always splits the largest free block, on the
// theory that the remainder it leaves behind is still big
// enough to be useful. Because the free list is kept ascending
// by size, the largest block sits at the end and is the only
// one that needs probing: if it cannot hold the request,
// nothing can. That shortcut is only sound while every path
// through this strategy restores the size order, which is what
// `reinsert_size_ordered` and the remainder re-sort below do.

pub(super) fn allocate(
    size: usize,
    free: &mut Vec<Block>,
    allocated: &mut Vec<Block>,
) -> Option<Block> {
    let largest = free.last()?;
    if largest.size < size {
        return None;
    }

    let index = free.len() - 1;
    let exact = free[index].size == size;

    let taken = carve(free, index, size);
    allocated.push(taken);

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
