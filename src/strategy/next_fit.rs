use crate::{
    block::{Address, Block},
    freelist::{carve, coalesce_with, insert_by_addr, take_allocated},
};

// Next fit is first fit with a memory: instead of restarting
// at the head of the free list on every request, the scan
// resumes at the block that satisfied the previous allocation
// and wraps past the end of the list. The remembered index
// (`last_index`) has to be kept in step whenever freeing
// inserts or merges entries below it, otherwise it silently
// drifts onto the wrong block.

pub(super) fn allocate(
    size: usize,
    last_index: &mut usize,
    free: &mut Vec<Block>,
    allocated: &mut Vec<Block>,
) -> Option<Block> {
    // An empty free list never enters the loop, so the cursor
    // is left alone and the request just fails.
    for offset in 0..free.len() {
        let index = (*last_index + offset) % free.len();

        if free[index].size >= size {
            // Remember the satisfying index before carving: on
            // an exact fit the entry disappears and the cursor
            // ends up on its successor, which is where the
            // next scan should start anyway.
            *last_index = index;

            let taken = carve(free, index, size);
            allocated.push(taken);

            return Some(taken);
        }
    }

    None
}

pub(super) fn free(
    addr: Address,
    last_index: &mut usize,
    free: &mut Vec<Block>,
    allocated: &mut Vec<Block>,
) -> Option<Block> {
    let freed = take_allocated(allocated, addr)?;

    // An entry appearing at or before the cursor shifts its
    // target one slot up.
    let inserted = insert_by_addr(free, freed);
    if inserted <= *last_index {
        *last_index += 1;
    }

    // Likewise, every merge removes an entry; a removal at or
    // before the cursor shifts the target one slot down.
    // Removed indices are always at least 1, so the cursor
    // cannot underflow.
    coalesce_with(free, |removed| {
        if removed <= *last_index {
            *last_index -= 1;
        }
    });

    Some(freed)
}
