use crate::block::{Address, Block};

// Maintenance helpers for the allocator's block lists. The
// placement strategies differ in how they pick a block and in
// which order they keep the free list, but they all split,
// reinsert and merge blocks the same way; that shared part
// lives here.

/// Inserts `block` into `free`, keeping the list sorted
/// ascending by address, and returns the index it landed at.
pub(crate) fn insert_by_addr(free: &mut Vec<Block>, block: Block) -> usize {
    // The insertion point is the first entry whose address
    // lies past the new block; with none, the block goes at
    // the end.
    let index = free
        .iter()
        .position(|other| other.addr > block.addr)
        .unwrap_or(free.len());

    free.insert(index, block);
    index
}

/// Carves `size` cells off the front of the free block at
/// `index`. The carved range is returned as a new block; the
/// free block shrinks by the same amount and its start moves
/// forward. A free block consumed whole is removed from the
/// list, never kept with size 0.
pub(crate) fn carve(free: &mut Vec<Block>, index: usize, size: usize) -> Block {
    let taken = Block::new(free[index].addr, size);

    free[index].size -= size;
    if free[index].size == 0 {
        free.remove(index);
    } else {
        free[index].addr += size;
    }

    taken
}

/// Merges every pair of address-adjacent blocks in `free`,
/// which must already be sorted ascending by address. Each
/// merge removes the second block of the pair; `on_merge`
/// receives the index it was removed from, so a caller that
/// keeps positional state into the list can shift it along.
pub(crate) fn coalesce_with(free: &mut Vec<Block>, mut on_merge: impl FnMut(usize)) {
    let mut i = 1;
    while i < free.len() {
        if free[i - 1].is_adjacent_to(&free[i]) {
            free[i - 1].size += free[i].size;
            free.remove(i);
            on_merge(i);
            // Stay at the same index: the merged block may be
            // adjacent to the entry that just slid into place.
            continue;
        }
        i += 1;
    }
}

/// Coalesces an address-sorted free list, for strategies with
/// no positional bookkeeping to maintain.
pub(crate) fn coalesce(free: &mut Vec<Block>) {
    coalesce_with(free, |_| {});
}

/// Reinserts a freed block into a size-ordered free list. The
/// block goes in at the end, the list is put in address order
/// so that adjacent runs can merge, and then restored to
/// ascending size order for the next allocation scan.
pub(crate) fn reinsert_size_ordered(free: &mut Vec<Block>, freed: Block) {
    free.push(freed);
    free.sort_by_key(|block| block.addr);
    coalesce(free);
    free.sort_by_key(|block| block.size);
}

/// Removes and returns the allocated block starting at `addr`,
/// or `None` when no such block exists. Addresses are unique
/// within the allocated list, so the first match is the only
/// one.
pub(crate) fn take_allocated(allocated: &mut Vec<Block>, addr: Address) -> Option<Block> {
    let index = allocated.iter().position(|block| block.addr == addr)?;
    Some(allocated.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_address_order() {
        let mut free = vec![Block::new(10, 5), Block::new(40, 5)];

        let index = insert_by_addr(&mut free, Block::new(25, 5));

        assert_eq!(index, 1);
        assert_eq!(
            free,
            vec![Block::new(10, 5), Block::new(25, 5), Block::new(40, 5)]
        );
    }

    #[test]
    fn insert_past_every_entry_appends() {
        let mut free = vec![Block::new(0, 5)];

        let index = insert_by_addr(&mut free, Block::new(50, 5));

        assert_eq!(index, 1);
        assert_eq!(free, vec![Block::new(0, 5), Block::new(50, 5)]);
    }

    #[test]
    fn carve_shrinks_and_advances_the_block() {
        let mut free = vec![Block::new(0, 50)];

        let taken = carve(&mut free, 0, 20);

        assert_eq!(taken, Block::new(0, 20));
        assert_eq!(free, vec![Block::new(20, 30)]);
    }

    #[test]
    fn carve_exact_fit_removes_the_block() {
        let mut free = vec![Block::new(0, 20), Block::new(30, 10)];

        let taken = carve(&mut free, 1, 10);

        assert_eq!(taken, Block::new(30, 10));
        assert_eq!(free, vec![Block::new(0, 20)]);
    }

    #[test]
    fn coalesce_merges_whole_chains() {
        let mut free = vec![
            Block::new(0, 10),
            Block::new(10, 5),
            Block::new(15, 5),
            Block::new(30, 5),
        ];

        coalesce(&mut free);

        assert_eq!(free, vec![Block::new(0, 20), Block::new(30, 5)]);
    }

    #[test]
    fn coalesce_reports_every_removed_index() {
        let mut free = vec![Block::new(0, 10), Block::new(10, 5), Block::new(15, 5)];
        let mut removed = Vec::new();

        coalesce_with(&mut free, |index| removed.push(index));

        // Both merges collapse into index 1 as the list
        // shrinks under the scan.
        assert_eq!(removed, vec![1, 1]);
        assert_eq!(free, vec![Block::new(0, 20)]);
    }

    #[test]
    fn reinsert_size_ordered_merges_then_sorts_by_size() {
        let mut free = vec![Block::new(0, 5), Block::new(140, 60)];

        reinsert_size_ordered(&mut free, Block::new(100, 40));

        assert_eq!(free, vec![Block::new(0, 5), Block::new(100, 100)]);
    }

    #[test]
    fn take_allocated_matches_on_start_address() {
        let mut allocated = vec![Block::new(0, 10), Block::new(30, 5)];

        assert_eq!(take_allocated(&mut allocated, 30), Some(Block::new(30, 5)));
        assert_eq!(allocated, vec![Block::new(0, 10)]);
        assert_eq!(take_allocated(&mut allocated, 30), None);
    }
}
