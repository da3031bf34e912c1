use std::fmt;

/// Address of a cell within the managed range.
pub type Address = usize;

/// A contiguous run of memory cells, identified by its start
/// address and its size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// First address covered by the block.
    pub addr: Address,
    /// Number of cells in the block. Never 0: a block that
    /// shrinks to nothing is removed from its list instead of
    /// being kept around empty.
    pub size: usize,
}

impl Block {
    pub fn new(addr: Address, size: usize) -> Self {
        Self { addr, size }
    }

    /// One past the last address covered by the block.
    pub fn end(&self) -> Address {
        self.addr + self.size
    }

    /// Whether `next` starts exactly where this block ends.
    /// Two free blocks in this relation form one contiguous
    /// range and can be merged.
    pub fn is_adjacent_to(&self, next: &Block) -> bool {
        self.end() == next.addr
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.addr, self.end())
    }
}
