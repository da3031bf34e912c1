mod best_fit;
mod first_fit;
mod next_fit;
mod worst_fit;

use crate::block::{Address, Block};

use std::{fmt, str::FromStr};
use thiserror::Error;

// The macro will create an error type with a Display impl that
// prints the given string.
#[derive(Error, Debug)]
#[error("Unknown placement strategy '{0}'.")]
pub struct UnknownStrategy(pub String);

/// Placement strategy deciding which free block satisfies an
/// allocation request, and in which order the free list is
/// kept between requests.
///
/// The set of strategies is closed, so they are dispatched
/// over an enum rather than a trait object. `NextFit` is the
/// only one carrying state of its own: the index of the free
/// block that satisfied its previous allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Takes the first block in address order that is large
    /// enough.
    FirstFit,
    /// Like `FirstFit`, but resumes scanning at the block that
    /// satisfied the previous allocation, wrapping around the
    /// end of the list.
    NextFit { last_index: usize },
    /// Keeps the free list ascending by size and takes the
    /// smallest block that is large enough.
    BestFit,
    /// Keeps the free list ascending by size and takes the
    /// largest block, failing outright when that one is too
    /// small.
    WorstFit,
}

impl Strategy {
    /// Places a block of `size` cells per the strategy's
    /// selection rule. The chosen free block shrinks (or
    /// disappears, on an exact fit) and the new block is
    /// appended to the allocated list. Returns `None` when no
    /// free block is large enough, leaving both lists
    /// untouched.
    pub fn allocate(
        &mut self,
        size: usize,
        free: &mut Vec<Block>,
        allocated: &mut Vec<Block>,
    ) -> Option<Block> {
        match self {
            Strategy::FirstFit => first_fit::allocate(size, free, allocated),
            Strategy::NextFit { last_index } => next_fit::allocate(size, last_index, free, allocated),
            Strategy::BestFit => best_fit::allocate(size, free, allocated),
            Strategy::WorstFit => worst_fit::allocate(size, free, allocated),
        }
    }

    /// Releases the allocated block starting at `addr`: it is
    /// moved back into the free list at the strategy's
    /// maintenance position and merged with any neighbours it
    /// touches. Returns the block as it was handed out, before
    /// merging, or `None` when no allocated block starts at
    /// `addr`.
    pub fn free(
        &mut self,
        addr: Address,
        free: &mut Vec<Block>,
        allocated: &mut Vec<Block>,
    ) -> Option<Block> {
        match self {
            Strategy::FirstFit => first_fit::free(addr, free, allocated),
            Strategy::NextFit { last_index } => next_fit::free(addr, last_index, free, allocated),
            // Both size-ordered strategies release blocks the
            // same way; they only differ on allocation.
            Strategy::BestFit => best_fit::free(addr, free, allocated),
            Strategy::WorstFit => worst_fit::free(addr, free, allocated),
        }
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "firstfit" | "first-fit" | "first" => Ok(Strategy::FirstFit),
            "nextfit" | "next-fit" | "next" => Ok(Strategy::NextFit { last_index: 0 }),
            "bestfit" | "best-fit" | "best" => Ok(Strategy::BestFit),
            "worstfit" | "worst-fit" | "worst" => Ok(Strategy::WorstFit),
            _ => Err(UnknownStrategy(name.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::FirstFit => "FirstFit",
            Strategy::NextFit { .. } => "NextFit",
            Strategy::BestFit => "BestFit",
            Strategy::WorstFit => "WorstFit",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_to_strategies() {
        assert_eq!("FirstFit".parse::<Strategy>().unwrap(), Strategy::FirstFit);
        assert_eq!(
            "next-fit".parse::<Strategy>().unwrap(),
            Strategy::NextFit { last_index: 0 }
        );
        assert_eq!("best".parse::<Strategy>().unwrap(), Strategy::BestFit);
        assert_eq!("worstfit".parse::<Strategy>().unwrap(), Strategy::WorstFit);

        let error = "buddy".parse::<Strategy>().unwrap_err();
        assert_eq!(error.to_string(), "Unknown placement strategy 'buddy'.");
    }

    // With free blocks of sizes {50, 10, 30}, a request for 20
    // cells separates the strategies: first fit takes the
    // 50-cell block (first in address order), best fit the
    // 30-cell block (smallest sufficient), worst fit the
    // 50-cell block (largest overall).

    #[test]
    fn first_fit_takes_the_first_sufficient_block() {
        let mut strategy = Strategy::FirstFit;
        let mut free = vec![Block::new(0, 50), Block::new(50, 10), Block::new(60, 30)];
        let mut allocated = Vec::new();

        let taken = strategy.allocate(20, &mut free, &mut allocated).unwrap();

        assert_eq!(taken, Block::new(0, 20));
    }

    #[test]
    fn best_fit_takes_the_smallest_sufficient_block() {
        let mut strategy = Strategy::BestFit;
        // Size-ordered view of the same three blocks.
        let mut free = vec![Block::new(50, 10), Block::new(60, 30), Block::new(0, 50)];
        let mut allocated = Vec::new();

        let taken = strategy.allocate(20, &mut free, &mut allocated).unwrap();

        assert_eq!(taken, Block::new(60, 20));
    }

    #[test]
    fn worst_fit_takes_the_largest_block() {
        let mut strategy = Strategy::WorstFit;
        let mut free = vec![Block::new(50, 10), Block::new(60, 30), Block::new(0, 50)];
        let mut allocated = Vec::new();

        let taken = strategy.allocate(20, &mut free, &mut allocated).unwrap();

        assert_eq!(taken, Block::new(0, 20));
    }
}
