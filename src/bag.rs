//! 7-bag randomizer for piece generation
//!
//! All 7 kinds are shuffled together and dealt out before the next
//! shuffle, which keeps droughts short. The queue always holds at least one
//! kind beyond the one just drawn so a "next" preview is available.

use crate::tetromino::PieceKind;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag {
    /// Upcoming kinds, front is drawn first
    queue: VecDeque<PieceKind>,
    rng: ChaCha8Rng,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a randomizer seeded from the thread RNG
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a deterministic randomizer
    pub fn with_seed(seed: u64) -> Self {
        let mut bag = Self {
            queue: VecDeque::with_capacity(14),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        bag.refill();
        bag
    }

    /// Draw the next kind, appending a fresh bag first whenever this draw
    /// would leave nothing to preview
    pub fn next(&mut self) -> PieceKind {
        if self.queue.len() <= 1 {
            self.refill();
        }
        match self.queue.pop_front() {
            Some(kind) => kind,
            // refill() always pushes seven kinds
            None => unreachable!("bag refilled before draw"),
        }
    }

    /// The kind the next draw will return
    pub fn peek(&self) -> PieceKind {
        match self.queue.front() {
            Some(&kind) => kind,
            None => unreachable!("bag keeps one kind queued"),
        }
    }

    /// Preview up to `count` upcoming kinds without removing them
    pub fn preview(&self, count: usize) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied().take(count)
    }

    /// Drop everything queued and start over from a fresh bag, continuing
    /// the same random stream
    pub fn reset(&mut self) {
        self.queue.clear();
        self.refill();
    }

    /// Append a new shuffled bag
    fn refill(&mut self) {
        let mut new_bag = PieceKind::all();
        new_bag.shuffle(&mut self.rng);
        self.queue.extend(new_bag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut bag = Bag::with_seed(7);
        for _ in 0..20 {
            // Every run of 7 draws from a bag boundary is a permutation
            let pieces: HashSet<_> = (0..7).map(|_| bag.next()).collect();
            assert_eq!(pieces.len(), 7);
        }
    }

    #[test]
    fn test_peek_matches_next() {
        let mut bag = Bag::with_seed(42);
        for _ in 0..30 {
            let expected = bag.peek();
            assert_eq!(bag.next(), expected);
        }
    }

    #[test]
    fn test_preview_always_available() {
        let mut bag = Bag::with_seed(1);
        for _ in 0..50 {
            bag.next();
            assert!(bag.preview(1).count() == 1);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag::with_seed(1234);
        let mut b = Bag::with_seed(1234);
        let seq_a: Vec<_> = (0..28).map(|_| a.next()).collect();
        let seq_b: Vec<_> = (0..28).map(|_| b.next()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_reset_starts_on_bag_boundary() {
        let mut bag = Bag::with_seed(99);
        bag.next();
        bag.next();
        bag.reset();
        let pieces: HashSet<_> = (0..7).map(|_| bag.next()).collect();
        assert_eq!(pieces.len(), 7);
    }
}
