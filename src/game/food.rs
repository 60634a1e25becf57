use rand::seq::SliceRandom;
use rand::Rng;

use super::state::Position;

/// Uneaten food on the board.
///
/// Cells are unique and, whenever `replenish` has run, disjoint from every
/// snake body: placement only ever draws from cells the caller reports as
/// vacant.
#[derive(Debug, Clone)]
pub struct FoodPool {
    target: usize,
    cells: Vec<Position>,
}

impl FoodPool {
    /// Create an empty pool that `replenish` fills up to `target` items
    pub fn new(target: usize) -> Self {
        Self {
            target,
            cells: Vec::with_capacity(target),
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Remove the food item at `pos`, reporting whether one was there
    pub fn take(&mut self, pos: Position) -> bool {
        match self.cells.iter().position(|p| *p == pos) {
            Some(idx) => {
                self.cells.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// Top the pool back up to its target size, drawing uniformly without
    /// replacement from `vacant`. Near board-full there may be fewer vacant
    /// cells than needed; the pool then simply stays short.
    pub fn replenish<R: Rng>(&mut self, mut vacant: Vec<Position>, rng: &mut R) {
        if self.cells.len() >= self.target {
            return;
        }
        vacant.shuffle(rng);
        while self.cells.len() < self.target {
            match vacant.pop() {
                Some(pos) => self.cells.push(pos),
                None => break,
            }
        }
    }
}
