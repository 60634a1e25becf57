use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::action::Direction;
use super::snapshot::{SnakeView, Snapshot};
use super::state::Board;

/// Per-round decision function of one snake.
///
/// `decide` never fails; returning `None` means the snake holds still this
/// round. Implementations only ever see read-only views, all mutation stays
/// inside the turn engine.
pub trait Policy: fmt::Debug {
    fn decide(&mut self, snapshot: &Snapshot, you: &SnakeView) -> Option<Direction>;
}

/// Cloneable writer end of a player's intent queue.
///
/// The input collaborator (keyboard decoder, network handler, test driver)
/// pushes already-decoded directions here; the owning [`PlayerPolicy`]
/// drains them one per round.
#[derive(Debug, Clone, Default)]
pub struct IntentHandle {
    queue: Rc<RefCell<VecDeque<Direction>>>,
}

impl IntentHandle {
    /// Queue a directional intent for the next free round
    pub fn push(&self, direction: Direction) {
        self.queue.borrow_mut().push_back(direction);
    }

    fn pop(&self) -> Option<Direction> {
        self.queue.borrow_mut().pop_front()
    }
}

/// Externally driven policy for the player snake.
///
/// Pops the oldest queued intent; with an empty queue it keeps repeating the
/// last direction it returned, so a single key press produces movement every
/// round until changed. Before any intent was ever queued it passes.
#[derive(Debug, Default)]
pub struct PlayerPolicy {
    intents: IntentHandle,
    last: Option<Direction>,
}

impl PlayerPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer end for the input collaborator
    pub fn handle(&self) -> IntentHandle {
        self.intents.clone()
    }
}

impl Policy for PlayerPolicy {
    fn decide(&mut self, _snapshot: &Snapshot, _you: &SnakeView) -> Option<Direction> {
        if let Some(direction) = self.intents.pop() {
            self.last = Some(direction);
        }
        self.last
    }
}

/// Autonomous policy: a random walk that never reverses and never walks
/// straight off the board.
///
/// When every direction is either the reverse of the previous one or off the
/// edge, it repeats its previous direction and lets the engine resolve the
/// resulting collision. Cornered snakes die; that is the intended outcome.
#[derive(Debug)]
pub struct RandomWalker {
    rng: SmallRng,
    last: Option<Direction>,
}

impl RandomWalker {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng, last: None }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl Policy for RandomWalker {
    fn decide(&mut self, snapshot: &Snapshot, you: &SnakeView) -> Option<Direction> {
        let head = match you.head() {
            Some(head) => head,
            None => return self.last,
        };
        let board = Board::new(snapshot.board.width, snapshot.board.height);

        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| {
                if self.last.map_or(false, |last| last.is_opposite(*direction)) {
                    return false;
                }
                board.in_bounds(head.moved_in_direction(*direction))
            })
            .collect();

        if let Some(direction) = candidates.choose(&mut self.rng) {
            self.last = Some(*direction);
        }
        self.last
    }
}
