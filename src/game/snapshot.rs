use serde::Serialize;

use super::state::{Position, SnakeId};

/// Read-only view of a session, handed to policies and observers.
///
/// Field names follow the original wire shape: `game.id`, `turn`, and a
/// `board` with `width`, `height`, `food` and `snakes`. Policies receive a
/// separate `you` view alongside the snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub game: GameRef,
    pub turn: u32,
    pub board: BoardView,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub width: u32,
    pub height: u32,
    pub food: Vec<Position>,
    pub snakes: Vec<SnakeView>,
}

/// Public info of one snake, body oldest-first with the head last
#[derive(Debug, Clone, Serialize)]
pub struct SnakeView {
    pub id: SnakeId,
    pub name: String,
    pub health: i32,
    pub body: Vec<Position>,
}

impl Snapshot {
    /// Look up one snake's view by id
    pub fn snake(&self, id: SnakeId) -> Option<&SnakeView> {
        self.board.snakes.iter().find(|s| s.id == id)
    }
}

impl SnakeView {
    /// The snake's head, the newest body segment
    pub fn head(&self) -> Option<Position> {
        self.body.last().copied()
    }
}
