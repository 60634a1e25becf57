use log::debug;

use super::action::Direction;
use super::food::FoodPool;
use super::policy::{IntentHandle, Policy};
use super::snapshot::{BoardView, GameRef, SnakeView, Snapshot};
use super::state::{Board, GameStatus, Position, Snake, SnakeId};

/// One live snake together with the policy that steers it
#[derive(Debug)]
pub struct Agent {
    pub(crate) snake: Snake,
    pub(crate) policy: Box<dyn Policy>,
}

impl Agent {
    pub fn snake(&self) -> &Snake {
        &self.snake
    }
}

/// All mutable state of one game.
///
/// The session owns the live agents (in registration order, primary first),
/// the food pool, the turn counter and the terminal status. Everything else
/// only sees read accessors and snapshot copies; mutation happens in the
/// turn engine.
#[derive(Debug)]
pub struct GameSession {
    id: String,
    board: Board,
    agents: Vec<Agent>,
    food: FoodPool,
    turn: u32,
    status: GameStatus,
    primary: SnakeId,
    intents: IntentHandle,
}

impl GameSession {
    pub(crate) fn from_parts(
        id: String,
        board: Board,
        agents: Vec<Agent>,
        food: FoodPool,
        primary: SnakeId,
        intents: IntentHandle,
    ) -> Self {
        Self {
            id,
            board,
            agents,
            food,
            turn: 0,
            status: GameStatus::Running,
            primary,
            intents,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Id of the player-controlled snake whose elimination ends the session
    pub fn primary(&self) -> SnakeId {
        self.primary
    }

    pub fn food(&self) -> &FoodPool {
        &self.food
    }

    /// Live snakes in registration order
    pub fn snakes(&self) -> impl Iterator<Item = &Snake> {
        self.agents.iter().map(|a| &a.snake)
    }

    pub fn snake(&self, id: SnakeId) -> Option<&Snake> {
        self.agents.iter().map(|a| &a.snake).find(|s| s.id == id)
    }

    pub fn live_count(&self) -> usize {
        self.agents.len()
    }

    /// Queue a decoded directional intent for the player snake
    pub fn push_intent(&self, direction: Direction) {
        self.intents.push(direction);
    }

    /// Build the read-only view handed to policies and observers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            game: GameRef {
                id: self.id.clone(),
            },
            turn: self.turn,
            board: BoardView {
                width: self.board.width,
                height: self.board.height,
                food: self.food.cells().to_vec(),
                snakes: self
                    .agents
                    .iter()
                    .map(|a| SnakeView {
                        id: a.snake.id,
                        name: a.snake.name.clone(),
                        health: a.snake.health,
                        body: a.snake.body.iter().copied().collect(),
                    })
                    .collect(),
            },
        }
    }

    pub(crate) fn snake_ids(&self) -> Vec<SnakeId> {
        self.agents.iter().map(|a| a.snake.id).collect()
    }

    pub(crate) fn agent_mut(&mut self, id: SnakeId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.snake.id == id)
    }

    pub(crate) fn snake_mut(&mut self, id: SnakeId) -> Option<&mut Snake> {
        self.agent_mut(id).map(|a| &mut a.snake)
    }

    pub(crate) fn food_mut(&mut self) -> &mut FoodPool {
        &mut self.food
    }

    /// Whether any live snake's body covers the given cell
    pub(crate) fn occupied(&self, pos: Position) -> bool {
        self.agents.iter().any(|a| a.snake.contains_point(pos))
    }

    /// Cells covered by neither a snake body nor food, in row-major order
    pub(crate) fn vacant_cells(&self) -> Vec<Position> {
        let mut vacant = Vec::new();
        for y in 0..self.board.height as i32 {
            for x in 0..self.board.width as i32 {
                let pos = Position::new(x, y);
                if !self.occupied(pos) && !self.food.contains(pos) {
                    vacant.push(pos);
                }
            }
        }
        vacant
    }

    pub(crate) fn remove_agent(&mut self, id: SnakeId) {
        debug!("removing {} from the live set", id);
        self.agents.retain(|a| a.snake.id != id);
    }

    pub(crate) fn end(&mut self, reason: &str) {
        self.status = GameStatus::Ended {
            reason: reason.to_string(),
        };
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::policy::PlayerPolicy;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn session_with_one_snake() -> GameSession {
        let player = PlayerPolicy::new();
        let intents = player.handle();
        let snake = Snake::new(SnakeId(0), "user1", Position::new(1, 1), 100);
        let agents = vec![Agent {
            snake,
            policy: Box::new(player),
        }];
        GameSession::from_parts(
            "g1".into(),
            Board::new(3, 3),
            agents,
            FoodPool::new(1),
            SnakeId(0),
            intents,
        )
    }

    #[test]
    fn test_snapshot_reflects_session_state() {
        let session = session_with_one_snake();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.game.id, "g1");
        assert_eq!(snapshot.turn, 0);
        assert_eq!(snapshot.board.width, 3);
        assert_eq!(snapshot.board.snakes.len(), 1);
        assert_eq!(snapshot.board.snakes[0].name, "user1");
        assert_eq!(snapshot.board.snakes[0].body, vec![Position::new(1, 1)]);
    }

    #[test]
    fn test_vacant_cells_exclude_bodies_and_food() {
        let mut session = session_with_one_snake();
        session
            .food_mut()
            .replenish(vec![Position::new(0, 0)], &mut SmallRng::seed_from_u64(1));

        let vacant = session.vacant_cells();
        assert_eq!(vacant.len(), 9 - 1 - 1);
        assert!(!vacant.contains(&Position::new(1, 1)));
        assert!(!vacant.contains(&Position::new(0, 0)));
    }

    #[test]
    fn test_removal_frees_cells() {
        let mut session = session_with_one_snake();
        assert!(session.occupied(Position::new(1, 1)));

        session.remove_agent(SnakeId(0));
        assert_eq!(session.live_count(), 0);
        assert!(!session.occupied(Position::new(1, 1)));
    }

    #[test]
    fn test_intents_reach_the_player_policy() {
        let mut session = session_with_one_snake();
        session.push_intent(Direction::Up);

        let snapshot = session.snapshot();
        let you = snapshot.snake(SnakeId(0)).unwrap().clone();
        let agent = session.agent_mut(SnakeId(0)).unwrap();
        assert_eq!(agent.policy.decide(&snapshot, &you), Some(Direction::Up));
    }
}
