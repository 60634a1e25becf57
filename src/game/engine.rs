use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::action::Direction;
use super::config::GameConfig;
use super::food::FoodPool;
use super::policy::{PlayerPolicy, RandomWalker};
use super::session::{Agent, GameSession};
use super::state::{Board, Position, Snake, SnakeId};
use super::GameError;

/// Reason string carried by a session once the player snake is eliminated
pub const GAME_OVER: &str = "Game Over!";

/// What happened during one call to [`TurnEngine::advance_round`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Turn counter after the round
    pub turn: u32,
    /// Snakes that consumed food this round
    pub fed: Vec<SnakeId>,
    /// Snakes eliminated this round
    pub eliminated: Vec<SnakeId>,
    /// Whether the session is (now) over
    pub terminated: bool,
}

enum MoveOutcome {
    Survived { ate: bool },
    Eliminated,
}

/// The turn-resolution engine.
///
/// Owns the configuration and the session RNG; builds fresh sessions with
/// `reset` and advances them one round at a time. All session mutation runs
/// through here.
#[derive(Debug)]
pub struct TurnEngine {
    config: GameConfig,
    rng: SmallRng,
    next_id: u32,
}

impl TurnEngine {
    /// Create an engine seeded from the system entropy source
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Create an engine with a fixed seed, for reproducible sessions
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    /// Create an engine with a caller-supplied random source
    pub fn with_rng(config: GameConfig, rng: SmallRng) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            next_id: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn alloc_id(&mut self) -> SnakeId {
        let id = SnakeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Build a fresh session: the player snake on the center cell, the
    /// autonomous snakes on distinct vacant cells, food topped up to target.
    /// May be called again after a session ended to start over.
    pub fn reset(&mut self) -> GameSession {
        let board = Board::new(self.config.width, self.config.height);
        let health = self.config.starting_health();

        let player = PlayerPolicy::new();
        let intents = player.handle();
        let primary = self.alloc_id();
        let mut agents = vec![Agent {
            snake: Snake::new(primary, "user1", board.center(), health),
            policy: Box::new(player),
        }];

        let mut open: Vec<Position> = (0..board.height as i32)
            .flat_map(|y| (0..board.width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| *pos != board.center())
            .collect();
        open.shuffle(&mut self.rng);

        let robots = self.config.snake_count.saturating_sub(1);
        for i in 0..robots {
            let start = match open.pop() {
                Some(pos) => pos,
                None => break,
            };
            let id = self.alloc_id();
            let seed = self.rng.gen();
            agents.push(Agent {
                snake: Snake::new(id, format!("robot{}", i + 1), start, health),
                policy: Box::new(RandomWalker::with_seed(seed)),
            });
        }

        let mut session = GameSession::from_parts(
            format!("{:016x}", self.rng.gen::<u64>()),
            board,
            agents,
            FoodPool::new(self.config.food_count as usize),
            primary,
            intents,
        );
        let vacant = session.vacant_cells();
        session.food_mut().replenish(vacant, &mut self.rng);

        info!(
            "session {} started: {} snakes on a {}x{} board",
            session.id(),
            session.live_count(),
            board.width,
            board.height
        );
        session
    }

    /// Resolve one round: every live snake, in registration order, gets one
    /// move attempt. Returns what happened; on an already-ended session this
    /// is a no-op.
    pub fn advance_round(&mut self, session: &mut GameSession) -> Result<RoundReport, GameError> {
        if session.status().is_ended() {
            return Ok(RoundReport {
                turn: session.turn(),
                fed: Vec::new(),
                eliminated: Vec::new(),
                terminated: true,
            });
        }

        let mut fed = Vec::new();
        let mut eliminated = Vec::new();

        for id in session.snake_ids() {
            // once the player snake is gone nobody else moves
            if session.status().is_ended() {
                break;
            }

            // the snapshot shows earlier movers post-move, later movers pre-move
            let snapshot = session.snapshot();
            let you = match snapshot.snake(id) {
                Some(view) => view.clone(),
                None => continue,
            };
            let decision = match session.agent_mut(id) {
                Some(agent) => agent.policy.decide(&snapshot, &you),
                None => continue,
            };
            let direction = match decision {
                Some(direction) => direction,
                None => {
                    // a pass costs nothing
                    debug!("{} holds still", id);
                    continue;
                }
            };

            match self.resolve_move(session, id, direction)? {
                MoveOutcome::Survived { ate } => {
                    if ate {
                        fed.push(id);
                    }
                }
                MoveOutcome::Eliminated => {
                    eliminated.push(id);
                    self.eliminate(session, id);
                }
            }
        }

        let terminated = session.status().is_ended();
        if !terminated {
            session.advance_turn();
        }
        Ok(RoundReport {
            turn: session.turn(),
            fed,
            eliminated,
            terminated,
        })
    }

    fn resolve_move(
        &mut self,
        session: &mut GameSession,
        id: SnakeId,
        direction: Direction,
    ) -> Result<MoveOutcome, GameError> {
        let board = session.board();
        let (old_head, len, health) = {
            let snake = session.snake_mut(id).expect("moving snake is live");
            snake.health -= self.config.move_cost;
            (snake.head(), snake.len(), snake.health)
        };
        let next = old_head.moved_in_direction(direction);
        debug!("{} moves {:?} to ({}, {})", id, direction, next.x, next.y);

        // wall, board saturation, starvation
        if !board.in_bounds(next) || len >= board.total_cells() || health <= 0 {
            return Ok(MoveOutcome::Eliminated);
        }
        // any live body cell, the snake's own included: its tail has not
        // vacated yet, earlier movers this round are already in place
        if session.occupied(next) {
            return Ok(MoveOutcome::Eliminated);
        }

        // food is consumed at the cell the head already stands on
        let ate = session.food_mut().take(old_head);
        {
            let snake = session.snake_mut(id).expect("moving snake is live");
            snake.grow(next);
            if ate {
                snake.health += self.config.food_score;
            } else {
                snake.shrink_tail()?;
            }
        }

        let vacant = session.vacant_cells();
        session.food_mut().replenish(vacant, &mut self.rng);
        Ok(MoveOutcome::Survived { ate })
    }

    fn eliminate(&mut self, session: &mut GameSession, id: SnakeId) {
        if id == session.primary() {
            info!("{} eliminated, session {} is over", id, session.id());
            session.end(GAME_OVER);
        } else {
            info!("{} eliminated", id);
            session.remove_agent(id);
        }
    }
}
