use serde::{Deserialize, Serialize};

use super::GameError;

/// Health assigned to every snake when the configured value is left at zero
pub const DEFAULT_HEALTH: i32 = 100;

/// Configuration for a game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in cells
    pub width: u32,
    /// Height of the board in cells
    pub height: u32,
    /// Total number of snakes, the player-controlled one included
    pub snake_count: u32,
    /// Target number of food items kept on the board
    pub food_count: u32,
    /// Health restored by eating one food item
    pub food_score: i32,
    /// Health spent on every move
    pub move_cost: i32,
    /// Health each snake starts with; 0 falls back to [`DEFAULT_HEALTH`]
    #[serde(default)]
    pub starting_health: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            snake_count: 5,
            food_count: 3,
            food_score: 100,
            move_cost: 1,
            starting_health: DEFAULT_HEALTH,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// The starting health actually applied to new snakes
    pub fn starting_health(&self) -> i32 {
        if self.starting_health <= 0 {
            DEFAULT_HEALTH
        } else {
            self.starting_health
        }
    }

    /// Reject configurations no session can be built from
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::Config(
                "board dimensions must be positive".into(),
            ));
        }
        if self.snake_count == 0 {
            return Err(GameError::Config(
                "at least one snake is required".into(),
            ));
        }
        let cells = self.width as u64 * self.height as u64;
        if u64::from(self.snake_count) > cells {
            return Err(GameError::Config(format!(
                "{} snakes cannot spawn on {} cells",
                self.snake_count, cells
            )));
        }
        if self.move_cost < 0 {
            return Err(GameError::Config("move cost must not be negative".into()));
        }
        if self.food_score < 0 {
            return Err(GameError::Config("food score must not be negative".into()));
        }
        Ok(())
    }
}
