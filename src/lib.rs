//! Snakepit - a turn-based multi-snake arena simulation
//!
//! This library provides the turn-resolution core of the game: board
//! geometry, snake entities, food placement, movement policies and the
//! round engine. It deliberately excludes rendering, input decoding and
//! scheduling; callers drive rounds at whatever cadence they like and read
//! the results through snapshots.

pub mod game;
