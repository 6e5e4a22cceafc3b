#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements the minimax algorithm for Pacman like grid games: one maximizing agent
//! collecting goals while one or more adversaries try to catch it. You provide a game that
//! implements the traits in [types], and the crate picks the next move.
//!
//! The pieces, from the outside in:
//!
//! - [agent::choose_action] is the entry point. It runs the [win_shortcut], asks a
//!   [depth::DepthPolicy] how deep to go and runs the search
//! - [paranoid::MinimaxAgent] is the depth limited minimax with alpha-beta pruning, move
//!   ordering and a transposition cache
//! - [heuristic::WeightedEvaluator] scores the states at the cutoff depth
//!
//! ```rust
//! use maze::Maze;
//! use pacman_minimax::{agent::{choose_action, AgentConfig}, types::Direction};
//!
//! let game = Maze::from_layout(
//!     "\
//! %%%%%%%%
//! %. P  G%
//! %%%%%%%%",
//! )
//! .unwrap();
//!
//! let action = choose_action(&game, &AgentConfig::default().with_depth_bound(2));
//!
//! assert_eq!(action, Direction::West);
//! ```

pub mod agent;
pub mod depth;
pub mod heuristic;
pub mod paranoid;
pub mod types;
pub mod win_shortcut;

pub use agent::{choose_action, AgentConfig, PacmanAgent};
