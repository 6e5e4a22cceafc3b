//! There are multiple multiplayer variations to minimax, this module is for the `paranoid`
//! variant.
//!
//! This variant assumes all the adversaries are working together to minimize your score. The
//! implementation uses Alpha-Beta pruning to be efficient
//!
//! This variant works by always scoring nodes as the maximizing agent (agent `0`).
//! When propagating scores up the tree, it chooses the highest score when its your turn
//! and the lowest score when its an adversary's turn.
//!
//! ```rust
//! use decorum::N64;
//! use maze::Maze;
//! use pacman_minimax::paranoid::{MinimaxAgent, SearchOptions};
//! use pacman_minimax::types::{Direction, GoalGettableGame};
//!
//! let game = Maze::from_layout(
//!     "\
//! %%%%%%%
//! %P  . %
//! %%%%%%%",
//! )
//! .unwrap();
//!
//! // This is the evaluator that scores the states at the cutoff depth.
//! // Here it only counts the food that is left, a real evaluator would do a lot more
//! let evaluator = |state: &Maze| N64::from(-(state.goal_count() as f64));
//!
//! let agent = MinimaxAgent::new(&game, &evaluator, "doc_agent", SearchOptions::default());
//!
//! // Search three full rounds ahead
//! let outcome = agent.single_minimax(3).unwrap();
//!
//! assert_eq!(outcome.best_action(), Some(Direction::East));
//! ```

mod score;
pub use score::{Evaluator, WrappedEvaluator, WrappedScore};

mod minimax_return;
pub use minimax_return::MinMaxReturn;

mod move_ordering;
pub use move_ordering::MoveOrdering;

mod transposition;
pub use transposition::TranspositionCache;

mod turn;
pub use turn::{DepthIncrement, Turn};

mod eval;
pub use eval::{
    AbortedEarly, MinimaxAgent, SearchBudget, SearchOptions, SearchOutcome, SearchStats,
};
