//! The query surface the search needs from a game.
//!
//! The game itself (rules, simulation, rendering) lives outside this crate. A game type opts
//! into the search by implementing the small traits in this module; anything that implements
//! all of them is a [StateAdapter] through the blanket impl at the bottom.

use std::{fmt::Debug, hash::Hash};

use serde::{Deserialize, Serialize};

/// A move an agent can make on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[allow(missing_docs)]
    North,
    #[allow(missing_docs)]
    South,
    #[allow(missing_docs)]
    East,
    #[allow(missing_docs)]
    West,
    /// Stay in place. Never expanded by the search, but it is the fallback when nothing else is
    /// possible
    Stop,
}

impl Direction {
    /// All the directions, in the order games are expected to generate them
    pub const fn all() -> [Direction; 5] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Stop,
        ]
    }

    /// A stable index for this direction, matching the order of [Direction::all]
    pub fn as_index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::Stop => 4,
        }
    }

    /// Is this the no-op action
    pub fn is_stop(&self) -> bool {
        matches!(self, Direction::Stop)
    }

    /// The `(dx, dy)` offset of this direction. `y` grows downwards so North is `-1`
    pub fn to_vector(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };

        write!(f, "{s}")
    }
}

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    #[allow(missing_docs)]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The number of orthogonal steps between two cells, ignoring walls
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The cell one step away in the given direction
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.to_vector();
        Position::new(self.x + dx, self.y + dy)
    }
}

/// A game that knows how many agents take turns in it
///
/// Agent `0` is always the maximizing agent, every other index is an adversary
pub trait AgentCountableGame {
    /// Number of agents, including the maximizing agent
    fn num_agents(&self) -> usize;
}

/// A game that can produce its successor states
pub trait SimulableGame: Sized {
    /// The actions available to the given agent. Terminal states have none
    ///
    /// The search never expands `Stop`. An agent whose only action is `Stop` ends its line of
    /// play as a leaf, so the rounds below it are not searched
    fn legal_actions(&self, agent_index: usize) -> Vec<Direction>;

    /// The state after the given agent takes the given action. Never mutates `self`
    fn generate_successor(&self, agent_index: usize, action: Direction) -> Self;

    /// Every successor of the given agent paired with the action that produced it, in the same
    /// order as [SimulableGame::legal_actions]
    fn generate_successors(&self, agent_index: usize) -> Vec<(Self, Direction)> {
        self.legal_actions(agent_index)
            .into_iter()
            .map(|action| (self.generate_successor(agent_index, action), action))
            .collect()
    }
}

/// A game that can tell if it is over, from the maximizing agent's point of view
pub trait VictorDeterminableGame {
    /// The maximizing agent has won
    fn is_win(&self) -> bool;

    /// The maximizing agent has lost
    fn is_lose(&self) -> bool;

    /// Either of the above
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game with a running score kept by the environment
pub trait ScoreGettableGame {
    #[allow(missing_docs)]
    fn get_score(&self) -> i64;
}

/// A game where agents have positions on a bounded grid
pub trait PositionGettableGame {
    #[allow(missing_docs)]
    fn agent_position(&self, agent_index: usize) -> Position;

    #[allow(missing_docs)]
    fn width(&self) -> u32;

    #[allow(missing_docs)]
    fn height(&self) -> u32;
}

/// A game where the maximizing agent collects goals (food)
pub trait GoalGettableGame {
    /// Positions of every goal still on the board
    fn goal_positions(&self) -> Vec<Position>;

    #[allow(missing_docs)]
    fn goal_count(&self) -> usize {
        self.goal_positions().len()
    }
}

/// A game that can be reduced to a hashable key for the transposition cache
///
/// Two states with equal keys must evaluate identically, so the key has to cover everything an
/// evaluator reads (positions, remaining goals and the running score)
pub trait CanonicalKeyGame {
    #[allow(missing_docs)]
    type Key: Hash + Eq + Clone + Debug;

    #[allow(missing_docs)]
    fn canonical_key(&self) -> Self::Key;
}

/// Everything the search and the reference evaluator consume from a game
pub trait StateAdapter:
    AgentCountableGame
    + SimulableGame
    + VictorDeterminableGame
    + ScoreGettableGame
    + PositionGettableGame
    + GoalGettableGame
    + CanonicalKeyGame
{
}

impl<T> StateAdapter for T where
    T: AgentCountableGame
        + SimulableGame
        + VictorDeterminableGame
        + ScoreGettableGame
        + PositionGettableGame
        + GoalGettableGame
        + CanonicalKeyGame
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(
            Position::new(1, 1).manhattan_distance(&Position::new(4, 3)),
            5
        );
        assert_eq!(
            Position::new(4, 3).manhattan_distance(&Position::new(1, 1)),
            5
        );
        assert_eq!(Position::new(2, 2).manhattan_distance(&Position::new(2, 2)), 0);
    }

    #[test]
    fn test_step() {
        let p = Position::new(3, 3);

        assert_eq!(p.step(Direction::North), Position::new(3, 2));
        assert_eq!(p.step(Direction::South), Position::new(3, 4));
        assert_eq!(p.step(Direction::East), Position::new(4, 3));
        assert_eq!(p.step(Direction::West), Position::new(2, 3));
        assert_eq!(p.step(Direction::Stop), p);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, d) in Direction::all().iter().enumerate() {
            assert_eq!(d.as_index(), i);
        }
        assert!(Direction::Stop.is_stop());
        assert!(!Direction::West.is_stop());
    }
}
