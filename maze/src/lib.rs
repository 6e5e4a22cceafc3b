//! A small text-layout Pacman game
//!
//! It implements every trait in [pacman_minimax::types], so it can be searched directly. Layouts
//! use one character per cell:
//!
//! - `%` wall
//! - `.` food
//! - `P` pacman, exactly one
//! - `G` ghost, any number, indexed in reading order after pacman
//! - ` ` empty
//!
//! ```
//! use maze::Maze;
//! use pacman_minimax::types::{Direction, SimulableGame, ScoreGettableGame, VictorDeterminableGame};
//!
//! let game = Maze::from_layout(
//!     "\
//! %%%%
//! %P.%
//! %%%%",
//! )
//! .unwrap();
//!
//! let next = game.generate_successor(0, Direction::East);
//!
//! assert!(next.is_win());
//! assert_eq!(next.get_score(), 509);
//! ```
#![warn(missing_docs, missing_debug_implementations)]

use std::{collections::BTreeSet, fmt, sync::Arc};

use itertools::Itertools;
use pacman_minimax::types::{
    AgentCountableGame, CanonicalKeyGame, Direction, GoalGettableGame, Position,
    PositionGettableGame, ScoreGettableGame, SimulableGame, VictorDeterminableGame,
};
use thiserror::Error;

const PACMAN: usize = 0;

/// Every pacman action, including `Stop`, costs this much
pub const MOVE_COST: i64 = 1;
/// Points for eating one food
pub const FOOD_REWARD: i64 = 10;
/// Bonus for eating the last food
pub const WIN_REWARD: i64 = 500;
/// Penalty for sharing a cell with a ghost
pub const CAPTURE_PENALTY: i64 = 500;

#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
/// The ways a layout can fail to parse
pub enum LayoutError {
    #[error("Layout has no rows")]
    Empty,
    #[error("Row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown character {character:?} at ({x}, {y})")]
    UnknownCharacter { character: char, x: usize, y: usize },
    #[error("Layout has no pacman")]
    MissingPacman,
    #[error("Layout has a second pacman at ({x}, {y})")]
    DuplicatePacman { x: usize, y: usize },
}

/// How the game stands for pacman
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    #[allow(missing_docs)]
    Running,
    /// Every food was eaten
    Won,
    /// A ghost caught pacman
    Lost,
}

/// The hashable part of a [Maze]. The walls never change so they are left out
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MazeKey {
    agents: Vec<Position>,
    food: BTreeSet<Position>,
    score: i64,
}

/// One state of the game
///
/// Successors share the wall grid, everything else is copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: u32,
    height: u32,
    walls: Arc<Vec<bool>>,
    food: BTreeSet<Position>,
    agents: Vec<Position>,
    score: i64,
    outcome: Outcome,
}

impl Maze {
    /// Parse a layout
    ///
    /// Spaces are empty cells wherever they sit in a row, so rows are taken verbatim. Only
    /// completely empty lines are skipped. Cells outside the layout count as walls
    pub fn from_layout(layout: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(|row| row.trim_end_matches('\r'))
            .filter(|row| !row.is_empty())
            .collect();

        let expected = rows.first().ok_or(LayoutError::Empty)?.chars().count();

        let mut walls = Vec::with_capacity(expected * rows.len());
        let mut food = BTreeSet::new();
        let mut pacman = None;
        let mut ghosts = vec![];

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(LayoutError::RaggedRow {
                    row: y,
                    expected,
                    found,
                });
            }

            for (x, character) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                walls.push(character == '%');

                match character {
                    '%' | ' ' => {}
                    '.' => {
                        food.insert(position);
                    }
                    'P' => {
                        if pacman.is_some() {
                            return Err(LayoutError::DuplicatePacman { x, y });
                        }
                        pacman = Some(position);
                    }
                    'G' => ghosts.push(position),
                    character => {
                        return Err(LayoutError::UnknownCharacter { character, x, y });
                    }
                }
            }
        }

        let pacman = pacman.ok_or(LayoutError::MissingPacman)?;
        let agents: Vec<Position> = std::iter::once(pacman).chain(ghosts).collect();

        let outcome = if food.is_empty() {
            Outcome::Won
        } else {
            Outcome::Running
        };

        Ok(Self {
            width: expected as u32,
            height: rows.len() as u32,
            walls: Arc::new(walls),
            food,
            agents,
            score: 0,
            outcome,
        })
    }

    #[allow(missing_docs)]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[allow(missing_docs)]
    pub fn is_wall(&self, position: Position) -> bool {
        if position.x < 0
            || position.y < 0
            || position.x >= self.width as i32
            || position.y >= self.height as i32
        {
            return true;
        }

        self.walls[(position.y as u32 * self.width + position.x as u32) as usize]
    }

    #[allow(missing_docs)]
    pub fn has_food(&self, position: Position) -> bool {
        self.food.contains(&position)
    }

    /// One full round: pacman takes the given action, then every ghost takes its first legal
    /// action. Stops early if the game ends
    pub fn play_round(&self, pacman_action: Direction) -> Self {
        let mut next = self.generate_successor(PACMAN, pacman_action);

        for ghost in 1..self.agents.len() {
            if next.is_over() {
                break;
            }

            if let Some(action) = next.legal_actions(ghost).first() {
                next = next.generate_successor(ghost, *action);
            }
        }

        next
    }

    fn open_moves(&self, agent_index: usize) -> Vec<Direction> {
        let position = self.agents[agent_index];

        Direction::all()
            .into_iter()
            .filter(|d| !d.is_stop())
            .filter(|d| !self.is_wall(position.step(*d)))
            .collect()
    }

    fn pacman_is_caught(&self) -> bool {
        let pacman = self.agents[PACMAN];

        self.agents[1..].iter().any(|ghost| *ghost == pacman)
    }
}

impl AgentCountableGame for Maze {
    fn num_agents(&self) -> usize {
        self.agents.len()
    }
}

impl SimulableGame for Maze {
    /// Pacman may move to any open neighbour or stop. Ghosts have to move and can only stop
    /// when they are boxed in
    fn legal_actions(&self, agent_index: usize) -> Vec<Direction> {
        if self.is_over() || agent_index >= self.agents.len() {
            return vec![];
        }

        let mut actions = self.open_moves(agent_index);

        if agent_index == PACMAN || actions.is_empty() {
            actions.push(Direction::Stop);
        }

        actions
    }

    /// Moves into a wall leave the agent where it is
    fn generate_successor(&self, agent_index: usize, action: Direction) -> Self {
        let mut next = self.clone();

        if self.is_over() || agent_index >= self.agents.len() {
            return next;
        }

        let target = self.agents[agent_index].step(action);
        if !self.is_wall(target) {
            next.agents[agent_index] = target;
        }

        if agent_index == PACMAN {
            next.score -= MOVE_COST;
        }

        if next.pacman_is_caught() {
            next.score -= CAPTURE_PENALTY;
            next.outcome = Outcome::Lost;
            return next;
        }

        if agent_index == PACMAN && next.food.remove(&next.agents[PACMAN]) {
            next.score += FOOD_REWARD;

            if next.food.is_empty() {
                next.score += WIN_REWARD;
                next.outcome = Outcome::Won;
            }
        }

        next
    }
}

impl VictorDeterminableGame for Maze {
    fn is_win(&self) -> bool {
        self.outcome == Outcome::Won
    }

    fn is_lose(&self) -> bool {
        self.outcome == Outcome::Lost
    }
}

impl ScoreGettableGame for Maze {
    fn get_score(&self) -> i64 {
        self.score
    }
}

impl PositionGettableGame for Maze {
    fn agent_position(&self, agent_index: usize) -> Position {
        self.agents[agent_index]
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl GoalGettableGame for Maze {
    fn goal_positions(&self) -> Vec<Position> {
        self.food.iter().copied().collect()
    }

    fn goal_count(&self) -> usize {
        self.food.len()
    }
}

impl CanonicalKeyGame for Maze {
    type Key = MazeKey;

    fn canonical_key(&self) -> Self::Key {
        MazeKey {
            agents: self.agents.clone(),
            food: self.food.clone(),
            score: self.score,
        }
    }
}

impl fmt::Display for Maze {
    /// Renders the layout the way [Maze::from_layout] reads it. A caught pacman is drawn as `X`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = (0..self.height as i32)
            .map(|y| {
                (0..self.width as i32)
                    .map(|x| {
                        let position = Position::new(x, y);

                        if self.agents[PACMAN] == position {
                            if self.pacman_is_caught() {
                                'X'
                            } else {
                                'P'
                            }
                        } else if self.agents[1..].contains(&position) {
                            'G'
                        } else if self.is_wall(position) {
                            '%'
                        } else if self.has_food(position) {
                            '.'
                        } else {
                            ' '
                        }
                    })
                    .collect::<String>()
            })
            .join("\n");

        write!(f, "{rendered}")
    }
}
