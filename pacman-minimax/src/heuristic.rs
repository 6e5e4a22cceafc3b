//! The reference evaluator used at the cutoff frontier.
//!
//! Many heuristics would do. This one is a weighted sum of a few terms, and the weights are
//! configuration rather than code so different tunings don't need different evaluators.

use decorum::N64;
use serde::{Deserialize, Serialize};

use crate::{
    paranoid::Evaluator,
    types::{
        AgentCountableGame, GoalGettableGame, PositionGettableGame, ScoreGettableGame,
        VictorDeterminableGame,
    },
};

/// Weights for [WeightedEvaluator]
///
/// ```
/// use pacman_minimax::heuristic::EvaluationWeights;
///
/// let weights: EvaluationWeights = Default::default();
///
/// assert_eq!(weights.progress, 10.0);
/// assert_eq!(weights.danger_distance, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationWeights {
    /// Reward per goal consumed since the start of the game
    pub progress: f64,
    /// Penalty per step to the nearest remaining goal
    pub proximity: f64,
    /// Adversaries at this distance or closer are about to capture us
    pub danger_distance: u32,
    /// Flat penalty for every adversary inside the danger distance
    pub danger_penalty: f64,
    /// Numerator of the `1 / distance` penalty for adversaries outside the danger distance
    pub adversary_decay: f64,
    /// Weight of the environment's own running score
    pub score_weight: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            progress: 10.0,
            proximity: 1.0,
            danger_distance: 1,
            danger_penalty: 200.0,
            adversary_decay: 1.0,
            score_weight: 1.0,
        }
    }
}

/// Weighted sum of progress, proximity to food, adversary danger and the running score
///
/// Terminal states get the extreme values, so a win is never beaten by a heuristic value and a
/// loss never beats one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEvaluator {
    weights: EvaluationWeights,
    initial_goal_count: usize,
}

impl WeightedEvaluator {
    /// `initial_goal_count` is the number of goals when the game started. Progress is measured
    /// against it
    pub fn new(weights: EvaluationWeights, initial_goal_count: usize) -> Self {
        Self {
            weights,
            initial_goal_count,
        }
    }

    #[allow(missing_docs)]
    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }
}

/// Distance from the maximizing agent to the closest goal. Zero when no goals are left
pub fn nearest_goal_distance<GameType>(game: &GameType) -> u32
where
    GameType: PositionGettableGame + GoalGettableGame,
{
    let me = game.agent_position(0);

    game.goal_positions()
        .iter()
        .map(|goal| me.manhattan_distance(goal))
        .min()
        .unwrap_or(0)
}

/// Distance from the maximizing agent to each adversary, in agent order
pub fn adversary_distances<GameType>(game: &GameType) -> Vec<u32>
where
    GameType: PositionGettableGame + AgentCountableGame,
{
    let me = game.agent_position(0);

    (1..game.num_agents())
        .map(|agent| me.manhattan_distance(&game.agent_position(agent)))
        .collect()
}

impl<GameType> Evaluator<GameType> for WeightedEvaluator
where
    GameType: VictorDeterminableGame
        + ScoreGettableGame
        + PositionGettableGame
        + GoalGettableGame
        + AgentCountableGame,
{
    fn evaluate(&self, game: &GameType) -> N64 {
        if game.is_win() {
            return N64::from(f64::MAX);
        }
        if game.is_lose() {
            return N64::from(-f64::MAX);
        }

        let w = &self.weights;

        let consumed = self.initial_goal_count.saturating_sub(game.goal_count());
        let progress = w.progress * consumed as f64;

        let proximity = -w.proximity * nearest_goal_distance(game) as f64;

        let safety: f64 = adversary_distances(game)
            .into_iter()
            .map(|distance| {
                if distance <= w.danger_distance {
                    -w.danger_penalty
                } else {
                    -w.adversary_decay / distance as f64
                }
            })
            .sum();

        let score = w.score_weight * game.get_score() as f64;

        N64::from(progress + proximity + safety + score)
    }
}
