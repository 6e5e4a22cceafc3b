use std::cmp::Reverse;

use decorum::N64;

use crate::types::VictorDeterminableGame;

#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Copy)]
/// The wrapped score type. This takes into account the score provided by the evaluator, but
/// wraps it with a Score based on the game state. This allows us to say that wins are better than
/// any score and loses are worse than any score.
pub enum WrappedScore {
    /// We lost, the depth is recorded because we prefer surviving longer
    Lose(i64),
    /// We order this based on the value provided by the evaluator
    Scored(N64),
    /// We won, the depth is recorded because we prefer winning sooner
    Win(Reverse<i64>),
}

const LOWEST_DEPTH: i64 = i64::MIN;

impl WrappedScore {
    /// Returns the best possible score
    ///
    /// This is a Win with the depth set as the minimum i64 such that no WrappedScore can be higher
    /// than this given the Ord. It stands in for `+infinity` as the initial beta
    pub fn best_possible_score() -> Self {
        WrappedScore::Win(Reverse(LOWEST_DEPTH))
    }

    /// Returns the worst possible score
    ///
    /// This is a Lose with the depth set as the minimum i64 such that no WrappedScore can be lower
    /// than this given the Ord. It stands in for `-infinity` as the initial alpha
    pub fn worst_possible_score() -> Self {
        WrappedScore::Lose(LOWEST_DEPTH)
    }

    /// Returns the depth from this score IFF the score is a terminal node. Otherwise returns None
    pub fn terminal_depth(&self) -> Option<i64> {
        match &self {
            Self::Win(Reverse(d)) => Some(*d),
            Self::Lose(d) => Some(*d),
            _ => None,
        }
    }

    /// The evaluator's value, if this score came from the evaluator
    pub fn scored_value(&self) -> Option<f64> {
        match self {
            Self::Scored(v) => Some(v.into_inner()),
            _ => None,
        }
    }
}

impl std::fmt::Display for WrappedScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrappedScore::Lose(d) => write!(f, "lose@{d}"),
            WrappedScore::Scored(v) => write!(f, "{:.2}", v.into_inner()),
            WrappedScore::Win(Reverse(d)) => write!(f, "win@{d}"),
        }
    }
}

/// This trait is used to control something that can return a value from a game state
///
/// It is the cutoff-frontier heuristic. Closures are evaluators too, which keeps one-off
/// evaluators in tests short
pub trait Evaluator<GameType> {
    /// Estimate how good the given state is for the maximizing agent
    fn evaluate(&self, game: &GameType) -> N64;
}

impl<GameType, FnLike: Fn(&GameType) -> N64> Evaluator<GameType> for FnLike {
    fn evaluate(&self, game: &GameType) -> N64 {
        (self)(game)
    }
}

/// Provides an implementation for `wrapped_score` if the implementer implements the `evaluate`
/// function.
///
/// `wrapped_score` takes into account if the node is an end state, and depth based ordering so
/// that the underlying evaluators don't need to worry about this
pub trait WrappedEvaluator<GameType>
where
    GameType: VictorDeterminableGame,
{
    /// This is the evaluation function for your minimax agent
    ///
    /// The score for all non end state nodes will be defined by this value
    fn evaluate(&self, node: &GameType) -> N64;

    /// Score a node without searching below it. Terminal states are wrapped, everything else is
    /// handed to the evaluator
    fn static_score(&self, node: &GameType, depth: usize) -> WrappedScore {
        let depth = depth as i64;

        if node.is_win() {
            WrappedScore::Win(Reverse(depth))
        } else if node.is_lose() {
            WrappedScore::Lose(depth)
        } else {
            WrappedScore::Scored(self.evaluate(node))
        }
    }

    /// `wrapped_score` checks the game state and decides if this is a leaf in our minimax tree.
    /// If it IS a leaf we score it based on the outcome of the game. If we've hit the maximum
    /// depth, we use the value provided by `evaluate`
    fn wrapped_score(
        &self,
        node: &GameType,
        depth: usize,
        max_depth: usize,
    ) -> Option<WrappedScore> {
        if node.is_over() || depth >= max_depth {
            return Some(self.static_score(node, depth));
        }

        None
    }
}
