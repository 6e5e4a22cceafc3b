use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::types::Direction;

use super::WrappedScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How should successors be ordered before they are expanded
///
/// Ordering only changes how much of the tree gets pruned. The chosen action and its score are
/// the same either way. Best first usually expands fewer nodes, but that is not guaranteed
/// on every board
pub enum MoveOrdering {
    /// Expand in the order the game generated them
    AsGenerated,
    /// Expand the statically best looking successor first. Best is highest for the maximizing
    /// agent and lowest for the adversaries
    #[default]
    BestFirst,
}

/// A successor waiting to be expanded
///
/// `generated_index` remembers where it sat in the game's generation order, so ties can still be
/// broken by generation order after reordering
#[derive(Debug)]
pub(crate) struct Candidate<GameType> {
    pub(crate) game: GameType,
    pub(crate) action: Direction,
    pub(crate) generated_index: usize,
}

impl MoveOrdering {
    /// Order the successors in place. `static_score` is only called when the ordering needs it.
    /// The sort is stable so equal scores keep generation order
    pub(crate) fn order_candidates<GameType>(
        &self,
        candidates: &mut Vec<Candidate<GameType>>,
        is_maximizing: bool,
        static_score: impl Fn(&GameType) -> WrappedScore,
    ) {
        match self {
            MoveOrdering::AsGenerated => {}
            MoveOrdering::BestFirst => {
                if is_maximizing {
                    candidates.sort_by_cached_key(|c| Reverse(static_score(&c.game)));
                } else {
                    candidates.sort_by_cached_key(|c| static_score(&c.game));
                }
            }
        }
    }
}
