//! One ply lookahead for an immediate win.

use crate::types::{Direction, SimulableGame, VictorDeterminableGame};

/// The first legal action of the maximizing agent that wins on the spot, in generation order
///
/// Costs one successor per legal action, so it is always worth running before a full search
pub fn immediate_win<GameType>(game: &GameType) -> Option<Direction>
where
    GameType: SimulableGame + VictorDeterminableGame,
{
    game.legal_actions(0)
        .into_iter()
        .find(|action| game.generate_successor(0, *action).is_win())
}
