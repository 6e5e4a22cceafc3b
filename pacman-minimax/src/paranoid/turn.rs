use serde::{Deserialize, Serialize};

/// When does the depth counter advance
///
/// The choice changes the effective horizon of a given depth bound. With 1 maximizer and 2
/// adversaries a bound of 2 is 6 moves deep with [DepthIncrement::PerRound] but only 2 moves deep
/// with [DepthIncrement::PerAgentMove]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthIncrement {
    /// One ply is a full round where every agent has moved once
    #[default]
    PerRound,
    /// Every single agent move is a ply
    PerAgentMove,
}

/// Where in the game tree a node sits: how deep it is and whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    #[allow(missing_docs)]
    pub depth: usize,
    /// Index of the agent about to move. `0` is the maximizing agent
    pub agent: usize,
}

impl Turn {
    /// The root of every search: depth 0, the maximizing agent to move
    pub const ROOT: Turn = Turn { depth: 0, agent: 0 };

    /// Is the agent to move the maximizing agent
    pub fn is_maximizing(&self) -> bool {
        self.agent == 0
    }

    /// The turn after the current agent moves
    ///
    /// | increment    | agent < N-1          | agent == N-1        |
    /// |--------------|----------------------|---------------------|
    /// | PerRound     | (depth, agent + 1)   | (depth + 1, 0)      |
    /// | PerAgentMove | (depth + 1, agent+1) | (depth + 1, 0)      |
    pub fn next(self, num_agents: usize, increment: DepthIncrement) -> Turn {
        let wraps = self.agent + 1 >= num_agents;
        let agent = if wraps { 0 } else { self.agent + 1 };

        let depth = match increment {
            DepthIncrement::PerRound if !wraps => self.depth,
            _ => self.depth + 1,
        };

        Turn { depth, agent }
    }
}
