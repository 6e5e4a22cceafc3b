use text_trees::StringTreeNode;

use crate::types::Direction;

use super::WrappedScore;

#[derive(Debug, Clone)]
/// This is returned from an iteration of the minimax algorithm
///
/// Only the principal variation is kept as a tree. Siblings of a chosen move are remembered with
/// their score and nothing else, so the size of a return is bounded by depth times branching
/// factor
pub enum MinMaxReturn {
    /// This is a non-leaf node in the game tree
    /// We have the score of every option we looked at as well as the chosen one
    Node {
        /// Whether this node was a maximizing node or not
        is_maximizing: bool,
        /// Which agent was moving at this node
        moving_agent: usize,
        /// Every option that was explored, with its score, in the order they were explored.
        /// Options skipped by a cutoff are missing
        options: Vec<(Direction, WrappedScore)>,
        /// The chosen move and the return of the node below it
        chosen: (Direction, Box<MinMaxReturn>),
        /// The chosen score
        /// This always matches the score of [MinMaxReturn::Node::chosen]
        score: WrappedScore,
        /// Did alpha-beta stop this node before every option was explored
        alpha_beta_cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/lose), reach the maximum depth, find the
    /// node in the transposition cache, or when the moving agent has no moves
    Leaf {
        #[allow(missing_docs)]
        score: WrappedScore,
    },
}

impl MinMaxReturn {
    /// Returns the score for this node
    pub fn score(&self) -> &WrappedScore {
        match self {
            MinMaxReturn::Node { score, .. } => score,
            MinMaxReturn::Leaf { score } => score,
        }
    }

    /// Returns the action the maximizing agent should take to maximize the score
    /// If we are a leaf node, this will return None
    pub fn best_action(&self) -> Option<Direction> {
        match self {
            MinMaxReturn::Node {
                moving_agent: 0,
                chosen,
                ..
            } => Some(chosen.0),
            MinMaxReturn::Node { chosen, .. } => chosen.1.best_action(),
            MinMaxReturn::Leaf { .. } => None,
        }
    }

    /// Return the first set of explored options for the given agent along the chosen route
    pub fn first_options_for_agent(&self, agent: usize) -> Option<&Vec<(Direction, WrappedScore)>> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                moving_agent,
                options,
                chosen,
                ..
            } => {
                if *moving_agent == agent {
                    Some(options)
                } else {
                    chosen.1.first_options_for_agent(agent)
                }
            }
        }
    }

    /// Check if the maximizing agent's move is a certain loss
    ///
    /// Moves that were never explored because of a cutoff are not reported as losses
    pub fn action_is_loss(&self, action: Direction) -> bool {
        self.first_options_for_agent(0)
            .and_then(|options| options.iter().find(|(a, _)| *a == action))
            .map(|(_, score)| matches!(score, WrappedScore::Lose(_)))
            .unwrap_or(false)
    }

    /// Returns all the moves in the 'route' through the game tree that minimax took
    /// This is useful for debugging as it shows each of the moves we and our opponents made during
    /// the search
    pub fn chosen_route(&self) -> Vec<(usize, Direction)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node {
                moving_agent,
                chosen,
                ..
            } => {
                let mut tail = chosen.1.chosen_route();
                tail.insert(0, (*moving_agent, chosen.0));
                tail
            }
        }
    }

    /// This returns a visual representation of the principal variation
    /// It shows the chosen score, the moving agent and the explored moves at each level
    pub fn to_text_tree(&self) -> Option<String> {
        let tree_node = self.to_text_tree_node("".to_owned())?;
        Some(format!("{}", tree_node))
    }

    fn to_text_tree_node(&self, label: String) -> Option<StringTreeNode> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                moving_agent,
                options,
                chosen,
                score,
                ..
            } => {
                let mut node = StringTreeNode::new(format!("{} {}", label, score));
                for (m, option_score) in options {
                    let option_label = format!("{} agent {}", m, moving_agent);
                    let next_node = if *m == chosen.0 {
                        chosen.1.to_text_tree_node(option_label.clone())
                    } else {
                        None
                    };

                    node.push_node(next_node.unwrap_or_else(|| {
                        StringTreeNode::new(format!("{} {}", option_label, option_score))
                    }));
                }

                Some(node)
            }
        }
    }
}
