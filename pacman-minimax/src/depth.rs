//! How deep to search for a given environment.

use serde::{Deserialize, Serialize};

/// Computes the depth bound for one decision
///
/// A fixed horizon needs no policy, set [AgentConfig::depth_bound](crate::agent::AgentConfig)
/// instead. Implementations must be pure functions of their inputs. The bound is computed once per
/// decision and handed to the search, it is never adjusted while the search runs.
pub trait DepthPolicy {
    /// The depth bound for a `width` x `height` environment with `remaining_goals` left
    fn depth_bound(&self, width: u32, height: u32, remaining_goals: usize) -> usize;
}

/// Search deeper once few goals are left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRefinement {
    /// Refine when at most this many goals remain
    pub max_goals: usize,
    /// Extra plies to add
    pub extra_depth: usize,
}

/// Splits environments into small, medium and large bands by area and gives larger
/// environments a deeper search
///
/// ```
/// use pacman_minimax::depth::{DepthPolicy, SizeBandDepthPolicy};
///
/// let policy = SizeBandDepthPolicy::default();
///
/// assert_eq!(policy.depth_bound(7, 7, 10), 1);
/// assert_eq!(policy.depth_bound(9, 9, 10), 2);
/// assert_eq!(policy.depth_bound(20, 11, 10), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeBandDepthPolicy {
    /// Largest area that still counts as small
    pub small_area: u32,
    /// Largest area that still counts as medium
    pub medium_area: u32,
    #[allow(missing_docs)]
    pub small_depth: usize,
    #[allow(missing_docs)]
    pub medium_depth: usize,
    #[allow(missing_docs)]
    pub large_depth: usize,
    /// Optional extra depth when few goals remain
    pub goal_refinement: Option<GoalRefinement>,
}

impl Default for SizeBandDepthPolicy {
    fn default() -> Self {
        Self {
            small_area: 7 * 7,
            medium_area: 9 * 9,
            small_depth: 1,
            medium_depth: 2,
            large_depth: 4,
            goal_refinement: None,
        }
    }
}

impl DepthPolicy for SizeBandDepthPolicy {
    fn depth_bound(&self, width: u32, height: u32, remaining_goals: usize) -> usize {
        let area = width.saturating_mul(height);

        let base = if area <= self.small_area {
            self.small_depth
        } else if area <= self.medium_area {
            self.medium_depth
        } else {
            self.large_depth
        };

        let extra = match self.goal_refinement {
            Some(refinement) if remaining_goals <= refinement.max_goals => {
                refinement.extra_depth
            }
            _ => 0,
        };

        (base + extra).max(1)
    }
}
