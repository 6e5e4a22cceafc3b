use std::time::{Duration, Instant};

use decorum::N64;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{CanonicalKeyGame, Direction, StateAdapter};

use super::{
    move_ordering::{Candidate, MoveOrdering},
    score::{Evaluator, WrappedEvaluator},
    transposition::TranspositionCache,
    turn::{DepthIncrement, Turn},
    MinMaxReturn, WrappedScore,
};

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = "GameType: std::fmt::Debug"))]
/// This is the struct that wraps a game state and an evaluator and can be used to run
/// minimax
///
/// The maximizing agent is always agent `0`. Every other agent is assumed to be working
/// together to minimize its score.
///
/// `Stop` is never searched. When the agent to move has nothing else, for example a ghost that
/// is walled in, that node is evaluated as a leaf and the line ends before the depth bound.
pub struct MinimaxAgent<'a, GameType, EvaluatorType> {
    #[allow(missing_docs)]
    pub game: &'a GameType,
    #[derivative(Debug = "ignore")]
    evaluator: &'a EvaluatorType,
    #[allow(missing_docs)]
    pub name: &'static str,
    options: SearchOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Optional properties that can be defined for a [MinimaxAgent]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use pacman_minimax::paranoid::{DepthIncrement, MoveOrdering, SearchOptions};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.move_ordering, MoveOrdering::BestFirst);
/// assert_eq!(defaults.depth_increment, DepthIncrement::PerRound);
/// assert!(defaults.alpha_beta);
/// assert!(defaults.transposition_cache);
/// assert!(!defaults.budget.is_limited());
/// ```
pub struct SearchOptions {
    /// How should moves be ordered in the tree search
    pub move_ordering: MoveOrdering,
    /// Prune with alpha-beta. Turning this off gives a plain exhaustive minimax, which is only
    /// useful to check the pruned search against
    pub alpha_beta: bool,
    /// Memoize exact node values for the duration of one search
    pub transposition_cache: bool,
    /// When does the depth counter advance
    pub depth_increment: DepthIncrement,
    /// Limits on how much work one decision may do
    pub budget: SearchBudget,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            move_ordering: MoveOrdering::BestFirst,
            alpha_beta: true,
            transposition_cache: true,
            depth_increment: DepthIncrement::PerRound,
            budget: SearchBudget::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Cooperative limits for one decision. Unlimited by default
///
/// When a limit is set the search deepens one ply at a time and the deepest completed
/// iteration wins when the budget runs out
pub struct SearchBudget {
    /// Maximum number of nodes visited across every iteration
    pub max_nodes: Option<u64>,
    /// Wall clock limit in milliseconds
    pub time_limit_ms: Option<u64>,
}

impl SearchBudget {
    /// Is any limit set
    pub fn is_limited(&self) -> bool {
        self.max_nodes.is_some() || self.time_limit_ms.is_some()
    }
}

#[derive(Debug, Copy, Clone)]
/// This type is used to represent that the search ran out of budget so we returned
/// out of the current context
pub struct AbortedEarly;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counters collected during a search
pub struct SearchStats {
    /// Every call into the recursion, including leaves and cache hits
    pub nodes_visited: u64,
    /// Nodes whose successors were generated
    pub nodes_expanded: u64,
    /// Leaves scored by the evaluator
    pub evaluations: u64,
    /// Nodes that stopped early because of alpha-beta
    pub cutoffs: u64,
    #[allow(missing_docs)]
    pub cache_hits: u64,
    #[allow(missing_docs)]
    pub cache_stores: u64,
}

#[derive(Debug, Clone)]
/// The result of a completed search
pub struct SearchOutcome {
    /// The depth bound this result was searched to
    pub depth: usize,
    #[allow(missing_docs)]
    pub result: MinMaxReturn,
    #[allow(missing_docs)]
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// The action chosen for the maximizing agent. None when the root was a leaf
    pub fn best_action(&self) -> Option<Direction> {
        self.result.best_action()
    }

    #[allow(missing_docs)]
    pub fn score(&self) -> WrappedScore {
        *self.result.score()
    }
}

#[derive(Debug, Clone, Copy)]
struct BudgetTracker {
    deadline: Option<Instant>,
    node_limit: Option<u64>,
    nodes_visited: u64,
}

impl BudgetTracker {
    fn start(budget: &SearchBudget) -> Self {
        Self {
            deadline: budget
                .time_limit_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            node_limit: budget.max_nodes,
            nodes_visited: 0,
        }
    }

    fn tick(&mut self) -> Result<(), AbortedEarly> {
        self.nodes_visited += 1;

        if let Some(limit) = self.node_limit {
            if self.nodes_visited > limit {
                return Err(AbortedEarly);
            }
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(AbortedEarly);
            }
        }

        Ok(())
    }
}

// Everything that changes while one iteration of the search runs
struct SearchContext<Key>
where
    Key: std::hash::Hash + Eq,
{
    max_depth: usize,
    num_agents: usize,
    cache: Option<TranspositionCache<Key>>,
    stats: SearchStats,
    budget: BudgetTracker,
}

impl<'a, GameType, EvaluatorType> WrappedEvaluator<GameType>
    for MinimaxAgent<'a, GameType, EvaluatorType>
where
    GameType: StateAdapter,
    EvaluatorType: Evaluator<GameType>,
{
    fn evaluate(&self, node: &GameType) -> N64 {
        self.evaluator.evaluate(node)
    }
}

impl<'a, GameType, EvaluatorType> MinimaxAgent<'a, GameType, EvaluatorType>
where
    GameType: StateAdapter,
    EvaluatorType: Evaluator<GameType>,
{
    /// Construct a new `MinimaxAgent`
    pub fn new(
        game: &'a GameType,
        evaluator: &'a EvaluatorType,
        name: &'static str,
        options: SearchOptions,
    ) -> Self {
        Self {
            game,
            evaluator,
            name,
            options,
        }
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    fn minimax(
        &self,
        ctx: &mut SearchContext<GameType::Key>,
        node: &GameType,
        turn: Turn,
        alpha: WrappedScore,
        beta: WrappedScore,
    ) -> Result<MinMaxReturn, AbortedEarly> {
        ctx.budget.tick()?;
        ctx.stats.nodes_visited += 1;

        if let Some(score) = self.wrapped_score(node, turn.depth, ctx.max_depth) {
            if matches!(score, WrappedScore::Scored(_)) {
                ctx.stats.evaluations += 1;
            }
            return Ok(MinMaxReturn::Leaf { score });
        }

        let remaining_depth = ctx.max_depth - turn.depth;
        let key = ctx.cache.as_ref().map(|_| node.canonical_key());
        if let (Some(cache), Some(key)) = (&ctx.cache, &key) {
            if let Some(score) = cache.lookup(key.clone(), remaining_depth, turn.agent) {
                ctx.stats.cache_hits += 1;
                return Ok(MinMaxReturn::Leaf { score });
            }
        }

        let mut candidates: Vec<Candidate<GameType>> = node
            .generate_successors(turn.agent)
            .into_iter()
            .filter(|(_, action)| !action.is_stop())
            .enumerate()
            .map(|(generated_index, (game, action))| Candidate {
                game,
                action,
                generated_index,
            })
            .collect();

        // No moves is not an error, the node is scored as it stands
        if candidates.is_empty() {
            ctx.stats.evaluations += 1;
            return Ok(MinMaxReturn::Leaf {
                score: WrappedScore::Scored(self.evaluate(node)),
            });
        }
        ctx.stats.nodes_expanded += 1;

        let is_maximizing = turn.is_maximizing();
        let next_turn = turn.next(ctx.num_agents, self.options.depth_increment);

        self.options
            .move_ordering
            .order_candidates(&mut candidates, is_maximizing, |game| {
                self.static_score(game, next_turn.depth)
            });

        let mut alpha = alpha;
        let mut beta = beta;
        let (alpha_in, beta_in) = (alpha, beta);

        let mut options = Vec::with_capacity(candidates.len());
        let mut best: Option<(usize, Direction, MinMaxReturn)> = None;
        let mut alpha_beta_cutoff = false;

        for candidate in candidates {
            let child = self.minimax(ctx, &candidate.game, next_turn, alpha, beta)?;
            let value = *child.score();
            options.push((candidate.action, value));

            // Only a strict improvement replaces the incumbent. An equal value only wins if it
            // was generated earlier, which can happen once ordering has shuffled the candidates
            let replaces = match &best {
                None => true,
                Some((best_index, _, best_return)) => {
                    let best_value = *best_return.score();
                    let better = if is_maximizing {
                        value > best_value
                    } else {
                        value < best_value
                    };

                    better || (value == best_value && candidate.generated_index < *best_index)
                }
            };
            if replaces {
                best = Some((candidate.generated_index, candidate.action, child));
            }

            if !self.options.alpha_beta {
                continue;
            }

            let best_value = match &best {
                Some((_, _, r)) => *r.score(),
                None => continue,
            };

            if is_maximizing {
                if best_value > beta {
                    alpha_beta_cutoff = true;
                    break;
                }

                alpha = std::cmp::max(alpha, best_value);
            } else {
                if best_value < alpha {
                    alpha_beta_cutoff = true;
                    break;
                }

                beta = std::cmp::min(beta, best_value);
            }
        }

        let (chosen_action, chosen_return) = match best {
            Some((_, action, r)) => (action, r),
            None => {
                ctx.stats.evaluations += 1;
                return Ok(MinMaxReturn::Leaf {
                    score: WrappedScore::Scored(self.evaluate(node)),
                });
            }
        };
        let chosen_score = *chosen_return.score();

        if alpha_beta_cutoff {
            ctx.stats.cutoffs += 1;
        }

        // Values outside the window we were called with are only bounds
        if alpha_in <= chosen_score && chosen_score <= beta_in {
            if let (Some(cache), Some(key)) = (ctx.cache.as_mut(), key) {
                cache.store(key, remaining_depth, turn.agent, chosen_score);
                ctx.stats.cache_stores += 1;
            }
        }

        Ok(MinMaxReturn::Node {
            is_maximizing,
            moving_agent: turn.agent,
            options,
            chosen: (chosen_action, Box::new(chosen_return)),
            score: chosen_score,
            alpha_beta_cutoff,
        })
    }

    fn run_iteration(
        &self,
        depth_bound: usize,
        budget: BudgetTracker,
    ) -> (Result<SearchOutcome, AbortedEarly>, BudgetTracker) {
        let mut ctx = SearchContext {
            max_depth: depth_bound,
            num_agents: self.game.num_agents().max(1),
            cache: self
                .options
                .transposition_cache
                .then(TranspositionCache::<<GameType as CanonicalKeyGame>::Key>::new),
            stats: SearchStats::default(),
            budget,
        };

        let result = self.minimax(
            &mut ctx,
            self.game,
            Turn::ROOT,
            WrappedScore::worst_possible_score(),
            WrappedScore::best_possible_score(),
        );

        let outcome = result.map(|result| SearchOutcome {
            depth: depth_bound,
            result,
            stats: ctx.stats,
        });

        (outcome, ctx.budget)
    }

    /// This runs the minimax algorithm to the given depth bound, returning a struct that
    /// contains the principal variation, the score and the stats of the search.
    ///
    /// A depth bound of 0 scores the root without expanding it. The configured budget applies,
    /// so this returns [AbortedEarly] if it runs out.
    ///
    /// This can/is also be used as a benchmark entry point
    pub fn single_minimax(&self, depth_bound: usize) -> Result<SearchOutcome, AbortedEarly> {
        let (outcome, _) =
            self.run_iteration(depth_bound, BudgetTracker::start(&self.options.budget));

        if let Ok(outcome) = &outcome {
            debug!(
                agent_name = self.name,
                depth = depth_bound,
                score = %outcome.score(),
                stats = ?outcome.stats,
                "finished minimax"
            );
        }

        outcome
    }

    /// This will do an iterative deepening minimax up to the given depth bound. Iterative
    /// deepening means it will first search with a depth bound of 1, then 2, and so on.
    ///
    /// The budget is shared by every iteration. When it runs out the deepest completed iteration
    /// is returned, or None if not even the first one finished. We also stop early once a
    /// win or loss is proven inside the current horizon, since searching deeper can't change it.
    pub fn deepened_minimax(&self, depth_bound: usize) -> Option<SearchOutcome> {
        let mut budget = BudgetTracker::start(&self.options.budget);
        let mut current = None;

        for depth in depth_bound.min(1)..=depth_bound {
            let (outcome, spent) = self.run_iteration(depth, budget);
            budget = spent;

            let outcome = match outcome {
                Ok(x) => x,
                Err(AbortedEarly) => {
                    debug!(
                        agent_name = self.name,
                        depth,
                        nodes_visited = budget.nodes_visited,
                        "budget ran out, keeping the previous depth"
                    );
                    break;
                }
            };

            let proven = outcome
                .score()
                .terminal_depth()
                .map(|terminal_depth| depth as i64 >= terminal_depth)
                .unwrap_or(false);

            current = Some(outcome);

            if proven {
                debug!(agent_name = self.name, depth, "outcome is decided, no need to keep going");
                break;
            }
        }

        current
    }

    /// Run the search the options ask for. A single pass to the depth bound when there is no
    /// budget, otherwise [MinimaxAgent::deepened_minimax]
    pub fn search(&self, depth_bound: usize) -> Option<SearchOutcome> {
        if self.options.budget.is_limited() {
            self.deepened_minimax(depth_bound)
        } else {
            self.single_minimax(depth_bound).ok()
        }
    }
}
