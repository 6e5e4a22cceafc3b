//! Picks the next move: the thin layer that ties the win shortcut, the depth policy and the
//! search together.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use crate::{
    depth::{DepthPolicy, SizeBandDepthPolicy},
    heuristic::{EvaluationWeights, WeightedEvaluator},
    paranoid::{Evaluator, MinimaxAgent, SearchOptions, SearchOutcome},
    types::{Direction, StateAdapter},
    win_shortcut::immediate_win,
};

/// Everything one decision depends on
///
/// Every field has a default, so a partial JSON document is a valid config:
/// ```
/// use pacman_minimax::agent::AgentConfig;
///
/// let config: AgentConfig = serde_json::from_str(r#"{ "depth_bound": 3 }"#).unwrap();
///
/// assert_eq!(config.depth_bound, Some(3));
/// assert_eq!(config, AgentConfig::default().with_depth_bound(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Fixed depth bound. When unset the depth policy decides
    pub depth_bound: Option<usize>,
    #[allow(missing_docs)]
    pub depth_policy: SizeBandDepthPolicy,
    #[allow(missing_docs)]
    pub weights: EvaluationWeights,
    #[allow(missing_docs)]
    pub search: SearchOptions,
    /// Number of goals when the game started. When unset the current state's count is used,
    /// which makes the progress term zero at the root
    pub initial_goal_count: Option<usize>,
}

impl AgentConfig {
    /// Always search to this depth, ignoring the depth policy
    pub fn with_depth_bound(mut self, depth_bound: usize) -> Self {
        self.depth_bound = Some(depth_bound);
        self
    }

    #[allow(missing_docs)]
    pub fn with_depth_policy(mut self, depth_policy: SizeBandDepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }

    #[allow(missing_docs)]
    pub fn with_weights(mut self, weights: EvaluationWeights) -> Self {
        self.weights = weights;
        self
    }

    #[allow(missing_docs)]
    pub fn with_search_options(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    #[allow(missing_docs)]
    pub fn with_initial_goal_count(mut self, initial_goal_count: usize) -> Self {
        self.initial_goal_count = Some(initial_goal_count);
        self
    }
}

/// Where a decision came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// A legal action wins immediately
    WinShortcut,
    /// The minimax search picked it
    Search,
    /// The search had no action to offer, so the best looking immediate successor was taken
    Greedy,
    /// There was nothing to do but stop
    NoMoves,
}

/// The chosen action plus what it took to choose it
#[derive(Debug, Clone)]
pub struct Decision {
    #[allow(missing_docs)]
    pub action: Direction,
    #[allow(missing_docs)]
    pub source: DecisionSource,
    /// The depth bound the search was asked for. None when the win shortcut answered
    pub depth_bound: Option<usize>,
    /// The search result, when a search ran and completed at least one iteration
    pub outcome: Option<SearchOutcome>,
}

/// Pick the next action for the maximizing agent
///
/// Deterministic for a given state and config, unless the config sets a time budget
pub fn choose_action<GameType>(game: &GameType, config: &AgentConfig) -> Direction
where
    GameType: StateAdapter,
{
    decide(game, config, "pacman").action
}

/// Like [choose_action] but also returns how the action was chosen
pub fn decide<GameType>(game: &GameType, config: &AgentConfig, name: &'static str) -> Decision
where
    GameType: StateAdapter,
{
    info_span!(
        "choose_action",
        agent_name = name,
        depth_bound = tracing::field::Empty,
        source = tracing::field::Empty,
        chosen_action = tracing::field::Empty,
        chosen_score = tracing::field::Empty,
    )
    .in_scope(|| {
        let current_span = tracing::Span::current();

        if let Some(action) = immediate_win(game) {
            current_span.record("source", "win_shortcut");
            current_span.record("chosen_action", action.to_string().as_str());

            return Decision {
                action,
                source: DecisionSource::WinShortcut,
                depth_bound: None,
                outcome: None,
            };
        }

        let depth_bound = config.depth_bound.unwrap_or_else(|| {
            config
                .depth_policy
                .depth_bound(game.width(), game.height(), game.goal_count())
        });
        current_span.record("depth_bound", depth_bound);

        let evaluator = WeightedEvaluator::new(
            config.weights,
            config
                .initial_goal_count
                .unwrap_or_else(|| game.goal_count()),
        );
        let agent = MinimaxAgent::new(game, &evaluator, name, config.search);
        let outcome = agent.search(depth_bound);

        if let Some(outcome) = &outcome {
            current_span.record("chosen_score", outcome.score().to_string().as_str());
        }

        let (action, source) = match outcome.as_ref().and_then(|o| o.best_action()) {
            Some(action) => (action, DecisionSource::Search),
            None => match greedy_action(game, &evaluator) {
                Some(action) => (action, DecisionSource::Greedy),
                None => {
                    warn!("No moves available, stopping");
                    (Direction::Stop, DecisionSource::NoMoves)
                }
            },
        };

        current_span.record("source", format!("{:?}", source).as_str());
        current_span.record("chosen_action", action.to_string().as_str());
        info!(%action, ?source, depth_bound, "chose action");

        Decision {
            action,
            source,
            depth_bound: Some(depth_bound),
            outcome,
        }
    })
}

/// The best looking immediate move of the maximizing agent, judged by the evaluator alone
///
/// Ties go to the first action generated. `Stop` is never considered
pub fn greedy_action<GameType, EvaluatorType>(
    game: &GameType,
    evaluator: &EvaluatorType,
) -> Option<Direction>
where
    GameType: StateAdapter,
    EvaluatorType: Evaluator<GameType>,
{
    let mut best = None;

    for (successor, action) in game.generate_successors(0) {
        if action.is_stop() {
            continue;
        }

        let value = evaluator.evaluate(&successor);
        match best {
            Some((best_value, _)) if value <= best_value => {}
            _ => best = Some((value, action)),
        }
    }

    best.map(|(_, action)| action)
}

/// An agent that plays a whole game, one [PacmanAgent::get_action] call per turn
///
/// It remembers how many goals the first state it saw had, so the progress term keeps counting
/// from the start of the game
#[derive(Debug, Clone)]
pub struct PacmanAgent {
    config: AgentConfig,
    name: &'static str,
    initial_goal_count: Option<usize>,
}

impl PacmanAgent {
    #[allow(missing_docs)]
    pub fn new(config: AgentConfig, name: &'static str) -> Self {
        Self {
            initial_goal_count: config.initial_goal_count,
            config,
            name,
        }
    }

    /// Pick the next action
    pub fn get_action<GameType>(&mut self, game: &GameType) -> Direction
    where
        GameType: StateAdapter,
    {
        self.decide(game).action
    }

    /// Pick the next action and report how it was chosen
    pub fn decide<GameType>(&mut self, game: &GameType) -> Decision
    where
        GameType: StateAdapter,
    {
        let initial_goal_count = *self
            .initial_goal_count
            .get_or_insert_with(|| game.goal_count());

        let config = self.config.with_initial_goal_count(initial_goal_count);

        decide(game, &config, self.name)
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}
