use maze::Maze;
use pacman_minimax::{
    heuristic::{EvaluationWeights, WeightedEvaluator},
    paranoid::{
        DepthIncrement, MinimaxAgent, MoveOrdering, SearchBudget, SearchOptions, SearchOutcome,
    },
    types::{Direction, GoalGettableGame, SimulableGame},
};

const SMALL: &str = include_str!("../../maze/fixtures/small_adv.lay");
const MEDIUM: &str = include_str!("../../maze/fixtures/medium_adv.lay");
const LARGE: &str = include_str!("../../maze/fixtures/large_adv.lay");
const ADJACENT_GHOST: &str = include_str!("../../maze/fixtures/adjacent_ghost.lay");

fn run(layout: &str, depth: usize, options: SearchOptions) -> SearchOutcome {
    let game = Maze::from_layout(layout).unwrap();
    let evaluator = WeightedEvaluator::new(EvaluationWeights::default(), game.goal_count());
    let agent = MinimaxAgent::new(&game, &evaluator, "property", options);

    agent.single_minimax(depth).unwrap()
}

fn exhaustive() -> SearchOptions {
    SearchOptions {
        alpha_beta: false,
        transposition_cache: false,
        move_ordering: MoveOrdering::AsGenerated,
        ..Default::default()
    }
}

#[test]
fn test_pruning_matches_exhaustive_search() {
    for layout in [SMALL, MEDIUM, ADJACENT_GHOST] {
        for depth in 1..=3 {
            let full = run(layout, depth, exhaustive());
            let pruned = run(
                layout,
                depth,
                SearchOptions {
                    alpha_beta: true,
                    ..exhaustive()
                },
            );

            assert_eq!(pruned.best_action(), full.best_action(), "depth {depth}");
            assert_eq!(pruned.score(), full.score(), "depth {depth}");
            assert!(pruned.stats.nodes_expanded <= full.stats.nodes_expanded);
            assert_eq!(full.stats.cutoffs, 0);
        }
    }
}

#[test]
fn test_pruning_skips_work() {
    let full = run(MEDIUM, 3, exhaustive());
    let pruned = run(MEDIUM, 3, SearchOptions::default());

    assert!(pruned.stats.nodes_visited < full.stats.nodes_visited);
    assert!(pruned.stats.cutoffs > 0);
}

#[test]
fn test_move_ordering_does_not_change_the_result() {
    for layout in [SMALL, MEDIUM] {
        for depth in 1..=3 {
            let as_generated = run(
                layout,
                depth,
                SearchOptions {
                    move_ordering: MoveOrdering::AsGenerated,
                    ..Default::default()
                },
            );
            let best_first = run(
                layout,
                depth,
                SearchOptions {
                    move_ordering: MoveOrdering::BestFirst,
                    ..Default::default()
                },
            );

            assert_eq!(as_generated.best_action(), best_first.best_action());
            assert_eq!(as_generated.score(), best_first.score());
        }
    }
}

#[test]
fn test_best_first_expands_fewer_nodes_on_the_fixtures() {
    for layout in [SMALL, MEDIUM, LARGE] {
        let as_generated = run(
            layout,
            3,
            SearchOptions {
                move_ordering: MoveOrdering::AsGenerated,
                transposition_cache: false,
                ..Default::default()
            },
        );
        let best_first = run(
            layout,
            3,
            SearchOptions {
                move_ordering: MoveOrdering::BestFirst,
                transposition_cache: false,
                ..Default::default()
            },
        );

        assert_eq!(as_generated.best_action(), best_first.best_action());
        assert!(
            best_first.stats.nodes_expanded <= as_generated.stats.nodes_expanded,
            "{} > {}",
            best_first.stats.nodes_expanded,
            as_generated.stats.nodes_expanded
        );
    }
}

#[test]
fn test_cache_is_transparent() {
    for layout in [SMALL, MEDIUM] {
        for depth in 1..=3 {
            let cached = run(layout, depth, SearchOptions::default());
            let uncached = run(
                layout,
                depth,
                SearchOptions {
                    transposition_cache: false,
                    ..Default::default()
                },
            );

            assert_eq!(cached.best_action(), uncached.best_action());
            assert_eq!(cached.score(), uncached.score());
            assert_eq!(uncached.stats.cache_hits, 0);
            assert_eq!(uncached.stats.cache_stores, 0);
        }
    }
}

#[test]
fn test_cache_gets_hits_when_states_repeat() {
    // Stepping east then west ends where west then east does. Without pruning every node
    // value is exact, so both get stored
    let outcome = run(
        MEDIUM,
        3,
        SearchOptions {
            alpha_beta: false,
            ..Default::default()
        },
    );

    assert!(outcome.stats.cache_stores > 0);
    assert!(outcome.stats.cache_hits > 0);
}

#[test]
fn test_search_is_deterministic() {
    let first = run(MEDIUM, 3, SearchOptions::default());
    let second = run(MEDIUM, 3, SearchOptions::default());

    assert_eq!(first.best_action(), second.best_action());
    assert_eq!(first.score(), second.score());
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.result.chosen_route(), second.result.chosen_route());
}

#[test]
fn test_stop_is_never_searched() {
    let outcome = run(SMALL, 2, SearchOptions::default());

    assert!(outcome
        .result
        .chosen_route()
        .iter()
        .all(|(_, action)| !action.is_stop()));
    assert!(outcome
        .result
        .first_options_for_agent(0)
        .unwrap()
        .iter()
        .all(|(action, _)| !action.is_stop()));
}

#[test]
fn test_route_alternates_agents() {
    // A cache hit would end the route early
    let outcome = run(
        SMALL,
        2,
        SearchOptions {
            transposition_cache: false,
            ..Default::default()
        },
    );
    let agents: Vec<usize> = outcome
        .result
        .chosen_route()
        .into_iter()
        .map(|(agent, _)| agent)
        .collect();

    assert_eq!(agents, vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_boxed_in_ghost_ends_the_line() {
    let outcome = run(
        "\
%%%%%%%
%P  . %
%%%%%%%
%%%G%%%
%%%%%%%",
        2,
        SearchOptions {
            transposition_cache: false,
            ..Default::default()
        },
    );

    assert_eq!(outcome.result.chosen_route(), vec![(0, Direction::East)]);
    assert_eq!(outcome.stats.nodes_expanded, 1);
}

#[test]
fn test_depth_increment_per_agent_move() {
    let per_round = run(ADJACENT_GHOST, 1, SearchOptions::default());
    let per_move = run(
        ADJACENT_GHOST,
        2,
        SearchOptions {
            depth_increment: DepthIncrement::PerAgentMove,
            ..Default::default()
        },
    );

    assert_eq!(per_round.best_action(), Some(Direction::West));
    assert_eq!(per_move.best_action(), Some(Direction::West));
    assert_eq!(per_round.result.chosen_route().len(), 2);
    assert_eq!(per_move.result.chosen_route().len(), 2);
}

#[test]
fn test_walking_into_a_ghost_is_a_loss() {
    let outcome = run(ADJACENT_GHOST, 2, SearchOptions::default());

    assert!(outcome.result.action_is_loss(Direction::East));
    assert!(!outcome.result.action_is_loss(Direction::West));
}

#[test]
fn test_depth_zero_scores_the_root() {
    let outcome = run(SMALL, 0, SearchOptions::default());

    assert_eq!(outcome.best_action(), None);
    assert_eq!(outcome.stats.nodes_visited, 1);
    assert_eq!(outcome.stats.evaluations, 1);
    assert!(outcome.result.to_text_tree().is_none());
}

#[test]
fn test_node_budget_keeps_last_completed_depth() {
    let game = Maze::from_layout(MEDIUM).unwrap();
    let evaluator = WeightedEvaluator::new(EvaluationWeights::default(), game.goal_count());

    let unlimited = MinimaxAgent::new(&game, &evaluator, "budget", SearchOptions::default());
    let depth_one = unlimited.single_minimax(1).unwrap();
    let depth_four = unlimited.single_minimax(4).unwrap();

    // Enough for depth one, nowhere near enough for depth four on top of it
    let max_nodes = depth_one.stats.nodes_visited + depth_four.stats.nodes_visited / 2;
    let limited = MinimaxAgent::new(
        &game,
        &evaluator,
        "budget",
        SearchOptions {
            budget: SearchBudget {
                max_nodes: Some(max_nodes),
                time_limit_ms: None,
            },
            ..Default::default()
        },
    );

    let outcome = limited.search(4).unwrap();

    assert!(outcome.depth >= 1);
    assert!(outcome.depth < 4);
    assert!(outcome.best_action().is_some());
    assert!(limited.single_minimax(4).is_err());
}

#[test]
fn test_tiny_budget_finishes_nothing() {
    let game = Maze::from_layout(SMALL).unwrap();
    let evaluator = WeightedEvaluator::new(EvaluationWeights::default(), game.goal_count());
    let agent = MinimaxAgent::new(
        &game,
        &evaluator,
        "budget",
        SearchOptions {
            budget: SearchBudget {
                max_nodes: Some(1),
                time_limit_ms: None,
            },
            ..Default::default()
        },
    );

    assert!(agent.search(3).is_none());
}

#[test]
fn test_text_tree_shows_the_root_options() {
    let outcome = run(SMALL, 1, SearchOptions::default());
    let tree = outcome.result.to_text_tree().unwrap();

    for (action, _) in outcome.result.first_options_for_agent(0).unwrap() {
        assert!(tree.contains(&format!("{action} agent 0")));
    }
}

#[test]
fn test_successors_leave_the_root_alone() {
    let game = Maze::from_layout(SMALL).unwrap();
    let before = game.clone();

    let _ = game.generate_successors(0);
    let _ = run(SMALL, 2, SearchOptions::default());

    assert_eq!(game, before);
}
