use maze::Maze;
use pacman_minimax::{
    agent::{choose_action, decide, AgentConfig, DecisionSource, PacmanAgent},
    depth::{DepthPolicy, SizeBandDepthPolicy},
    paranoid::{SearchBudget, SearchOptions},
    types::{Direction, GoalGettableGame, PositionGettableGame, SimulableGame},
    win_shortcut::immediate_win,
};

const WIN_NEXT: &str = include_str!("../../maze/fixtures/win_next.lay");
const SMALL: &str = include_str!("../../maze/fixtures/small_adv.lay");
const MEDIUM: &str = include_str!("../../maze/fixtures/medium_adv.lay");
const LARGE: &str = include_str!("../../maze/fixtures/large_adv.lay");

#[test]
fn test_win_shortcut_beats_any_depth() {
    let game = Maze::from_layout(WIN_NEXT).unwrap();

    assert_eq!(immediate_win(&game), Some(Direction::East));

    for depth in 0..=4 {
        let decision = decide(
            &game,
            &AgentConfig::default().with_depth_bound(depth),
            "shortcut",
        );

        assert_eq!(decision.action, Direction::East);
        assert_eq!(decision.source, DecisionSource::WinShortcut);
        assert!(decision.outcome.is_none());
    }
}

#[test]
fn test_no_win_shortcut_when_food_is_far() {
    let game = Maze::from_layout(SMALL).unwrap();

    // Both neighbours have food but eating one still leaves three
    assert_eq!(immediate_win(&game), None);
}

#[test]
fn test_depth_policy_picks_the_bound() {
    let policy = SizeBandDepthPolicy::default();

    for (layout, expected) in [(SMALL, 1), (MEDIUM, 2), (LARGE, 4)] {
        let game = Maze::from_layout(layout).unwrap();

        assert_eq!(
            policy.depth_bound(game.width(), game.height(), game.goal_count()),
            expected
        );
    }

    let game = Maze::from_layout(MEDIUM).unwrap();
    let decision = decide(&game, &AgentConfig::default(), "policy");

    assert_eq!(decision.depth_bound, Some(2));
    assert_eq!(decision.source, DecisionSource::Search);
    assert_eq!(decision.outcome.map(|o| o.depth), Some(2));
}

#[test]
fn test_explicit_depth_overrides_the_policy() {
    let game = Maze::from_layout(SMALL).unwrap();
    let decision = decide(&game, &AgentConfig::default().with_depth_bound(3), "override");

    assert_eq!(decision.depth_bound, Some(3));
    assert_eq!(decision.outcome.map(|o| o.depth), Some(3));

    // The policy would pick 4 here
    let game = Maze::from_layout(LARGE).unwrap();
    let decision = decide(&game, &AgentConfig::default().with_depth_bound(1), "override");

    assert_eq!(decision.depth_bound, Some(1));
    assert_eq!(decision.outcome.map(|o| o.depth), Some(1));
}

#[test]
fn test_choose_action_is_deterministic() {
    let game = Maze::from_layout(MEDIUM).unwrap();
    let config = AgentConfig::default().with_depth_bound(3);

    let first = choose_action(&game, &config);

    for _ in 0..3 {
        assert_eq!(choose_action(&game, &config), first);
    }
}

#[test]
fn test_chosen_action_is_legal() {
    for layout in [SMALL, MEDIUM, LARGE] {
        let game = Maze::from_layout(layout).unwrap();
        let action = choose_action(&game, &AgentConfig::default());

        assert!(game.legal_actions(0).contains(&action));
        assert!(!action.is_stop());
    }
}

#[test]
fn test_exhausted_budget_falls_back_to_greedy() {
    let game = Maze::from_layout(SMALL).unwrap();
    let config = AgentConfig::default()
        .with_depth_bound(3)
        .with_search_options(SearchOptions {
            budget: SearchBudget {
                max_nodes: Some(1),
                time_limit_ms: None,
            },
            ..Default::default()
        });

    let decision = decide(&game, &config, "budget");

    assert_eq!(decision.source, DecisionSource::Greedy);
    assert!(decision.outcome.is_none());
    assert_eq!(decision.action, Direction::East);
}

#[test]
fn test_stops_when_boxed_in() {
    let game = Maze::from_layout(
        "\
%%%%%
%%P%%
%%%%%
%. G%
%%%%%",
    )
    .unwrap();

    let decision = decide(&game, &AgentConfig::default().with_depth_bound(2), "boxed");

    assert_eq!(decision.action, Direction::Stop);
    assert_eq!(decision.source, DecisionSource::NoMoves);
}

#[test]
fn test_pacman_agent_remembers_the_first_goal_count() {
    let game = Maze::from_layout(MEDIUM).unwrap();
    let config = AgentConfig::default().with_depth_bound(2);
    let mut agent = PacmanAgent::new(config, "pacman");

    let first = agent.get_action(&game);
    let next = game.play_round(first);

    assert_eq!(
        agent.get_action(&next),
        choose_action(
            &next,
            &config.with_initial_goal_count(game.goal_count())
        )
    );
    assert_eq!(agent.config(), &config);
}

#[test]
fn test_config_loads_from_json() {
    let config: AgentConfig = serde_json::from_str(
        r#"{
            "depth_bound": 2,
            "weights": { "danger_penalty": 50.0 },
            "search": { "move_ordering": "as-generated", "budget": { "max_nodes": 1000 } }
        }"#,
    )
    .unwrap();

    assert_eq!(config.depth_bound, Some(2));
    assert_eq!(config.weights.danger_penalty, 50.0);
    assert_eq!(config.weights.progress, 10.0);
    assert_eq!(config.search.budget.max_nodes, Some(1000));
    assert!(config.search.alpha_beta);
    assert_eq!(config.depth_policy, SizeBandDepthPolicy::default());
}
