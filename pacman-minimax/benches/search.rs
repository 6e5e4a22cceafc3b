use maze::Maze;
use pacman_minimax::{
    agent::{choose_action, AgentConfig},
    heuristic::{EvaluationWeights, WeightedEvaluator},
    paranoid::{MinimaxAgent, MoveOrdering, SearchOptions},
    types::GoalGettableGame,
};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut g = c.benchmark_group("Search");
    let medium = include_str!("../../maze/fixtures/medium_adv.lay");
    let large = include_str!("../../maze/fixtures/large_adv.lay");

    for (name, options) in [
        ("Medium Default", SearchOptions::default()),
        (
            "Medium No Ordering",
            SearchOptions {
                move_ordering: MoveOrdering::AsGenerated,
                ..Default::default()
            },
        ),
        (
            "Medium No Cache",
            SearchOptions {
                transposition_cache: false,
                ..Default::default()
            },
        ),
    ] {
        g.bench_function(name, |b| {
            b.iter(|| {
                let game = Maze::from_layout(medium).unwrap();
                let evaluator =
                    WeightedEvaluator::new(EvaluationWeights::default(), game.goal_count());

                let agent = MinimaxAgent::new(black_box(&game), &evaluator, "bench", options);

                agent.single_minimax(3)
            })
        });
    }

    g.bench_function("Large Choose Action", |b| {
        b.iter(|| {
            let game = Maze::from_layout(large).unwrap();

            choose_action(black_box(&game), &AgentConfig::default())
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
