use std::{collections::BTreeMap, path::PathBuf};

use color_eyre::eyre::Result;
use itertools::Itertools;
use pacman_minimax::{
    agent::decide,
    paranoid::{MinMaxReturn, SearchOutcome, SearchStats, WrappedScore},
    types::Direction,
};

use super::{load_layout, AgentArgs};

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Layout file to load
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    #[clap(flatten)]
    agent: AgentArgs,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_layout(&self.layout)?;
        let config = self.agent.config()?;

        println!("{game}");
        println!();

        let decision = decide(&game, &config, "lookahead");

        println!("Chose {} ({:?})", decision.action, decision.source);

        let outcome = match decision.outcome {
            Some(outcome) => outcome,
            None => return Ok(()),
        };

        if let Some(reason) = early_stop_reason(&outcome, decision.depth_bound) {
            println!("{reason}");
        }
        println!("Score {} at depth {}", outcome.score(), outcome.depth);
        print_stats(&outcome.stats);

        match outcome.score() {
            WrappedScore::Lose(..) => println!("There were no safe options"),
            WrappedScore::Win(..) => println!("Pacman can force a win"),
            WrappedScore::Scored(..) => {
                let losing_moves = outcome
                    .result
                    .first_options_for_agent(0)
                    .into_iter()
                    .flatten()
                    .filter(|(m, _)| outcome.result.action_is_loss(*m))
                    .map(|(m, _)| m)
                    .join(", ");

                if !losing_moves.is_empty() {
                    println!("These moves lose: {losing_moves}");
                }
            }
        }
        println!();

        print_moves(&outcome.result);

        if let Some(tree) = outcome.result.to_text_tree() {
            println!("{tree}");
        }

        Ok(())
    }
}

/// Why the deepening stopped short of the bound, if it did
fn early_stop_reason(outcome: &SearchOutcome, depth_bound: Option<usize>) -> Option<String> {
    let depth_bound = depth_bound?;
    if outcome.depth >= depth_bound {
        return None;
    }

    if outcome.score().terminal_depth().is_some() {
        Some(format!(
            "The result was proven after {} of {} rounds, deeper searches were skipped",
            outcome.depth, depth_bound
        ))
    } else {
        Some(format!(
            "The budget ran out, the deepest finished search went {} of {} rounds",
            outcome.depth, depth_bound
        ))
    }
}

fn print_stats(stats: &SearchStats) {
    println!(
        "Visited {} nodes, expanded {}, evaluated {}, {} cutoffs, {} cache hits, {} cache stores",
        stats.nodes_visited,
        stats.nodes_expanded,
        stats.evaluations,
        stats.cutoffs,
        stats.cache_hits,
        stats.cache_stores,
    );
}

fn print_moves(result: &MinMaxReturn) {
    let route = result.chosen_route();

    let mut paths_per_agent: BTreeMap<usize, Vec<Direction>> = BTreeMap::new();
    for (agent, m) in &route {
        paths_per_agent.entry(*agent).or_default().push(*m);
    }

    let rounds = paths_per_agent.get(&0).map(Vec::len).unwrap_or_default();
    println!("The principal variation looks {rounds} moves ahead:");
    for (agent, path) in paths_per_agent {
        let name = if agent == 0 {
            "pacman".to_owned()
        } else {
            format!("ghost {agent}")
        };

        println!("{name}: {}", path.iter().join(", "));
    }
    println!()
}
