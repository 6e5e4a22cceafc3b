pub mod play;
pub mod solve;

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use clap::{Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use maze::Maze;
use pacman_minimax::{agent::AgentConfig, paranoid::MoveOrdering};

use play::Play;
use solve::Solve;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run one decision and explain it
    Solve(Solve),
    /// Let the agent play a whole game against ghosts that take their first legal move
    Play(Play),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Play(p) => p.run()?,
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Ordering {
    BestFirst,
    AsGenerated,
}

impl From<Ordering> for MoveOrdering {
    fn from(o: Ordering) -> Self {
        match o {
            Ordering::BestFirst => MoveOrdering::BestFirst,
            Ordering::AsGenerated => MoveOrdering::AsGenerated,
        }
    }
}

/// Flags shared by every command that runs the agent. They override the config file
#[derive(clap::Args, Debug)]
pub(crate) struct AgentArgs {
    /// JSON file with an agent config. Missing fields keep their defaults
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Search to this depth instead of asking the depth policy
    #[clap(short, long, value_parser)]
    depth: Option<usize>,

    /// Plain minimax without alpha-beta pruning
    #[clap(long)]
    no_pruning: bool,

    /// Turn off the transposition cache
    #[clap(long)]
    no_cache: bool,

    /// How to order moves before expanding them
    #[clap(long, value_enum)]
    ordering: Option<Ordering>,

    /// Give up after visiting this many nodes and keep the deepest finished search
    #[clap(long, value_parser)]
    max_nodes: Option<u64>,

    /// Give up after this many milliseconds and keep the deepest finished search
    #[clap(long, value_parser)]
    time_limit_ms: Option<u64>,
}

impl AgentArgs {
    pub(crate) fn config(&self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = read_to_string(path)
                    .wrap_err_with(|| format!("Could not read config {}", path.display()))?;

                serde_json::from_str(&json)
                    .wrap_err_with(|| format!("Config {} is not valid", path.display()))?
            }
            None => AgentConfig::default(),
        };

        if let Some(depth) = self.depth {
            config = config.with_depth_bound(depth);
        }
        if self.no_pruning {
            config.search.alpha_beta = false;
        }
        if self.no_cache {
            config.search.transposition_cache = false;
        }
        if let Some(ordering) = self.ordering {
            config.search.move_ordering = ordering.into();
        }
        if self.max_nodes.is_some() {
            config.search.budget.max_nodes = self.max_nodes;
        }
        if self.time_limit_ms.is_some() {
            config.search.budget.time_limit_ms = self.time_limit_ms;
        }

        Ok(config)
    }
}

pub(crate) fn load_layout(path: &Path) -> Result<Maze> {
    let layout = read_to_string(path)
        .wrap_err_with(|| format!("Could not read layout {}", path.display()))?;

    Maze::from_layout(&layout).wrap_err_with(|| format!("Layout {} is not valid", path.display()))
}
