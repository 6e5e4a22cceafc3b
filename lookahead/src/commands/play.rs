use std::path::PathBuf;

use color_eyre::eyre::Result;
use maze::Outcome;
use pacman_minimax::{
    agent::PacmanAgent,
    types::{ScoreGettableGame, VictorDeterminableGame},
};
use tracing::info;

use super::{load_layout, AgentArgs};

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Layout file to load
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// Stop after this many rounds even if the game is still going
    #[clap(short, long, value_parser, default_value_t = 100)]
    turns: usize,

    #[clap(flatten)]
    agent: AgentArgs,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let mut game = load_layout(&self.layout)?;
        let mut agent = PacmanAgent::new(self.agent.config()?, "lookahead");

        println!("Turn 0");
        println!("{game}");
        println!();

        let mut turn = 0;
        while turn < self.turns && !game.is_over() {
            turn += 1;

            let action = agent.get_action(&game);
            game = game.play_round(action);

            println!("Turn {turn}: pacman went {action}, score {}", game.get_score());
            println!("{game}");
            println!();
        }

        match game.outcome() {
            Outcome::Won => println!("Pacman won on turn {turn} with {}", game.get_score()),
            Outcome::Lost => println!("Pacman was caught on turn {turn} with {}", game.get_score()),
            Outcome::Running => println!("Still going after {turn} turns"),
        }
        info!(turns = turn, score = game.get_score(), outcome = ?game.outcome(), "game over");

        Ok(())
    }
}
