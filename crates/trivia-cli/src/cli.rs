use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use trivia_core::{Difficulty, SortPreference};

#[derive(Parser)]
#[command(name = "trivia")]
#[command(about = "Multiple-choice trivia with a local scoreboard", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./trivia.toml when present)
    #[arg(long, env = "TRIVIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Question service base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Score store file
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a round, reusing the last player name
    Play(PlayArgs),

    /// Forget the last player name and play a fresh round
    NewPlayer(PlayArgs),

    /// Show the scoreboard
    Scores {
        /// Sort order (newest, oldest, highest, lowest); saved for next time
        #[arg(long)]
        sort: Option<SortPreference>,
    },

    /// Change the saved scoreboard sort order
    Sort {
        /// newest, oldest, highest or lowest
        preference: SortPreference,
    },

    /// Delete every saved score
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Player name
    #[arg(long)]
    pub name: Option<String>,

    /// Number of questions
    #[arg(long)]
    pub amount: Option<u32>,

    /// Question category ID
    #[arg(long)]
    pub category: Option<u32>,

    /// Question difficulty (easy, medium, hard)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
}
