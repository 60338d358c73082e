use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::cmd::{
    self, check::CheckArgs, estimate::EstimateArgs, questions::QuestionsArgs, run::RunArgs,
};
use crate::config::WizardConfig;
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "quote-wizard",
    about = "Step-by-step cleaning quote wizard",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// TOML file with price overrides and an optional form path
    #[arg(long, value_name = "PATH", global = true, env = "QUOTE_WIZARD_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the question list structure
    Check(CheckArgs),
    /// List the questions that are active for a set of answers
    Questions(QuestionsArgs),
    /// Price a set of answers
    Estimate(EstimateArgs),
    /// Walk through the wizard interactively and emit the quote submission
    Run(RunArgs),
    /// Print the JSON schema for question list files
    Schema,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = WizardConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Check(args) => cmd::check::run(args, config),
        Commands::Questions(args) => cmd::questions::run(args, config),
        Commands::Estimate(args) => cmd::estimate::run(args, config),
        Commands::Run(args) => cmd::run::run(args, config),
        Commands::Schema => cmd::schema::run(),
    }
}
