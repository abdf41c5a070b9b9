use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "solaudit")]
#[clap(about = "AI-assisted Solidity security auditor", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
