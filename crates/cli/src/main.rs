mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "claim-cli", about = "Stellar claimable-balance utilities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a wire-format claim predicate offline.
    Inspect(commands::inspect::InspectArgs),
    /// List claimable balances for an account via Horizon.
    List(commands::list::ListArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::List(args) => commands::list::run(args),
    };
    if let Err(err) = result {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}
