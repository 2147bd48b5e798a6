use cadence::cli::commands::{Cli, Commands};
use cadence::cli::handlers;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => {
            // Init runs before planner discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
