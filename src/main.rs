use clap::Parser;
use std::process;

use planboard::cli;
use planboard::cli::commands::{Cli, Commands};

fn main() {
    let cli_args = Cli::parse();
    planboard::telemetry::init_subscriber();

    let ctx = cli::Context {
        json: cli_args.json,
        data_dir: cli_args.data_dir.clone(),
    };

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(&ctx),
        Commands::Login { email, password } => cli::auth::run_login(&email, &password, &ctx),
        Commands::Logout => cli::auth::run_logout(&ctx),
        Commands::Whoami => cli::auth::run_whoami(&ctx),
        Commands::Plan(cmd) => cli::plan::run(cmd, &ctx),
        Commands::Board { search, tag, status } => {
            cli::board::run_board(search.as_deref(), &tag, status.as_deref(), &ctx)
        }
        Commands::Tags => cli::board::run_tags(&ctx),
    };

    process::exit(exit_code);
}
