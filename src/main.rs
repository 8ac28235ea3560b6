use clap::Parser;

use todo_guard::cli::{Cli, Commands};
use todo_guard::commands::{run_config, run_init, run_scan, run_watch};
use todo_guard::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Scan(args) => run_scan(args, &cli).await,
        Commands::Watch(args) => run_watch(args, &cli).await,
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}
