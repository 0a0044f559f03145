use clap::Parser;

use fairline::cli::{check, grade, output, paper, scan, CheckCommand, Cli, Commands};
use fairline::config::Config;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_logging(&cli);

    let result = match &cli.command {
        Commands::Scan(args) => scan::execute(args),
        Commands::Paper(args) => paper::execute(args),
        Commands::Grade(args) => grade::execute(args),
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Logging follows the command's config file when one was given and is
/// readable; otherwise defaults apply. Config errors surface later in
/// the command itself.
fn init_logging(cli: &Cli) {
    let path = match &cli.command {
        Commands::Scan(args) => args.config.as_deref(),
        Commands::Paper(args) => args.config.as_deref(),
        Commands::Grade(args) => args.config.as_deref(),
        Commands::Check(CheckCommand::Config(_)) => None,
    };
    let config = Config::load_or_default(path).unwrap_or_default();
    config.init_logging();
}
