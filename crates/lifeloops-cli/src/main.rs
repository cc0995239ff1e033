use clap::{CommandFactory, Parser, Subcommand};
use lifeloops_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lifeloops-cli", version, about = "Life Loops CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked goal suggestions for the current profile
    Suggest(commands::suggest::SuggestArgs),
    /// Browse the goal template catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Archetype profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Loop capacity states
    Loops {
        #[command(subcommand)]
        action: commands::loops::LoopsAction,
    },
    /// Directional document management
    Direction {
        #[command(subcommand)]
        action: commands::direction::DirectionAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Config::read().unwrap_or_default().log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Loops { action } => commands::loops::run(action),
        Commands::Direction { action } => commands::direction::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "lifeloops-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
