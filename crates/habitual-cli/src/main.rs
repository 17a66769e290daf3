use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use habitual_core::SuggestionCategory;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

#[derive(Parser)]
#[command(name = "habitual", version, about = "Habit tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// In-app notifications
    Notification {
        #[command(subcommand)]
        action: commands::notification::NotificationAction,
    },
    /// Aggregate habit statistics
    Stats(commands::stats::StatsArgs),
    /// User preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Export and import user data
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Print a random motivational quote
    Quote,
    /// List habit suggestions for a category
    Suggest {
        /// health, productivity, mindfulness, social or skills
        category: SuggestionCategory,
    },
    /// Sign in and out
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HABITUAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action).await,
        Commands::Notification { action } => commands::notification::run(action),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Quote => commands::catalog::quote(),
        Commands::Suggest { category } => commands::catalog::suggest(category),
        Commands::Account { action } => commands::account::run(action).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitual", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
