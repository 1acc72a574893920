use clap::{ArgAction, Parser, Subcommand};
use commands::{add, config, detail, interactive, remove, search, watched};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "showey")]
#[command(about = "Showey - search movies and keep a rated watch log")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the movie directory
    #[command(long_about = "Search the remote movie directory by free text. Zero matches is reported as a message, not an empty list.")]
    Search {
        /// Free-text query
        query: String,
    },
    /// Show the full record for one movie
    Detail {
        /// IMDb id, e.g. tt0372784
        imdb_id: String,
    },
    /// Rate a movie and add it to the watched list
    #[command(long_about = "Fetch the movie's detail record, attach your rating, and append the derived record to the persisted watched list.")]
    Add {
        /// IMDb id, e.g. tt0372784
        imdb_id: String,

        /// Your rating, 1-10
        #[arg(long)]
        rating: u8,
    },
    /// Show the watched list and its summary
    Watched,
    /// Remove a movie from the watched list
    Remove {
        /// IMDb id to remove
        imdb_id: String,
    },
    /// Inspect or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Line-driven interactive session (search, open, rate, add)
    Interactive,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Update configuration values
    Set {
        /// OMDb API key
        #[arg(long)]
        api_key: Option<String>,

        /// OMDb endpoint base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Minimum query length before a search is issued
        #[arg(long)]
        min_query_len: Option<usize>,

        /// Debounce window in milliseconds for search-as-you-type
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Search { query } => search::run_search(&query, &output).await,
        Commands::Detail { imdb_id } => detail::run_detail(&imdb_id, &output).await,
        Commands::Add { imdb_id, rating } => add::run_add(&imdb_id, rating, &output).await,
        Commands::Watched => watched::run_watched(&output),
        Commands::Remove { imdb_id } => remove::run_remove(&imdb_id, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
        Commands::Interactive => interactive::run_interactive(&output).await,
    };

    result.map_err(|e| color_eyre::eyre::eyre!("{}", e))
}
