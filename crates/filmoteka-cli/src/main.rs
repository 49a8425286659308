use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, config, edit, list, show};
use filmoteka_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "filmoteka")]
#[command(about = "Filmoteka - browse and edit the film catalogue")]
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

    /// Write logs to the daily rotated log file instead of stderr
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List films
    #[command(long_about = "List films from the server. Without paging flags the first page (list.page_size from the configuration) is shown.")]
    List {
        /// Field to sort by (e.g. nazov, rok)
        #[arg(long)]
        order_by: Option<String>,

        /// Sort in descending order
        #[arg(long, action = ArgAction::SetTrue)]
        descending: bool,

        /// Index of the first film to return
        #[arg(long)]
        from: Option<u32>,

        /// Index after the last film to return
        #[arg(long)]
        to: Option<u32>,

        /// Only films matching this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one film
    Show {
        /// Film id
        id: u64,
    },
    /// Edit a film, or create one when no id is given
    #[command(long_about = "Open the interactive film editor. Without an ID (or with ID 0) a new film is created. With --from-file the film contents are taken from a JSON file and saved without prompting.")]
    Edit {
        /// Film id
        id: Option<String>,

        /// Replace the film's contents with this JSON file and save it
        #[arg(long, value_name = "PATH")]
        from_file: Option<PathBuf>,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Remove stored credentials or logs
    Clear {
        /// Remove credentials and logs
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Remove the stored auth token
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Remove log files
        #[arg(long, action = ArgAction::SetTrue)]
        logs: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the token)
    Show {
        /// Show the token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Set the films API base URL
    Server {
        /// Base URL, e.g. http://localhost:8080/
        url: String,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Store the auth token sent as X-Auth-Token
    #[command(long_about = "Store the auth token that is sent with every request. If no token is given you will be prompted for it. Use --clear to remove it.")]
    Token {
        /// The token (if not provided, will prompt)
        token: Option<String>,

        /// Remove the stored token
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "token")]
        clear: bool,
    },

    /// Set the ranking lists offered by the editor
    Rankings {
        /// Ranking list names, in display order
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli.log_file.then(|| PathManager::default().log_file());
    logging::init_logging(cli.verbose, cli.quiet, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::List {
            order_by,
            descending,
            from,
            to,
            search,
        } => {
            let args = list::ListArgs { order_by, descending, from, to, search };
            list::run_list(args, &output).await
        }
        Commands::Show { id } => show::run_show(id, &output).await,
        Commands::Edit { id, from_file } => edit::run_edit(id, from_file, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
        Commands::Clear { all, credentials, logs } => clear::run_clear(all, credentials, logs, &output),
    }
}
