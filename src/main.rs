use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::process::ExitCode;

use syllabus::commands::{
    FilterArgs, cmd_browse, cmd_config_set, cmd_config_show, cmd_facets, cmd_ls, cmd_url,
};

#[derive(Parser)]
#[command(name = "syllabus")]
#[command(about = "Course catalog browsing from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List courses matching the given filters
    #[command(visible_alias = "l")]
    Ls {
        #[command(flatten)]
        filters: FilterArgs,

        /// Seed the filters from a shareable query string
        #[arg(long)]
        from_url: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show facet sets and counters derived from the matching page
    Facets {
        #[command(flatten)]
        filters: FilterArgs,

        /// Seed the filters from a shareable query string
        #[arg(long)]
        from_url: Option<String>,
    },

    /// Print the canonical query string for a filter state
    Url {
        #[command(flatten)]
        filters: FilterArgs,

        /// Start from an existing query string
        #[arg(long)]
        from: Option<String>,
    },

    /// Browse the catalog interactively
    #[command(visible_alias = "b")]
    Browse {
        /// Seed the filters from a shareable query string
        #[arg(long)]
        from_url: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Set a configuration value (keys: api.base_url, api.token)
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ls {
            filters,
            from_url,
            json,
        } => cmd_ls(filters, from_url.as_deref(), json).await,
        Commands::Facets { filters, from_url } => cmd_facets(filters, from_url.as_deref()).await,
        Commands::Url { filters, from } => cmd_url(filters, from.as_deref()),
        Commands::Browse { from_url } => cmd_browse(from_url.as_deref()).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
