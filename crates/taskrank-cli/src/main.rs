use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "taskrank",
    version,
    about = "Score and rank tasks with a remote prioritization service"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct GlobalArgs {
    /// Config file (default: ~/.config/taskrank/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scoring service base URL, overriding api.base_url
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    /// Output format, overriding output.format
    #[arg(long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Html,
    Json,
}

impl From<FormatArg> for taskrank_core::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Html => Self::Html,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: add tasks, analyze, get suggestions
    Session,
    /// Score tasks from a JSON file
    Analyze(commands::analyze::AnalyzeArgs),
    /// Fetch the service's top suggestions
    Suggest(commands::suggest::SuggestArgs),
    /// List available strategies
    Strategies,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn context(
    global: &GlobalArgs,
    config_path: &Path,
) -> Result<commands::Context, taskrank_core::ConfigError> {
    commands::Context::load(
        config_path,
        global.api_base.clone(),
        global.format.map(Into::into),
    )
}

async fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match &cli.global.config {
        Some(path) => path.clone(),
        None => taskrank_core::Config::default_path()?,
    };

    match cli.command {
        Commands::Session => commands::session::run(&context(&cli.global, &config_path)?).await,
        Commands::Analyze(args) => {
            commands::analyze::run(args, &context(&cli.global, &config_path)?).await
        }
        Commands::Suggest(args) => {
            commands::suggest::run(args, &context(&cli.global, &config_path)?).await
        }
        Commands::Strategies => commands::strategies::run(&context(&cli.global, &config_path)?),
        Commands::Config { action } => commands::config::run(action, &config_path),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "taskrank",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(e) = dispatch(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
