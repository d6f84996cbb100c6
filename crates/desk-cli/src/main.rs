use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "desk",
    about = "deskgrid: optimal daily desk assignment",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Optimizer config (desk.toml). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign desks for a request file
    Optimize {
        /// Path to the JSON optimization request
        #[arg(short, long)]
        request: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Rank the permitted desks for one employee
    Explain {
        #[arg(short, long)]
        request: String,
        /// Employee id to explain
        #[arg(short, long)]
        employee: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Check a request for duplicate or dangling ids
    Validate {
        #[arg(short, long)]
        request: String,
    },
    /// Manage the optimizer config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a desk.toml with the default weights
    Init {
        #[arg(short, long, default_value = "desk.toml")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays machine-readable.
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("desk=info".parse()?)
        );
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Optimize { request, format } => {
            commands::optimize::optimize(&request, config, &format)
        }
        Commands::Explain {
            request,
            employee,
            format,
        } => commands::optimize::explain(&request, &employee, config, &format),
        Commands::Validate { request } => commands::optimize::validate(&request),
        Commands::Config { action } => match action {
            ConfigAction::Init { path } => commands::config::init(&path),
        },
    }
}
