use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "roomshare",
    about = "Roomshare — assign students to shared rooms from mutual preferences",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run room assignment over a closed student batch.
    ///
    /// Reads settings from roomshare.toml in the current directory unless
    /// --config is given. Flags override config values.
    Assign {
        /// Student batch (JSON array). Defaults to [input].path, resolved against
        /// the config file's directory, then students.json.
        #[arg(short, long)]
        input: Option<String>,
        /// Path to a roomshare.toml.
        #[arg(short, long)]
        config: Option<String>,
        /// Override the room capacity.
        #[arg(long)]
        capacity: Option<usize>,
        /// Output format: text, json or outcomes
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Validate a student batch without assigning rooms
    Check {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Generate a roomshare.toml scaffold
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
    },
}

/// Applied only when RUST_LOG is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "roomshare_engine=info";

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assign {
            input,
            config,
            capacity,
            format,
        } => commands::assign::assign(input.as_deref(), config.as_deref(), capacity, &format),
        Commands::Check { input, config } => {
            commands::check::check(input.as_deref(), config.as_deref())
        }
        Commands::Init { path } => commands::init::init(&path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_can_enable_engine_debug() {
        let filter = env_filter(Some("roomshare_engine=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unset_rust_log_falls_back_to_engine_info() {
        let filter = env_filter(None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn unparsable_rust_log_falls_back_to_default() {
        let filter = env_filter(Some("roomshare_engine=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
