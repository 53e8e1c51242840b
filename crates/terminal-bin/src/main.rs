use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use terminal_core::config::TerminalConfig;
use terminal_core::mockfs::MockFileSystem;
use terminal_core::session::Session;
use terminal_platform::clock::SystemClock;

mod render;
mod repl;

use render::Renderer;
use repl::Controller;

#[derive(Parser, Debug)]
#[command(name = "portfolio-terminal")]
#[command(about = "Simulated shell from the yflong.dev portfolio")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(long, env = "TERMINAL_CONFIG_PATH", global = true)]
    config_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "TERMINAL_LOG_LEVEL", global = true)]
    log_level: String,

    /// Skip the connection handshake animation
    #[arg(long)]
    no_boot: bool,

    /// Multiplier for boot animation speed
    #[arg(long)]
    boot_speed: Option<f64>,

    /// Don't look up the public IP for the badge
    #[arg(long)]
    no_ip: bool,

    /// Disable ANSI colours
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run command lines non-interactively and print the result
    Exec {
        /// Command lines, one per argument (e.g. "cd projects" "ls -l")
        #[arg(required = true)]
        lines: Vec<String>,

        /// Print the final scrollback as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with terminal output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!(
        "portfolio-terminal v{} starting (os={}, arch={})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    );

    let config_path = cli
        .config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(TerminalConfig::default_path);

    if let Some(Commands::InitConfig { force }) = cli.command {
        if config_path.exists() && !force {
            anyhow::bail!(
                "config already exists at {} (use --force to overwrite)",
                config_path.display()
            );
        }
        TerminalConfig::default().save(&config_path)?;
        println!("wrote default config to {}", config_path.display());
        return Ok(());
    }

    let mut config = if config_path.exists() {
        info!("loading config from {}", config_path.display());
        TerminalConfig::load(&config_path)?
    } else {
        info!("no config at {}, using defaults", config_path.display());
        TerminalConfig::default()
    };

    // CLI args override config file
    if cli.no_boot {
        config.boot_sequence = false;
    }
    if let Some(speed) = cli.boot_speed {
        config.boot_speed = speed;
    }
    if cli.no_ip {
        config.ip_lookup_enabled = false;
    }
    if cli.no_color || !std::io::stdout().is_terminal() {
        config.color = false;
    }

    let controller = Controller::new(create_session(&config));

    match cli.command {
        Some(Commands::Exec { lines, json }) => {
            let mut out = std::io::stdout();
            let renderer = Renderer::new(config.color);
            repl::run_script(controller, &lines, &renderer, json, &mut out)
                .context("exec failed")
        }
        Some(Commands::InitConfig { .. }) | None => repl::run(controller, &config).await,
    }
}

fn create_session(config: &TerminalConfig) -> Session {
    Session::new(Box::new(MockFileSystem::new()), Box::new(SystemClock))
        .with_history_limit(config.history_limit)
}
