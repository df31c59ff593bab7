use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verfs_core::{LogLevel, NamespaceConfig, NamespaceTree, Navigator};

#[derive(Parser)]
#[command(name = "verfs")]
#[command(about = "An in-memory filesystem namespace with versioned names")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(short, long, global = true)]
    log_level: Option<LogLevel>,

    /// Print metadata and listings as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the demonstration session against a fresh namespace
    Demo,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => NamespaceConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => NamespaceConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("verfs={0},verfs_core={0}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Demo => {
            info!("Running demo with {:?} group allocation", config.group_allocation);
            run_demo(&config, cli.json)?;
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Prints what the namespace queries report.
struct Reporter {
    json: bool,
}

impl Reporter {
    fn current_directory(&self, nav: &Navigator<'_>) {
        println!("Current Directory {}", nav.current_directory());
    }

    fn metadata(&self, nav: &Navigator<'_>) -> Result<()> {
        let meta = nav.folder_metadata();
        if self.json {
            println!("{}", serde_json::to_string(&meta)?);
        } else {
            println!("{}", meta);
        }
        Ok(())
    }

    fn content(&self, nav: &Navigator<'_>) -> Result<()> {
        let listing = nav.folder_content();
        if self.json {
            println!("{}", serde_json::to_string(&listing)?);
        } else {
            println!("{}", listing);
        }
        Ok(())
    }
}

fn run_demo(config: &NamespaceConfig, json: bool) -> Result<()> {
    let mut tree = NamespaceTree::with_config(config);
    let mut nav = Navigator::new(&mut tree);
    let out = Reporter { json };

    // Rejected steps are logged by the navigator and counted in its stats;
    // the session carries on like any other caller would.
    out.current_directory(&nav);
    let _ = nav.create_folder("aaa");
    let _ = nav.create_file("aaa", "bbb");
    let _ = nav.create_folder("bbb");
    let _ = nav.create_file("aaa", "fffffffff");
    let _ = nav.change_directory("aaa", 1, true);
    out.current_directory(&nav);
    let _ = nav.change_directory("..", 1, true);
    out.current_directory(&nav);
    out.metadata(&nav)?;
    let _ = nav.change_directory("aaa", 1, true);
    out.metadata(&nav)?;
    let _ = nav.change_directory("..", 1, true);
    let _ = nav.create_folder("aaa");
    out.metadata(&nav)?;
    let _ = nav.delete_file("aaa");
    out.metadata(&nav)?;
    let _ = nav.change_directory("aaa", 2, true);
    let _ = nav.create_file("aaa", "bbb");
    let _ = nav.create_folder("bbb");
    let _ = nav.create_file("aaa", "fffffffff");
    out.content(&nav)?;
    let _ = nav.change_directory("..", 1, true);
    let _ = nav.change_directory("aaa", 1, true);
    out.metadata(&nav)?;
    let _ = nav.change_directory("..", 1, true);
    let _ = nav.change_directory("aaa", 2, true);
    out.metadata(&nav)?;
    let _ = nav.change_directory("..", 1, true);
    out.content(&nav)?;

    info!("Demo finished, {} nodes live", nav.tree().len());
    println!("{}", nav.stats());
    Ok(())
}
