mod demo;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use sidetrack_core::{Config, init_logging, load_transcript};
use sidetrack_ui::{App, BellFeedback};

/// Sidetrack - a chat transcript viewer with a slide-in table of contents
#[derive(Parser, Debug)]
#[command(name = "sidetrack")]
#[command(about = "Browse chat transcripts with a gesture-driven navigation panel", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to sidetrack.toml (default: ./sidetrack.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a transcript in the interactive viewer
    View {
        /// Transcript JSON file (default: a built-in demo conversation)
        #[arg(value_name = "FILE")]
        transcript: Option<PathBuf>,

        /// Ring the terminal bell when the active section changes
        #[arg(long)]
        bell: bool,
    },
    /// Write the built-in demo conversation to a JSON file
    Demo {
        /// Output path
        #[arg(value_name = "FILE", default_value = "demo.json")]
        out: PathBuf,
    },
    /// Show the effective configuration
    Status,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("sidetrack.toml"));
    let config = load_or_create_config(&config_path)?;

    init_logging(Some(config.logging.clone())).context("Failed to initialize logging")?;

    match cli.command {
        Commands::View { transcript, bell } => cmd_view(config, transcript, bell).await?,
        Commands::Demo { out } => cmd_demo(&out)?,
        Commands::Status => cmd_status(&config, &config_path),
    }

    Ok(())
}

/// Load config from file, or write the example and continue with defaults.
fn load_or_create_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    } else {
        std::fs::write(path, Config::example()).context("Failed to create config")?;
        eprintln!(
            "{} Created default config at {}",
            "Info:".blue().bold(),
            path.display()
        );
        Ok(Config::default())
    }
}

async fn cmd_view(config: Config, transcript: Option<PathBuf>, bell: bool) -> Result<()> {
    let messages = match transcript {
        Some(path) => load_transcript(&path)
            .with_context(|| format!("Failed to load transcript from {}", path.display()))?,
        None => demo::demo_transcript(),
    };

    let mut app = App::new(messages, &config);
    if bell {
        app = app.with_feedback(Box::new(BellFeedback));
    }

    sidetrack_ui::app::event_loop::run(&mut app).await.context("TUI session failed")?;
    Ok(())
}

fn cmd_demo(out: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&demo::demo_transcript())?;
    std::fs::write(out, json).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("{} Wrote demo transcript to {}", "Success:".green().bold(), out.display());
    Ok(())
}

fn cmd_status(config: &Config, config_path: &Path) {
    println!("{}", "Sidetrack Status".green().bold().underline());
    println!();

    println!("{} Config file: {}", "Info:".blue().bold(), config_path.display());
    println!();

    println!("{} Motion", "Info:".blue().bold());
    println!("  Panel open threshold: {}", config.motion.panel_open_threshold.to_string().cyan());
    println!("  Chat open threshold:  {}", config.motion.chat_open_threshold.to_string().cyan());
    println!("  Dynamic threshold:    {}", config.motion.dynamic_threshold.to_string().cyan());
    println!("  Velocity floor:       {}", config.motion.velocity_floor.to_string().cyan());
    println!(
        "  Spring:               k={} c={} m={}",
        config.motion.spring_stiffness.to_string().cyan(),
        config.motion.spring_damping.to_string().cyan(),
        config.motion.spring_mass.to_string().cyan()
    );
    println!();

    println!("{} Logging", "Info:".blue().bold());
    println!("  Level:  {}", config.logging.level.cyan());
    println!("  Format: {}", config.logging.format.cyan());
    println!("  File:   {}", config.logging.file.to_string().cyan());
}
