//! questctl - inspect and replay the heritage quest progression engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use quest_common::{EngineConfig, GamificationEngine};
use questctl::display;
use questctl::script::{load_script, replay};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "questctl")]
#[command(about = "Heritage Quest - points, levels and leaderboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to user, then system config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level progress at a point total
    Progress {
        #[arg(long, default_value_t = 0)]
        points: u64,
    },

    /// List the quest catalog
    Quests,

    /// Show the leaderboard with the live player included
    Leaderboard {
        /// Live player's points
        #[arg(long, default_value_t = 0)]
        points: u64,
    },

    /// Replay a JSON array of game reports
    Play {
        script: PathBuf,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EngineConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let mut engine = GamificationEngine::from_config(&config).context("invalid config")?;
    debug!(player = %config.player.name, "config loaded");

    match cli.command {
        Commands::Progress { points } => {
            engine.add_points(points);
            let stats = engine.user_stats();
            println!("{}", stats.name.bold());
            println!("{}", display::format_progress(&stats, &engine.level_progress()));
        }
        Commands::Quests => {
            println!("{}", "Quests".bold());
            println!("{}", display::HR.dimmed());
            println!("{}", display::format_quests(engine.quests()));
        }
        Commands::Leaderboard { points } => {
            engine.add_points(points);
            let name = engine.user_stats().name;
            let board = engine.configured_leaderboard();
            println!("{}", "Leaderboard".bold());
            println!("{}", display::HR.dimmed());
            println!("{}", display::format_leaderboard(&board, &name));
        }
        Commands::Play { script, json } => {
            let reports = load_script(&script)?;
            let awards = replay(&mut engine, &reports);
            let snapshot = engine.snapshot();

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                return Ok(());
            }

            for award in &awards {
                let line = display::format_award(award);
                if award.is_awarded() {
                    println!("  {}", line.green());
                } else {
                    println!("  {}", line.yellow());
                }
            }
            println!("{}", display::HR.dimmed());
            println!("{}", display::format_stats(&snapshot.stats, snapshot.rank));
            println!("{}", display::format_progress(&snapshot.stats, &snapshot.progress));
        }
    }

    Ok(())
}
