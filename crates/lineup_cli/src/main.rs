//! Lineup CLI
//!
//! Replay a recorded match or check a kickoff setup.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lineup_core::GameState;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Youth match lineup rotation and playing-time tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a match script and print playing time per player
    Replay {
        /// Match script (JSON or YAML): setup plus timed actions
        #[arg(long)]
        script: PathBuf,

        /// Rules file; falls back to LINEUP_RULES_PATH, then defaults
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Check that a match setup builds a valid kickoff state
    Validate {
        /// Match setup file (JSON or YAML)
        #[arg(long)]
        setup: PathBuf,

        /// Rules file; falls back to LINEUP_RULES_PATH, then defaults
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { script, rules, json } => {
            let rules = lineup_cli::load_rules(rules.as_deref())?;
            let script = lineup_cli::load_script(&script)?;
            let report = lineup_cli::replay(&script, &rules)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", lineup_cli::render_table(&report.summary));
            }
        }

        Commands::Validate { setup, rules } => {
            let rules = lineup_cli::load_rules(rules.as_deref())?;
            let setup = lineup_cli::load_setup(&setup)?;

            match GameState::from_setup(&setup, &rules) {
                Ok(state) => {
                    println!(
                        "OK: {} players, {} in rotation, next off {}",
                        state.all_players.len(),
                        state.rotation_queue.len(),
                        state.next_player_id_to_sub_out.as_deref().unwrap_or("-")
                    );
                }
                Err(err) => {
                    anyhow::bail!("{}: {}", err.code(), err);
                }
            }
        }
    }

    Ok(())
}
