//! Headless combat sandbox.
//!
//! Loads content, spawns two duelists facing each other and plays a skill
//! (or basic attacks) frame by frame, printing every action point that
//! fires along the way.
//!
//! Run with: `cargo run -p combat-sandbox -- --skill 1 --frames 60`

mod duel;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use combat_content::ContentLoader;
use combat_core::{Millis, PcgRng, SkillId};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::duel::Duel;

/// Plays a scripted duel over authored combat content
#[derive(Parser, Debug)]
#[command(name = "combat-sandbox")]
#[command(about = "Headless combat sandbox", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (defaults to the embedded data set)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value = "60")]
    frames: u32,

    /// Frame length in milliseconds
    #[arg(long, default_value = "50")]
    frame_ms: Millis,

    /// Seed for critical and block rolls
    #[arg(long, default_value = "7")]
    seed: u64,

    /// Skill id to spell; basic attacks when omitted
    #[arg(long)]
    skill: Option<u32>,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let loader = match &cli.content {
        Some(dir) => ContentLoader::from_dir(dir),
        None => ContentLoader::embedded(),
    };
    let bundle = loader.load().context("Failed to load combat content")?;
    let world = bundle.into_world().with_rng(PcgRng::new(cli.seed));

    let mut duel = Duel::new(world, cli.skill.map(SkillId)).context("Failed to set up duel")?;
    for _ in 0..cli.frames {
        duel.step(cli.frame_ms)?;
        if duel.is_over() {
            break;
        }
    }
    duel.report();

    Ok(())
}
