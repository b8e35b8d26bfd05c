use anyhow::{Context, Result};
use app::scene::{SceneBuilder, SceneInventory};
use app::{format_fingerprint, format_seed};
use clap::Parser;
use housegen::{House, HouseConfig, HouseModel};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Generate a house floor plan and report or dump it", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// TOML file with house parameters; missing keys use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    floors: Option<usize>,
    #[arg(long)]
    rooms: Option<usize>,
    /// Regenerate this many times from the same stream before reporting
    #[arg(long, default_value_t = 0)]
    regenerate: u32,
    /// Print the full model as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    generation: u32,
    fingerprint: String,
    inventory: &'a SceneInventory,
    model: &'a HouseModel,
}

fn load_config(args: &Args) -> Result<HouseConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => HouseConfig::default(),
    };
    if let Some(floors) = args.floors {
        config.floors = floors;
    }
    if let Some(rooms) = args.rooms {
        config.rooms_per_floor = rooms;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut house = House::from_seed(config, args.seed).context("Invalid house configuration")?;
    for _ in 0..args.regenerate {
        house.regenerate();
    }
    let model = house.model();

    let mut inventory = SceneInventory::new();
    inventory.build(model);

    if args.json {
        let report = Report {
            seed: args.seed,
            generation: house.generation(),
            fingerprint: format_fingerprint(model.fingerprint()),
            inventory: &inventory,
            model,
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize model")?;
        println!("{json}");
        return Ok(());
    }

    println!("Seed: {}", format_seed(args.seed));
    println!("Generation: {}", house.generation());
    for floor in &model.floors {
        let tiles: usize = floor.corridors.iter().map(|corridor| corridor.tiles.len()).sum();
        println!(
            "Floor {}: {} rooms, {} doors, {} corridor tiles, {} active walls",
            floor.index,
            floor.rooms.len(),
            floor.doors.len(),
            tiles,
            floor.walls.active().count()
        );
    }
    println!("Stairs: {}", model.stairs.len());
    println!("Scene primitives: {}", inventory.total_primitives());
    for diagnostic in &model.diagnostics {
        println!("Diagnostic: {diagnostic:?}");
    }
    println!("Fingerprint: {}", format_fingerprint(model.fingerprint()));

    Ok(())
}
