use anyhow::{Context, Result};
use app::avatar::RecordedAvatar;
use app::launch::{SeedChoice, generate_runtime_seed, parse_launch_args};
use app::preferences::PreferenceStore;
use app::scene::SceneInventory;
use app::session::HouseSession;
use app::{format_fingerprint, format_seed};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let options =
        parse_launch_args(env::args_os(), generate_runtime_seed()).unwrap_or_else(|err| err.exit());

    let store = match options.preferences.clone().or_else(PreferenceStore::get_default_path) {
        Some(path) => Some(PreferenceStore::open(path).context("failed to open preferences")?),
        None => None,
    };
    let config = match &store {
        Some(store) => store.load_config().context("failed to read saved configuration")?,
        None => None,
    }
    .unwrap_or_default();

    if let SeedChoice::Generated(seed) = options.seed {
        info!(seed, "no --seed given, using a generated seed");
    }
    let mut session = HouseSession::start(
        config,
        options.seed.value(),
        SceneInventory::new(),
        RecordedAvatar::default(),
    )
    .context("invalid house configuration")?;

    for _ in 0..options.regenerations {
        session.regenerate();
    }

    let model = session.model();
    println!("Seed: {}", format_seed(session.seed()));
    println!("Generation: {}", session.house().generation());
    println!("Floors: {}", model.floors.len());
    println!("Rooms: {}", model.room_count());
    println!("Doors: {}", model.door_count());
    println!("Corridor tiles: {}", model.corridor_tile_count());
    println!("Stairs: {}", model.stairs.len());
    println!("Scene primitives: {}", session.scene().total_primitives());
    if let Some(spawn) = session.avatar().current {
        println!(
            "Spawn: ({:.2}, {:.2}, {:.2})",
            spawn.position.x, spawn.position.y, spawn.position.z
        );
    }
    println!("Fingerprint: {}", format_fingerprint(model.fingerprint()));

    if options.save_config {
        let mut store = store.context("no preference location available on this platform")?;
        session.save_config(&mut store).context("failed to save configuration")?;
        println!("Saved configuration to {}", store.path().display());
    }
    Ok(())
}
