use anyhow::{Result, bail};
use clap::Parser;
use housegen::{FloorPlan, HouseConfig, HouseModel, HouseRng, generate_house};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    iterations: u32,
}

fn pick(rng: &mut ChaCha8Rng, low: u64, high: u64) -> u64 {
    low + rng.next_u64() % (high - low + 1)
}

fn random_config(rng: &mut ChaCha8Rng) -> HouseConfig {
    let min_w = pick(rng, 2, 6) as i32;
    let min_h = pick(rng, 2, 6) as i32;
    HouseConfig {
        floors: pick(rng, 1, 4) as usize,
        rooms_per_floor: pick(rng, 1, 14) as usize,
        room_size_min: (min_w, min_h),
        room_size_max: (min_w + pick(rng, 0, 6) as i32, min_h + pick(rng, 0, 6) as i32),
        door_width: 1.2,
        max_placement_attempts: pick(rng, 1, 200) as u32,
        ..HouseConfig::default()
    }
}

fn check_floor(floor: &FloorPlan) -> Vec<String> {
    let mut failures = Vec::new();
    for (index, left) in floor.rooms.iter().enumerate() {
        for right in &floor.rooms[index + 1..] {
            if left.rect.expanded(1).intersects(&right.rect.expanded(1)) {
                failures.push(format!("rooms {} and {} touch", left.index, right.index));
            }
        }
    }
    if floor.connections.len() + 1 != floor.rooms.len() {
        failures.push(format!(
            "{} connections for {} rooms",
            floor.connections.len(),
            floor.rooms.len()
        ));
    }
    if floor.connections.iter().any(|connection| connection.room_a >= connection.room_b) {
        failures.push("connection does not point at a newer room".to_string());
    }
    for corridor in &floor.corridors {
        let expected = corridor.from.manhattan(corridor.to) as usize + 1;
        if corridor.tiles.len() != expected {
            failures.push(format!("corridor has {} tiles, expected {expected}", corridor.tiles.len()));
        }
    }
    for door in &floor.doors {
        for id in &door.cut_walls {
            if !floor.walls.get(*id).is_some_and(|wall| wall.removed) {
                failures.push("cut wall still active".to_string());
            }
        }
    }
    failures
}

fn check_model(config: &HouseConfig, model: &HouseModel) -> Vec<String> {
    let mut failures = Vec::new();
    if model.floors.len() != config.floors {
        failures.push(format!("{} floors, expected {}", model.floors.len(), config.floors));
    }
    if model.stairs.len() != config.floors - 1 {
        failures.push(format!("{} stairs for {} floors", model.stairs.len(), config.floors));
    }
    for stair in &model.stairs {
        if stair.steps.len() != 10 || stair.left_posts.len() != 11 || stair.right_rails.len() != 10
        {
            failures.push(format!("stair from floor {} has wrong piece counts", stair.from_floor));
        }
    }
    for floor in &model.floors {
        failures.extend(
            check_floor(floor).into_iter().map(|failure| format!("floor {}: {failure}", floor.index)),
        );
    }
    failures
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();
    println!("Starting house fuzz on seed {} for {} iterations...", args.seed, args.iterations);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut digest_input = Vec::new();
    let mut incomplete = 0_u32;
    let mut skipped = 0_u32;
    for iteration in 0..args.iterations {
        let config = random_config(&mut rng);
        let house_seed = rng.next_u64();
        if let Err(err) = config.validate() {
            warn!(iteration, %err, "skipping invalid config");
            skipped += 1;
            continue;
        }

        let model = generate_house(&config, &mut HouseRng::from_seed(house_seed))?;
        let failures = check_model(&config, &model);
        if !failures.is_empty() {
            bail!(
                "iteration {iteration} (seed {house_seed}, config {config:?}) broke invariants: {}",
                failures.join("; ")
            );
        }

        let replay = generate_house(&config, &mut HouseRng::from_seed(house_seed))?;
        if replay.fingerprint() != model.fingerprint() {
            bail!("iteration {iteration} (seed {house_seed}) is not deterministic");
        }

        incomplete += u32::from(!model.is_complete());
        digest_input.extend(model.fingerprint().to_le_bytes());
    }

    println!("Fuzzing completed successfully.");
    println!("Incomplete layouts: {incomplete}");
    println!("Skipped configs: {skipped}");
    println!("Sweep digest: 0x{:016x}", xxh3_64(&digest_input));
    Ok(())
}
