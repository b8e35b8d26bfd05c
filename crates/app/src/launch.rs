//! Launch options for the headless host: seed selection, preference file, and regeneration count.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub seed: SeedChoice,
    /// Overrides the platform preference location.
    pub preferences: Option<PathBuf>,
    /// Extra generation passes after the first.
    pub regenerations: u32,
    /// Write the active configuration back to the preference store before exiting.
    pub save_config: bool,
}

static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ u64::from(process::id()).rotate_left(17)
        ^ SEED_COUNTER.fetch_add(1, Ordering::Relaxed).rotate_left(7);
    splitmix(entropy)
}

/// Command line of the headless host.
#[derive(Parser, Debug)]
#[command(name = "housegen-app", version, about = "Generate a house headlessly and report it", long_about = None)]
pub struct LaunchArgs {
    /// Decimal, or hexadecimal with a `0x` prefix. Generated at runtime when absent.
    #[arg(long, value_parser = parse_seed_value)]
    seed: Option<u64>,
    /// Preference file to use instead of the platform location
    #[arg(long)]
    preferences: Option<PathBuf>,
    /// Regenerate this many times after the first house
    #[arg(long = "regenerate", default_value_t = 0)]
    regenerations: u32,
    /// Save the active configuration to the preference file before exiting
    #[arg(long)]
    save_config: bool,
}

impl LaunchArgs {
    pub fn into_options(self, generated_seed: u64) -> LaunchOptions {
        LaunchOptions {
            seed: match self.seed {
                Some(seed) => SeedChoice::Cli(seed),
                None => SeedChoice::Generated(generated_seed),
            },
            preferences: self.preferences,
            regenerations: self.regenerations,
            save_config: self.save_config,
        }
    }
}

/// Parses `args` (program name first).
pub fn parse_launch_args<I, T>(args: I, generated_seed: u64) -> Result<LaunchOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(LaunchArgs::try_parse_from(args)?.into_options(generated_seed))
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    let parsed = match raw_value.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw_value.parse::<u64>(),
    };
    parsed.map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn splitmix(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
