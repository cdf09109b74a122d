//! stroll — one mascot on a headless desktop.
//!
//! Loads a configuration tree (JSON) and runtime settings (TOML), then runs a
//! single mascot for a fixed number of ticks against an in-memory
//! environment with one open window.  Behavior changes and errors are logged
//! through `tracing`; set `RUST_LOG=debug` to also see every selection.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mascot_config::{Entry, Schema};
use mascot_core::{Area, Mascot, MascotId, Settings, StaticEnvironment};
use mascot_engine::{DriverBuilder, EngineError, EngineObserver, Registry};

// ── Constants ─────────────────────────────────────────────────────────────────

const IMAGE_SET:     &str = "shimeji";
const CONFIG_JSON:   &str = include_str!("../data/shimeji.json");
const SETTINGS_TOML: &str = include_str!("../data/settings.toml");

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "stroll")]
#[command(about = "Run one mascot over a headless desktop")]
struct Args {
    /// Configuration tree as JSON (defaults to the bundled image-set)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Settings TOML (defaults to the bundled settings)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Global random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to run
    #[arg(long, default_value_t = 2_000)]
    ticks: u64,

    /// Screen width in pixels
    #[arg(long, default_value_t = 1920)]
    width: i32,

    /// Screen height in pixels
    #[arg(long, default_value_t = 1080)]
    height: i32,
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct StrollLog {
    installs: BTreeMap<String, usize>,
    errors:   usize,
    ticks:    u64,
    last:     Option<String>,
}

impl EngineObserver for StrollLog {
    fn on_behavior(&mut self, mascot: &Mascot, behavior: &str) {
        *self.installs.entry(behavior.to_owned()).or_default() += 1;
        if self.last.as_deref() != Some(behavior) {
            println!("[{:>5}] {} → {behavior} at {}", self.ticks, mascot.id, mascot.anchor);
        }
        self.last = Some(behavior.to_owned());
    }

    fn on_tick(&mut self, _mascot: &Mascot) {
        self.ticks += 1;
    }

    fn on_error(&mut self, mascot: &Mascot, error: &EngineError) {
        self.errors += 1;
        eprintln!("[{:>5}] {}: {error}", self.ticks, mascot.id);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("=== stroll — mascot behavior engine ===");
    println!("Ticks: {}  |  Seed: {}  |  Screen: {}x{}", args.ticks, args.seed, args.width, args.height);
    println!();

    // 1. Settings.
    let settings = match &args.settings {
        Some(path) => Settings::load(path).with_context(|| format!("reading {}", path.display()))?,
        None => Settings::from_toml_str(SETTINGS_TOML)?,
    };

    // 2. Configuration tree → registry.
    let text = match &args.config {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => CONFIG_JSON.to_owned(),
    };
    let tree: Entry = serde_json::from_str(&text).context("parsing configuration tree")?;
    let mut registry = Registry::new();
    registry.load(IMAGE_SET, Schema::english(), &[tree])?;

    let config = registry.config(IMAGE_SET)?;
    let menu: Vec<&str> = config.menu_behavior_names().collect();
    println!("Behaviors: {}", menu.join(", "));

    // 3. Desktop with one window resting in the middle.
    let window = Area::new(args.width / 4, args.height / 3, args.width * 3 / 4, args.height * 2 / 3);
    let mut env = StaticEnvironment::single_screen(args.width, args.height).with_window(window, "Notes");

    // 4. Driver, dropped in from above.
    let mut driver = DriverBuilder::new(MascotId(1), IMAGE_SET)
        .settings(settings)
        .seed(args.seed)
        .build(&registry, &env)?;

    // 5. Run.
    let mut log = StrollLog::default();
    let started = Instant::now();
    driver.start(&registry, &mut env, &mut log)?;
    for _ in 0..args.ticks {
        driver.tick(&registry, &mut env, &mut log)?;
    }
    let elapsed = started.elapsed();

    println!();
    println!("Ran {} ticks in {:.2?}  ({} errors)", driver.ticks(), elapsed, log.errors);
    println!("Final anchor {}  |  window at {}", driver.mascot().anchor, env.active_window.area.top_left());
    for (behavior, count) in &log.installs {
        println!("  {behavior:<12} {count:>5}");
    }
    Ok(())
}
