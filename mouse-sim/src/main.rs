//! MouseSim - headless episode runner for the MouseNav maze solver.
//!
//! Loads (or generates) a `.maze` file, drives the navigation core against
//! the ground-truth walls episode by episode, persists learned weights and
//! the map snapshot on success, and writes the `.soluct`/`.plan` artifacts
//! next to the maze file.

mod config;
mod runner;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use mouse_nav::episode::EpisodeRecorder;
use mouse_nav::io::{generate_maze, load_maze, save_maze, Maze};
use mouse_nav::store::{HostStore, PersistentStore};
use mouse_nav::{EpisodeState, Navigator};

use config::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "mouse-sim", about = "Headless maze-solving episode runner")]
struct Args {
    /// Maze file to solve
    maze: Option<PathBuf>,

    /// Generate a random maze of the given size instead, e.g. 16x12
    #[arg(long, value_name = "WxH", conflicts_with = "maze")]
    generate: Option<String>,

    /// Seed for maze generation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Episodes to run, overriding the configuration
    #[arg(long)]
    episodes: Option<u32>,

    /// Directory for persisted weights and map snapshots
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Wipe persisted state before running
    #[arg(long)]
    reset: bool,
}

fn parse_size(size: &str) -> Result<(usize, usize), String> {
    let (w, h) = size
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WxH, got '{size}'"))?;
    let width = w.parse().map_err(|_| format!("bad width '{w}'"))?;
    let height = h.parse().map_err(|_| format!("bad height '{h}'"))?;
    if width == 0 || height == 0 {
        return Err("maze dimensions must be at least 1x1".into());
    }
    Ok((width, height))
}

/// Generate a maze and save it under `maze/` like the map editor would.
fn generate_and_save(size: &str, seed: Option<u64>) -> Result<(Maze, PathBuf), Box<dyn Error>> {
    let (width, height) = parse_size(size)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let maze = generate_maze(width, height, &mut rng);

    std::fs::create_dir_all("maze")?;
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = Path::new("maze").join(format!("maze_{width}x{height}_{stamp}.maze"));
    save_maze(&path, &maze)?;
    Ok((maze, path))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None if Path::new("mouse-sim.toml").exists() => {
            log::info!("using configuration from mouse-sim.toml");
            SimConfig::load(Path::new("mouse-sim.toml"))?
        }
        None => SimConfig::default(),
    };
    if let Some(episodes) = args.episodes {
        config.episodes = episodes;
    }

    let (maze, maze_path) = match (&args.maze, &args.generate) {
        (Some(path), _) => (load_maze(path)?, path.clone()),
        (None, Some(size)) => generate_and_save(size, args.seed)?,
        (None, None) => {
            return Err("give a maze file or --generate WxH".into());
        }
    };
    let width = maze.grid.width();
    let height = maze.grid.height();
    log::info!(
        "maze {}x{}: entrance ({},{}) goal ({},{})",
        width,
        height,
        maze.entrance.x,
        maze.entrance.y,
        maze.goal.x,
        maze.goal.y
    );

    let data_dir = args
        .data_dir
        .or_else(|| config.data_dir.as_ref().map(PathBuf::from));
    let mut store = match data_dir {
        Some(dir) => HostStore::new(dir),
        None => HostStore::from_env(),
    };
    if args.reset {
        if store.erase_all() {
            log::info!("persisted state wiped");
        } else {
            log::warn!("failed to wipe persisted state");
        }
    }

    let mut nav = Navigator::new();
    nav.set_dimensions(width, height);
    nav.set_start_goal(maze.entrance, maze.goal);

    // Boot like the firmware: learned weights and map snapshot, when a
    // valid matching record exists.
    match store.load_weights() {
        Some(weights) => {
            log::info!(
                "loaded weights r={:.2} f={:.2} l={:.2} b={:.2}",
                weights.right,
                weights.front,
                weights.left,
                weights.back
            );
            nav.set_heuristics(weights);
        }
        None => log::info!("no persisted weights, starting from defaults"),
    }
    if store.load_map(nav.map_mut()) {
        log::info!("loaded map snapshot");
    }

    let mut recorder = EpisodeRecorder::new();
    for episode in 1..=config.episodes {
        let outcome = runner::run_episode(&maze, &mut nav, &mut recorder, &config);
        match outcome.state {
            EpisodeState::Succeeded => log::info!(
                "episode {episode}: reached goal in {} steps, collisions={}, time={:.2}s, cost={}",
                outcome.steps,
                outcome.collisions,
                outcome.time_s,
                outcome.cost()
            ),
            _ => log::warn!(
                "episode {episode}: gave up after {} steps (budget exhausted)",
                outcome.steps
            ),
        }
        runner::finish_episode(&maze, &maze_path, &nav, &recorder, &outcome, &mut store)?;
        nav.reset_episode();
    }

    let status = store.status();
    log::info!(
        "store: weights_present={} profile={}",
        status.weights_present,
        status.active_profile
    );
    Ok(())
}
