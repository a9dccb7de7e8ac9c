//! Dash Runner headless demo
//!
//! Drives one autopilot run on a manual clock at 60 fps and prints the
//! result. Usage: `dash-runner [--difficulty easy|normal|hard|extreme] [--seed N]`

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use dash_runner::BestRecords;
#[cfg(not(target_arch = "wasm32"))]
use dash_runner::sim::{Difficulty, ManualClock, RunController, RunEvent, RunPhase, TickInput, random};
#[cfg(not(target_arch = "wasm32"))]
use dash_runner::tuning::Tuning;

#[cfg(not(target_arch = "wasm32"))]
const FRAME_SECS: f32 = 1.0 / 60.0;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "dash-runner", version, about = "Headless autopilot run of the Dash Runner core")]
struct Cli {
    /// Difficulty tier (easy, normal, hard, extreme; "hod" is an alias for extreme)
    #[arg(long, short, default_value = "normal", value_parser = parse_difficulty)]
    difficulty: Difficulty,
    /// RNG seed; random when omitted
    #[arg(long, short)]
    seed: Option<u64>,
    /// Stop after this many seconds of run time even if the autopilot survives
    #[arg(long, default_value_t = 120.0)]
    limit_secs: f32,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_difficulty(name: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(name).ok_or_else(|| {
        format!("unknown difficulty '{name}' (expected easy, normal, hard or extreme)")
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let difficulty = cli.difficulty;
    let seed = cli.seed.unwrap_or_else(rand::random);

    log::info!("Dash Runner (headless) starting, seed={}", seed);

    let mut run = RunController::with_sources(Tuning::default(), random::seeded(seed), ManualClock::new());
    if let Err(e) = run.start(difficulty, "demo") {
        log::error!("{}", e);
        return;
    }

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut smashed = 0;
    let mut collected = 0;
    while run.phase() == RunPhase::Active && run.state().elapsed_secs < cli.limit_secs {
        run.clock_mut().advance(FRAME_SECS as f64);
        if let Err(e) = run.tick(FRAME_SECS, &input) {
            log::error!("{}", e);
            break;
        }
        for event in run.drain_events() {
            match event {
                RunEvent::ObstacleSmashed { .. } => smashed += 1,
                RunEvent::PowerUpCollected { .. } => collected += 1,
                _ => {}
            }
        }
    }

    let snapshot = run.snapshot();
    let mut records = BestRecords::new();
    if let Some(summary) = run.summary() {
        records.submit(summary);
    }

    println!("difficulty: {}", difficulty.as_str());
    println!("seed:       {}", seed);
    println!("outcome:    {:?}", snapshot.phase);
    println!("score:      {}", snapshot.display_score);
    println!("time:       {:.1}s", snapshot.elapsed_secs);
    println!("smashed:    {}", smashed);
    println!("power-ups:  {}", collected);
    if let Ok(json) = records.to_json() {
        println!("records:    {}", json);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host page on wasm; there is no demo driver
}
