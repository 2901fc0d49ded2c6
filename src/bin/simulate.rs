//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations of the autopilot to analyze game balance.
//!
//! Examples:
//!   cargo run --bin simulate                       # 200 runs to stage 10
//!   cargo run --bin simulate -- -n 50 -t 6         # 50 runs to stage 6
//!   cargo run --bin simulate -- --seed 42 --json   # Reproducible, JSON saved
//!   cargo run --bin simulate -- --party hero       # Solo hero

use clap::Parser;
use stagequest::character::PlayerClass;
use stagequest::simulator::{run_simulation, SimConfig};
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(version)]
#[command(about = "Monte Carlo balance simulator for the party battler", long_about = None)]
struct Args {
    /// Number of simulation runs
    #[arg(short = 'n', long, default_value = "200")]
    runs: u32,

    /// Stage a run has to reach to count as completed
    #[arg(short, long, default_value = "10")]
    target: u32,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Max party actions per run
    #[arg(long, default_value = "20000")]
    max_turns: u64,

    /// Party classes in turn order, comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "hero,sage")]
    party: Vec<PlayerClass>,

    /// Never buy from the shop
    #[arg(long)]
    no_shop: bool,

    /// Print one line per run
    #[arg(short, long)]
    verbose: bool,

    /// Save the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            num_runs: self.runs,
            seed: self.seed,
            max_turns_per_run: self.max_turns,
            target_stage: self.target,
            party: self.party.clone(),
            use_shop: !self.no_shop,
            verbosity: if self.verbose { 2 } else { 1 },
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Engine warnings only; per-action debug output would drown the report.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    let config = args.sim_config();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              STAGEQUEST BALANCE SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Target Stage:   {}", config.target_stage);
    println!(
        "  Party:          {}",
        config
            .party
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Shop:           {}", config.use_shop);
    println!("  Max Turns:      {}", config.max_turns_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.json {
        let json = report.to_json().map_err(io::Error::other)?;
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json)?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}
