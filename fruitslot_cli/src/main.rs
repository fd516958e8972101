use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use fruitslot_core::{
    derive_hash_hex, BalanceStore, CreditLedger, EngineConfig, EngineError, Grid, LedgerError,
    ProvablyFairRng, RandSource, SlotEngine,
};
use fruitslot_shared::{SimulationReport, SpinLogEntry, SpinReport};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fruitslot-cli", about = "Operator CLI for the fruit slot engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// JSON engine config; defaults to the classic five-symbol machine
    #[arg(long, global = true, env = "FRUITSLOT_CONFIG")]
    config: Option<PathBuf>,
    /// Override the alphabet from the config
    #[arg(long, global = true, value_enum)]
    variant: Option<Variant>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    Classic,
    Extended,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session until the spins run out or the balance cannot cover one
    Play {
        #[arg(long, default_value_t = 100)]
        credits: u64,
        #[arg(long, default_value_t = 10)]
        spins: u64,
        /// Reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// One JSON report per line instead of text
        #[arg(long)]
        json: bool,
    },
    /// Estimate return-to-player and hit rates
    Simulate {
        #[arg(long, default_value_t = 100_000)]
        spins: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check a grid against provably-fair seeds
    Verify {
        #[arg(long, env = "FRUITSLOT_SERVER_SEED")]
        server_seed: String,
        #[arg(long)]
        client_seed: String,
        #[arg(long)]
        nonce: u64,
        /// Rows top to bottom separated by '/'
        #[arg(long)]
        grid: String,
    },
    /// Print the SHA-256 commitment of a server seed
    SeedHash { server_seed: String },
    /// Play provably-fair spins and export the log to CSV path
    ExportCsv {
        path: PathBuf,
        #[arg(long, env = "FRUITSLOT_SERVER_SEED")]
        server_seed: String,
        #[arg(long, default_value = "player")]
        client_seed: String,
        #[arg(long, default_value_t = 100)]
        credits: u64,
        #[arg(long, default_value_t = 100)]
        spins: u64,
    },
}

fn load_engine(path: Option<PathBuf>, variant: Option<Variant>) -> anyhow::Result<SlotEngine> {
    let mut config = match path {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    match variant {
        Some(Variant::Classic) => config.alphabet = EngineConfig::default().alphabet,
        Some(Variant::Extended) => config.alphabet = EngineConfig::extended().alphabet,
        None => {}
    }
    Ok(SlotEngine::new(config)?)
}

fn rand_source(seed: Option<u64>) -> RandSource<rand::rngs::StdRng> {
    match seed {
        Some(seed) => RandSource::seeded(seed),
        None => RandSource::from_entropy(),
    }
}

fn play(
    engine: &SlotEngine,
    credits: u64,
    spins: u64,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let ledger = CreditLedger::new();
    let user = "cli";
    ledger.open_account(user, credits);
    let mut rng = rand_source(seed);

    for n in 1..=spins {
        let outcome = match ledger.spin(user, engine, &mut rng) {
            Ok(outcome) => outcome,
            Err(LedgerError::Engine(EngineError::InsufficientBalance { balance, cost })) => {
                warn!(balance, cost, "out of credits");
                break;
            }
            Err(e) => return Err(e.into()),
        };
        if json {
            println!("{}", serde_json::to_string(&SpinReport::from(&outcome))?);
            continue;
        }
        print!("spin #{n}\n{}", outcome.grid);
        match (outcome.result.line, outcome.result.matched_symbol) {
            (Some(line), Some(symbol)) => println!(
                "WIN on {line} with {symbol}{} (+{})",
                if outcome.result.is_wildcard_win { " + joker" } else { "" },
                outcome.payout
            ),
            _ => println!("no win"),
        }
        println!("credits: {}\n", outcome.balance);
    }
    info!(balance = ledger.read(user)?, "session over");
    Ok(())
}

fn simulate(engine: &SlotEngine, spins: u64, seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = rand_source(seed);
    let cost = engine.config().spin_cost;
    let mut report = SimulationReport::default();
    for _ in 0..spins {
        // fixed stake, so the balance never runs out
        let outcome = engine.spin(cost, &mut rng)?;
        report.record(&outcome);
    }
    println!("spins:          {}", report.spins);
    println!("rtp:            {:.4}", report.rtp());
    println!("hit rate:       {:.4}", report.hit_rate());
    println!("wildcard wins:  {}", report.wildcard_wins);
    println!("multi-line:     {}", report.multi_line_grids);
    println!("joker freq:     {:.4}", report.joker_frequency());
    for (line, hits) in &report.line_hits {
        println!("  {line:<14}{hits}");
    }
    Ok(())
}

fn export_csv(
    engine: &SlotEngine,
    path: &PathBuf,
    server_seed: &str,
    client_seed: &str,
    credits: u64,
    spins: u64,
) -> anyhow::Result<()> {
    let server_seed_hash = derive_hash_hex(server_seed.as_bytes());
    let mut wtr = csv::Writer::from_path(path)?;
    let mut balance = credits;
    let mut rows = 0u64;
    for nonce in 1..=spins {
        let mut rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
        let outcome = match engine.spin(balance, &mut rng) {
            Ok(outcome) => outcome,
            Err(EngineError::InsufficientBalance { .. }) => break,
            Err(e) => return Err(e.into()),
        };
        balance = outcome.balance;
        wtr.serialize(SpinLogEntry {
            id: nonce,
            ts: Utc::now(),
            client_seed: client_seed.to_string(),
            nonce,
            server_seed_hash: server_seed_hash.clone(),
            grid: outcome.grid.to_glyphs(),
            line: outcome.result.line,
            balance,
        })?;
        rows += 1;
    }
    wtr.flush()?;
    println!("Exported {} rows to {}", rows, path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let engine = load_engine(cli.config, cli.variant)?;

    match cli.command {
        Commands::Play {
            credits,
            spins,
            seed,
            json,
        } => play(&engine, credits, spins, seed, json)?,
        Commands::Simulate { spins, seed } => simulate(&engine, spins, seed)?,
        Commands::Verify {
            server_seed,
            client_seed,
            nonce,
            grid,
        } => {
            let expected = Grid::parse_glyphs(&grid)?;
            if !engine.verify_grid(&server_seed, &client_seed, nonce, &expected) {
                let actual = engine.grid_for_seeds(&server_seed, &client_seed, nonce);
                bail!("grid mismatch, seeds produce {}", actual.to_glyphs());
            }
            println!(
                "OK: grid matches seed hash {}",
                derive_hash_hex(server_seed.as_bytes())
            );
        }
        Commands::SeedHash { server_seed } => {
            println!("{}", derive_hash_hex(server_seed.as_bytes()));
        }
        Commands::ExportCsv {
            path,
            server_seed,
            client_seed,
            credits,
            spins,
        } => export_csv(&engine, &path, &server_seed, &client_seed, credits, spins)?,
    }

    Ok(())
}
