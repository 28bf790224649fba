//! darts CLI
//!
//! Aim recommendations, checkout listings and simulated 01 games.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use darts_core::{
    checkout, error_source, AimStrategy, BullMode, FinishRule, GameConfig, RoundReport,
    ScoringRules, ZeroOneGame,
};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "darts")]
#[command(about = "Aim recommender and simulator for 01 darts", long_about = None)]
#[command(version)]
struct Cli {
    /// Bull configuration: fat or sepa
    #[arg(long, global = true)]
    bull: Option<BullMode>,

    /// Finish rule: everything, double or master
    #[arg(long = "out", global = true)]
    finish: Option<FinishRule>,

    /// Throwing scatter in millimetres
    #[arg(long, global = true)]
    sigma: Option<f64>,

    /// Seed for reproducible simulations
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// GameConfig JSON file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Simulate a single-player game
    Play {
        /// Starting score (301, 501, ...)
        #[arg(long)]
        start: Option<u32>,

        /// Round limit
        #[arg(long)]
        rounds: Option<u32>,
    },

    /// Recommend aims for the rest of a turn
    Aims {
        /// Score at the start of the turn
        remaining: u32,

        /// Value already hit this turn (repeatable)
        #[arg(long = "hit")]
        hits: Vec<u32>,
    },

    /// List ranked checkout routes for a score
    Checkouts {
        /// Score to check out
        remaining: u32,

        /// Value already hit this turn (repeatable)
        #[arg(long = "hit")]
        hits: Vec<u32>,

        /// Maximum number of routes to print
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct RouteListing {
    values: Vec<u32>,
    preference: f64,
    aims: Vec<String>,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(bull) = cli.bull {
        config.bull_mode = bull;
    }
    if let Some(finish) = cli.finish {
        config.finish_rule = finish;
    }
    if let Some(sigma) = cli.sigma {
        config.sigma = sigma;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Commands::Play { start, rounds } => {
            if let Some(start) = start {
                config.start_score = start;
            }
            if let Some(rounds) = rounds {
                config.max_rounds = rounds;
            }
            run_play(config, cli.json)
        }
        Commands::Aims { remaining, hits } => run_aims(&config, remaining, &hits, cli.json),
        Commands::Checkouts { remaining, hits, limit } => {
            run_checkouts(&config, remaining, &hits, limit, cli.json)
        }
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let default = if verbose { "darts_core=debug" } else { "darts_core=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[cfg(feature = "cli")]
fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(feature = "cli")]
fn run_play(config: GameConfig, json: bool) -> Result<()> {
    let mut source = error_source(&config);
    let mut game = ZeroOneGame::new(config.clone()).context("setting up game")?;

    if !json {
        println!(
            "🎯 {} / {} bull / {} out / sigma {:.1}mm",
            config.start_score, config.bull_mode, config.finish_rule, config.sigma
        );
    }

    let summary = game.play(&mut source).context("simulating game")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for report in &summary.rounds {
        print_round(report);
    }
    if summary.finished {
        println!("\n✅ Finished in {} darts", summary.darts_thrown);
    } else {
        println!("\n❌ Not finished after {} rounds, {} left", summary.rounds.len(), summary.final_score);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_round(report: &RoundReport) {
    let darts: Vec<String> = report
        .throws
        .iter()
        .map(|t| format!("{}→{}", t.aim, t.hit.score))
        .collect();
    println!(
        "R{:>2} {:>3} {:<14} {:<28} {:>3} {:?}",
        report.round,
        report.start_score,
        format!("{:?}", report.state),
        darts.join(" "),
        report.end_score,
        report.outcome
    );
}

#[cfg(feature = "cli")]
fn run_aims(config: &GameConfig, remaining: u32, hits: &[u32], json: bool) -> Result<()> {
    let strategy = AimStrategy::new(config.bull_mode, config.finish_rule, config.sigma)
        .context("building strategy")?;
    let plan = strategy.plan_turn(remaining, hits).context("planning turn")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let aims: Vec<String> = plan.aims.iter().map(|a| a.to_string()).collect();
    println!("State: {:?}", plan.state);
    if let Some(target) = plan.arrange_target {
        println!("Leave: {}", target);
    }
    println!("Aims:  {}", aims.join(" "));
    Ok(())
}

#[cfg(feature = "cli")]
fn run_checkouts(
    config: &GameConfig,
    remaining: u32,
    hits: &[u32],
    limit: usize,
    json: bool,
) -> Result<()> {
    let rules = ScoringRules::new(config.bull_mode, config.finish_rule);
    let outcome = checkout::search(&rules, remaining, hits).context("searching checkouts")?;
    let ranked = checkout::rank(&rules, outcome.combinations);

    let listings = ranked
        .iter()
        .take(limit)
        .map(|combo| -> Result<RouteListing> {
            let aims = checkout::to_aim_targets(&rules, combo)?;
            Ok(RouteListing {
                values: checkout::throw_order(&rules, combo),
                preference: checkout::combination_score(&rules, combo),
                aims: aims.iter().map(|a| a.to_string()).collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!("No checkout for {} ({} out)", remaining, config.finish_rule);
        return Ok(());
    }
    println!("{} route(s) for {}, showing {}", ranked.len(), remaining, listings.len());
    for (i, route) in listings.iter().enumerate() {
        println!("{:>3}. {:<16} ({:.1})", i + 1, route.aims.join(" "), route.preference);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("darts CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
