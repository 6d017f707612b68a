use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use engine::api::{
    load_catalog, load_config, prepare_matchup, simulate_duel, DuelConfig, MatchConfig,
};
use engine::orchestrator::{run_match, FnChooser, RandomChooser};
use engine::{Action, Dice, Duel};
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Cmd {
    /// Fight a random bot with the creature of your choice
    Play {
        /// Creature name or catalog id
        name: String,
        /// RNG seed for determinism (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Delay between narrated steps, in milliseconds
        #[arg(long)]
        pace_ms: Option<u64>,
        /// Starting (and maximum) HP for both sides
        #[arg(long)]
        max_hp: Option<u32>,
        /// Catalog JSON file (defaults to the built-in roster)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Match config file (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run one bot-vs-bot match and print its log
    Duel {
        /// Creature for side A
        #[arg(long)]
        a: String,
        /// Creature for side B
        #[arg(long)]
        b: String,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Starting (and maximum) HP for both sides
        #[arg(long)]
        max_hp: Option<u32>,
        /// Catalog JSON file (defaults to the built-in roster)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Emit the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the creatures in the catalog
    Roster {
        /// Catalog JSON file (defaults to the built-in roster)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "duelsim")]
#[command(about = "Turn-based creature duels in the terminal")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn prompt_action(offered: &[Action]) -> anyhow::Result<Action> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        println!("Choose an attack:");
        for (i, a) in offered.iter().enumerate() {
            println!("  {}) {} (power {}, accuracy {}%)", i + 1, a.name, a.power, a.accuracy);
        }
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("input closed before an attack was chosen");
        }
        let choice = line.trim();
        let by_index = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| offered.get(i));
        let by_name = offered.iter().find(|a| a.name.eq_ignore_ascii_case(choice));
        if let Some(action) = by_index.or(by_name) {
            return Ok(action.clone());
        }
        println!("'{}' is not one of the options.", choice);
    }
}

fn play(
    name: &str,
    seed: Option<u64>,
    pace_ms: Option<u64>,
    max_hp: Option<u32>,
    catalog: Option<&Path>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let mut cfg = match config {
        Some(path) => load_config(path)?,
        None => MatchConfig::default(),
    };
    if let Some(ms) = pace_ms {
        cfg.pace_ms = ms;
    }
    if let Some(hp) = max_hp {
        cfg.max_hp = hp;
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    tracing::info!(seed, "starting match");

    let catalog = load_catalog(catalog)?;
    let mut dice = Dice::from_seed(seed);
    let matchup = prepare_matchup(&catalog, name, &cfg, &mut dice).context("setup failed")?;

    println!("You chose {}.", matchup.player.name);
    println!("Your opponent is {}.", matchup.bot.name);
    println!();

    let mut duel = Duel::new(matchup.player, matchup.bot, cfg.max_hp)?;
    run_match(
        &mut duel,
        &mut FnChooser(prompt_action),
        &mut RandomChooser,
        &mut dice,
        cfg.pacing(),
        |event| {
            if let Some(line) = event.narrate() {
                println!("{}", line);
            }
        },
    )?;
    println!("(seed {})", seed);
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Play {
            name,
            seed,
            pace_ms,
            max_hp,
            catalog,
            config,
        } => {
            play(
                &name,
                seed,
                pace_ms,
                max_hp,
                catalog.as_deref(),
                config.as_deref(),
            )?;
        }
        Cmd::Duel {
            a,
            b,
            seed,
            max_hp,
            catalog,
            json,
        } => {
            let report = simulate_duel(DuelConfig {
                a,
                b,
                catalog_path: catalog.map(|p| p.to_string_lossy().into_owned()),
                seed,
                max_hp,
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in &report.log {
                    println!("{}", line);
                }
                println!(
                    "winner={:?} turns={} {}_hp={} {}_hp={}",
                    report.result, report.turns, report.a, report.a_hp_end, report.b, report.b_hp_end
                );
            }
        }
        Cmd::Roster { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            for species in &catalog.species {
                println!(
                    "#{:<4} {:<12} {} usable moves",
                    species.id,
                    species.name,
                    catalog.usable_moves(species).len()
                );
            }
        }
    }
    Ok(())
}
