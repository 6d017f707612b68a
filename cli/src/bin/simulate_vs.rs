use clap::Parser;
use engine::api::{simulate_duel_many, DuelConfig, DEFAULT_MAX_HP};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: many bot-vs-bot fights between two creatures")]
struct Args {
    /// Creature for side A (name or id)
    #[arg(long)]
    a: String,

    /// Creature for side B (name or id)
    #[arg(long)]
    b: String,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Starting (and maximum) HP for both sides
    #[arg(long, default_value_t = DEFAULT_MAX_HP)]
    max_hp: u32,

    /// Optional catalog JSON (falls back to the built-in roster)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    a: &'a str,
    b: &'a str,
    trials: u32,
    a_win_rate: f64,
    b_win_rate: f64,
    draw_rate: f64,
    avg_turns: f64,
}

fn rate(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let stats = simulate_duel_many(
        DuelConfig {
            a: args.a.clone(),
            b: args.b.clone(),
            catalog_path: args
                .catalog
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            seed: args.seed,
            max_hp: Some(args.max_hp),
        },
        args.trials,
    )?;

    let summary = Summary {
        a: &args.a,
        b: &args.b,
        trials: stats.samples,
        a_win_rate: rate(stats.a_wins, stats.samples),
        b_win_rate: rate(stats.b_wins, stats.samples),
        draw_rate: rate(stats.draws, stats.samples),
        avg_turns: stats.avg_turns,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("simulate-vs results");
    println!("-------------------");
    println!("trials:             {}", summary.trials);
    println!("matchup:            {} vs {}", summary.a, summary.b);
    println!("max hp:             {}", args.max_hp);
    println!();
    println!("{} win rate: {:.1}%", summary.a, summary.a_win_rate * 100.0);
    println!("{} win rate: {:.1}%", summary.b, summary.b_win_rate * 100.0);
    println!("draw rate:          {:.1}%", summary.draw_rate * 100.0);
    println!("avg turns:          {:.2}", summary.avg_turns);

    Ok(())
}
