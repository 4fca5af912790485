use std::path::PathBuf;

use battle_engine::api::{simulate_battle, ProviderKind};
use battle_engine::Outcome;
use clap::Parser;

#[path = "../text.rs"]
mod text;

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many offline matches between random deciders")]
struct Args {
    /// Optional battle config for fighter stats (providers are forced to random)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of matches
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on rounds per match
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// RNG base seed (match i uses seed+2i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.trials == 0 {
        anyhow::bail!("--trials must be at least 1");
    }

    let mut cfg = text::load_config(args.config.as_deref())?;
    for fighter in cfg.fighters.iter_mut() {
        fighter.provider = ProviderKind::Random;
    }
    cfg.max_rounds = Some(args.max_rounds);
    let names = [cfg.fighters[0].name.clone(), cfg.fighters[1].name.clone()];

    let mut wins = [0u32; 2];
    let mut stalemates = 0u32;
    let mut rounds_vec: Vec<u32> = Vec::with_capacity(args.trials as usize);

    for i in 0..args.trials {
        // each fighter takes seed and seed+1, so step by two
        cfg.seed = Some(args.seed.wrapping_add(2 * i as u64));
        let res = simulate_battle(&cfg, |_, _| {})?;
        match res.outcome {
            Outcome::Victory { winner } => {
                let idx = if winner == names[0] { 0 } else { 1 };
                wins[idx] += 1;
                rounds_vec.push(res.rounds);
            }
            Outcome::Stalemate => stalemates += 1,
        }
    }

    rounds_vec.sort_unstable();
    let trials_f = args.trials as f64;
    let decided = rounds_vec.len();
    let avg_rounds = if decided == 0 {
        0.0
    } else {
        rounds_vec.iter().map(|&r| r as u64).sum::<u64>() as f64 / decided as f64
    };
    let median_rounds = if decided == 0 {
        0
    } else {
        let m = decided / 2;
        if decided % 2 == 1 {
            rounds_vec[m]
        } else {
            (rounds_vec[m - 1] + rounds_vec[m]) / 2
        }
    };

    println!("simulate-many results");
    println!("---------------------");
    println!("trials:             {}", args.trials);
    println!("round cap:          {}", args.max_rounds);
    println!();
    for (name, w) in names.iter().zip(wins) {
        println!("{:<20}{:.1}% wins", format!("{}:", name), w as f64 / trials_f * 100.0);
    }
    println!("stalemates:         {:.1}%", stalemates as f64 / trials_f * 100.0);
    println!("avg rounds (wins):  {:.2}", avg_rounds);
    println!("median rounds:      {}", median_rounds);

    Ok(())
}
