use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use battle_engine::api::{simulate_battle, BattleConfig, ProviderKind};
use battle_engine::{build_prompt, present, BattleEvent, Character};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod text;

#[derive(Copy, Clone, ValueEnum)]
enum Source {
    Titan,
    Jurassic,
    Random,
}

impl From<Source> for ProviderKind {
    fn from(s: Source) -> Self {
        match s {
            Source::Titan => ProviderKind::Titan,
            Source::Jurassic => ProviderKind::Jurassic,
            Source::Random => ProviderKind::Random,
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Play one match with live output
    Battle {
        /// YAML or JSON battle config (defaults to AmazonTitan vs Jurassic)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Decision source for the first fighter
        #[arg(long, value_enum)]
        a: Option<Source>,
        /// Decision source for the second fighter
        #[arg(long, value_enum)]
        b: Option<Source>,
        /// RNG seed for the fallback choices
        #[arg(long)]
        seed: Option<u64>,
        /// Declare a stalemate after this many rounds
        #[arg(long)]
        max_rounds: Option<u32>,
        /// Print the final result as JSON instead of the live view
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Do not show the introduction or wait for Enter
        #[arg(long, default_value_t = false)]
        skip_intro: bool,
    },
    /// Print the opening prompt for one fighter
    Prompt {
        #[arg(long)]
        config: Option<PathBuf>,
        /// Turn index: 0 for the first fighter, 1 for the second
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
        turn: u8,
    },
    /// Print the default battle config
    ConfigDump {
        /// JSON instead of YAML
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Parser)]
#[command(name = "llm-battle")]
#[command(about = "Two language models fight it out, one move at a time")]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Cmd::Battle {
            config,
            a,
            b,
            seed,
            max_rounds,
            json,
            skip_intro,
        } => {
            let mut cfg = text::load_config(config.as_deref())?;
            if let Some(a) = a {
                cfg.fighters[0].provider = a.into();
            }
            if let Some(b) = b {
                cfg.fighters[1].provider = b.into();
            }
            if seed.is_some() {
                cfg.seed = seed;
            }
            if max_rounds.is_some() {
                cfg.max_rounds = max_rounds;
            }

            tracing::debug!(
                first = %cfg.fighters[0].name,
                second = %cfg.fighters[1].name,
                seed = ?cfg.seed,
                max_rounds = ?cfg.max_rounds,
                "starting battle"
            );

            if json {
                let res = simulate_battle(&cfg, |_, _| {})?;
                println!("{}", serde_json::to_string_pretty(&res)?);
                return Ok(());
            }

            if !skip_intro {
                intro(&cfg)?;
            }
            simulate_battle(&cfg, render_event)?;
        }
        Cmd::Prompt { config, turn } => {
            let cfg = text::load_config(config.as_deref())?;
            let [first, second] = cfg.characters();
            let (me, opponent) = if turn == 0 {
                (first, second)
            } else {
                (second, first)
            };
            println!("{}", build_prompt(&me, &opponent, &[], usize::from(turn)));
        }
        Cmd::ConfigDump { json } => {
            let cfg = BattleConfig::default();
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                print!("{}", serde_yaml::to_string(&cfg)?);
            }
        }
    }
    Ok(())
}

fn intro(cfg: &BattleConfig) -> anyhow::Result<()> {
    print!("{}", present::introduction(&cfg.characters()));
    print!("\n{}", present::press_enter());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn render_event(event: &BattleEvent, fighters: &[Character; 2]) {
    match event {
        BattleEvent::RoundStarted { round } => println!("{}", present::round_banner(*round)),
        BattleEvent::TurnStarted { actor, .. } => {
            println!("{}", present::turn_banner(&fighters[*actor].name));
            print!("{}\n\n", present::stats_table(fighters));
        }
        BattleEvent::StrategyChosen { actor, strategy, .. } => {
            println!("{}", present::choice_line(&fighters[*actor].name, *strategy));
        }
        BattleEvent::RoundFinished { .. } => print!("{}\n\n", present::stats_table(fighters)),
        BattleEvent::Victory { winner, .. } => {
            println!("{}", present::victory_line(&fighters[*winner].name));
        }
        BattleEvent::Stalemate { rounds } => println!("{}", present::stalemate_line(*rounds)),
    }
}
