use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rs_poker_ledger::config::LedgerConfig;
use rs_poker_ledger::hand_history::{HandParser, ParsedHand};
use rs_poker_ledger::ingest::{ingest_paths, IngestResult};
use rs_poker_ledger::stats::{PlayerSummary, SequenceCounts};
use rs_poker_ledger::store::{HandStore, InMemoryHandStore, JsonLinesHandStore};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "ledger",
    about = "Import PokerStars hand histories and report player statistics"
)]
struct Args {
    /// Hero's username as it appears in the hand histories
    #[arg(long)]
    hero: String,

    /// Session files or directories of .txt session files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON Lines file to keep hands in across runs
    #[arg(long = "store", env = "LEDGER_STORE_PATH")]
    store_path: Option<PathBuf>,

    /// Also report on every opponent with at least this many hands
    #[arg(long = "opponents-min-hands")]
    opponents_min_hands: Option<usize>,

    /// Increase logging verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

impl From<&Args> for LedgerConfig {
    fn from(args: &Args) -> Self {
        Self {
            hero: args.hero.clone(),
            inputs: args.inputs.clone(),
            store_path: args.store_path.clone(),
        }
    }
}

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbosity);

    let config = LedgerConfig::from(&args);
    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&config, args.opponents_min_hands) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    config: &LedgerConfig,
    opponents_min_hands: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = HandParser::new(config.hero.as_str());
    let mut store: Box<dyn HandStore> = match &config.store_path {
        Some(path) => Box::new(JsonLinesHandStore::open(path)?),
        None => Box::new(InMemoryHandStore::new()),
    };

    let results = ingest_paths(&parser, store.as_mut(), &config.inputs)?;
    for result in &results {
        print_file_result(result);
    }

    let hands = store.hands();
    println!();
    println!("{} hands stored", hands.len());
    print_player(&PlayerSummary::from_hands(config.hero.as_str(), hands.iter().copied()));

    let counts = SequenceCounts::from_hands(&store.hand_actions());
    println!(
        "  3-bet {:.1}% ({}/{})  c-bet {:.1}% ({}/{})  AF {:.2}",
        counts.three_bet_pct() * 100.0,
        counts.three_bets,
        counts.three_bet_opportunities,
        counts.cbet_pct() * 100.0,
        counts.cbets,
        counts.cbet_opportunities,
        counts.aggression_factor(),
    );

    if let Some(min_hands) = opponents_min_hands {
        for opponent in opponents(&hands, &config.hero) {
            let summary = PlayerSummary::from_hands(opponent, hands.iter().copied());
            if summary.hands >= min_hands {
                print_player(&summary);
            }
        }
    }
    Ok(())
}

fn print_file_result(result: &IngestResult) {
    println!(
        "{}: {} ingested, {} skipped, {} failed",
        result.source, result.ingested, result.skipped, result.failed
    );
    for failure in &result.failures {
        println!("  hand {}: {}", failure.block, failure.message);
    }
    if let Some(session) = &result.session {
        println!(
            "  {} {} {}/{} from {} to {}, buy-in {} cash-out {} net {}",
            session.meta.table_name,
            session.meta.currency,
            session.meta.small_blind,
            session.meta.big_blind,
            session.started_at,
            session.ended_at,
            session.buy_in,
            session.cash_out,
            session.net(),
        );
    }
}

fn print_player(summary: &PlayerSummary) {
    let archetype = summary
        .archetype()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{} ({} hands, {}): VPIP {:.1}% PFR {:.1}% WTSD {:.1}% {:+.2} bb/100 profit {} [{}]",
        summary.username,
        summary.hands,
        summary.confidence(),
        summary.vpip_pct() * 100.0,
        summary.pfr_pct() * 100.0,
        summary.wtsd_pct() * 100.0,
        summary.bb_per_100(),
        summary.total_profit,
        archetype,
    );
}

fn opponents<'a>(hands: &[&'a ParsedHand], hero: &str) -> BTreeSet<&'a str> {
    hands
        .iter()
        .copied()
        .flat_map(|hand| hand.players.iter())
        .map(|p| p.username.as_str())
        .filter(|name| *name != hero)
        .collect()
}
