use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::{debug, info, warn};

use statscout::display::DisplayRangeInclusive;
use statscout::odds::display_american;
use statscout::parlay::{build_parlays, GameFilter, GameFilterMode, ParlayRequest, Proposal, SafetyLevel};
use statscout::print::{tabulate_legs, tabulate_suggestions};
use statscout::prop::GameId;
use statscout::scorer::ScorerConfig;
use statscout::slate::Slate;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the slate from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// target combined American odds
    #[clap(short = 't', long, default_value = "400", allow_hyphen_values = true)]
    target: i32,

    /// safety level: conservative, moderate or aggressive
    #[clap(short = 's', long, default_value = "moderate")]
    safety: String,

    /// game filter: any, single or specific
    #[clap(short = 'g', long, default_value = "any")]
    game_filter: String,

    /// comma-separated games for the specific filter, e.g. LAL_vs_GSW,BOS_vs_MIA
    #[clap(long, value_delimiter = ',')]
    games: Vec<String>,

    /// number of suggestions
    #[clap(short = 'n', long, default_value = "1")]
    num: usize,

    #[clap(long, default_value = "2")]
    min_legs: usize,

    #[clap(long, default_value = "6")]
    max_legs: usize,

    /// seed for the random selection; derived from the clock if omitted
    #[clap(long)]
    seed: Option<u64>,

    /// print JSON rather than tables
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.min_legs > self.max_legs {
            bail!("--min-legs cannot exceed --max-legs");
        }
        if self.num == 0 {
            bail!("at least one suggestion must be requested");
        }
        if !self.games.is_empty() && self.game_filter.to_lowercase() != "specific" {
            bail!("--games requires the specific game filter");
        }
        Ok(())
    }

    fn request(&self) -> anyhow::Result<ParlayRequest> {
        let safety_level: SafetyLevel = self.safety.parse()?;
        let mode: GameFilterMode = self.game_filter.parse()?;
        let games = self.games.iter().map(|game| GameId::from(game.as_str())).collect();
        Ok(ParlayRequest {
            target_odds: self.target,
            safety_level,
            game_filter: GameFilter::new(mode, games),
            num_suggestions: self.num,
            min_legs: self.min_legs,
            max_legs: self.max_legs,
            ..ParlayRequest::default()
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");
    let request = args.request()?;

    let slate = Slate::read_json_file(&args.file)?;
    let scored = slate.score(ScorerConfig::default())?;

    let seed = match args.seed {
        Some(seed) => seed,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
    };
    debug!("seed: {seed}");
    let mut rand = StdRand::seed(seed);
    let proposal = build_parlays(&scored, &request, &mut rand)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&proposal)?);
        return Ok(());
    }

    match &proposal {
        Proposal::Suggestions(suggestions) => {
            info!(
                "{} suggestions targeting {} with {} legs at {} safety",
                suggestions.len(),
                display_american(request.target_odds),
                DisplayRangeInclusive::from(&(request.min_legs..=request.max_legs)),
                request.safety_level
            );
            info!("\n{}", Console::default().render(&tabulate_suggestions(suggestions)));
            for (index, suggestion) in suggestions.iter().enumerate() {
                info!(
                    "suggestion {}: {} odds\n{}",
                    index + 1,
                    suggestion.parlay_odds_display,
                    Console::default().render(&tabulate_legs(suggestion))
                );
            }
        }
        _ => {
            warn!("{}", proposal.error().unwrap_or_default());
            info!("{}", proposal.suggestion().unwrap_or_default());
        }
    }
    Ok(())
}
