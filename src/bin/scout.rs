use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use statscout::print::{tabulate_factors, tabulate_scored};
use statscout::scorer::ScorerConfig;
use statscout::slate::Slate;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the slate from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// only show props with at least this trust score
    #[clap(short = 'm', long)]
    min_trust: Option<f64>,

    /// also print the individual factor scores
    #[clap(long)]
    factors: bool,

    /// print JSON rather than tables
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(min_trust) = self.min_trust {
            if !(0.0..=100.0).contains(&min_trust) {
                bail!("min trust must lie between 0 and 100");
            }
        }
        Ok(())
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

    let slate = Slate::read_json_file(&args.file)?;
    let start_time = Instant::now();
    let mut scored = slate.score(ScorerConfig::default())?;
    debug!(
        "scored {} props in {:?}",
        scored.len(),
        start_time.elapsed()
    );

    if let Some(min_trust) = args.min_trust {
        scored.retain(|prop| prop.trust_score >= min_trust);
    }
    scored.sort_by(|a, b| b.trust_score.total_cmp(&a.trust_score));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scored)?);
        return Ok(());
    }

    info!("\n{}", Console::default().render(&tabulate_scored(&scored)));
    if args.factors {
        info!("\n{}", Console::default().render(&tabulate_factors(&scored)));
    }
    for prop in scored.iter().filter(|prop| prop.streak.is_active()) {
        info!(
            "{} {}: {} straight {} {}",
            prop.player_name,
            prop.stat_type,
            prop.streak.length,
            prop.streak.side.map(|side| side.to_string()).unwrap_or_default(),
            prop.line
        );
    }
    for prop in &scored {
        if let Some(message) = prop.location.as_ref().and_then(|location| location.message.as_ref()) {
            info!("{} {}: {message}", prop.player_name, prop.stat_type);
        }
        if let Some(flag) = prop.rest.flag {
            info!("{} {}: {flag}", prop.player_name, prop.stat_type);
        }
    }
    Ok(())
}
