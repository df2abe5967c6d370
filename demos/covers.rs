//! Checks whether a list of range literals covers a target range.
//!
//! ```bash
//! cargo run --example covers -- --type daterange --target '[2024-01-01,2024-03-01)' \
//!     '[2024-01-01,2024-01-31]' '[2024-02-01,2024-02-29]'
//! ```

use clap::Parser;
use color_eyre::eyre::{bail, WrapErr};
use log::info;

use coverage_rs::aggregate::CoversWithoutGaps;
use coverage_rs::interval::Interval;
use coverage_rs::literal::RangeLiteral;
use coverage_rs::range_type::RangeType;
use coverage_rs::value::Value;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Range type, e.g. `int4range`, `daterange`, `tstzrange`.
    #[clap(long = "type", value_name = "TYPE", default_value = "int4range")]
    range_type: String,

    /// Target range literal, or `null`.
    #[clap(long, value_name = "RANGE")]
    target: String,

    /// Candidate range literals in ascending order of their lower bounds.
    /// `null` entries are skipped.
    #[arg(value_name = "RANGE")]
    candidates: Vec<String>,

    /// Log every step of the accumulator.
    #[clap(short, long)]
    verbose: bool,
}

fn parse(ty: RangeType, text: &str) -> color_eyre::Result<Option<RangeLiteral<Value>>> {
    if text.trim().eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let literal = ty.parse(text).wrap_err_with(|| format!("bad {} literal", ty))?;
    Ok(Some(literal))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Trace
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let ty: RangeType = args.range_type.parse()?;
    info!("range type = {}, discrete = {}", ty, ty.is_discrete());

    let target: Option<Interval<Value>> = match parse(ty, &args.target)? {
        None => None,
        Some(RangeLiteral::Empty) => {
            info!("target is empty");
            println!("true");
            return Ok(());
        }
        Some(RangeLiteral::Interval(i)) => Some(i),
    };

    let mut agg = CoversWithoutGaps::new(ty.domain());
    for text in &args.candidates {
        let candidate = match parse(ty, text)? {
            Some(RangeLiteral::Interval(i)) => Some(i),
            Some(RangeLiteral::Empty) | None => None,
        };
        if let Err(e) = agg.transition(candidate.as_ref(), target.as_ref()) {
            bail!("candidate {}: {}", text, e);
        }
    }
    // Every group has at least one row, even without candidates.
    if agg.rows() == 0 {
        agg.transition(None, target.as_ref())?;
    }
    info!("rows = {}", agg.rows());

    match agg.finish() {
        Some(covered) => println!("{}", covered),
        None => println!("null"),
    }

    Ok(())
}
