use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use babynames::config::Config;
use babynames::dataset;
use babynames::repl::Session;
use babynames::year::YearIndex;

/// Plot how popular a baby name was in each year of a dataset.
#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// CSV file with `Year,First Name,County,Sex,Count` rows.
    file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "babynames=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = Options::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let file = File::open(&options.file)
        .with_context(|| format!("cannot open {}", options.file.display()))?;
    let mut index = YearIndex::with_range(config.year_range());
    dataset::load(BufReader::new(file), &mut index)
        .with_context(|| format!("failed to read {}", options.file.display()))?;
    tracing::info!(records = index.len(), span = ?index.span(), "ready");

    let session = Session::new(&index, &config);
    session.run(std::io::stdin().lock(), std::io::stdout().lock())?;
    return Ok(());
}
