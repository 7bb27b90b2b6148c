use anyhow::{Context, Result};
use clap::Parser;
use rollbook::{
    cli::Cli,
    config::Config,
    menu::{Exit, Session},
    report,
    storage::{self, LoadMode, DEFAULT_FILE},
    threshold::Threshold,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = Config::discover(args.config.as_deref())?;

    // Command line wins over the config file
    let path = args
        .file
        .or(config.default_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));
    let threshold = match args.threshold {
        Some(value) => Threshold::new(value).context("Invalid value for --threshold")?,
        None => config.threshold.unwrap_or_default(),
    };
    let mode = if args.strict || config.strict_load {
        LoadMode::Strict
    } else {
        LoadMode::Lenient
    };

    let loaded = storage::load(&path, mode)
        .with_context(|| format!("Failed to load roster {}", path.display()))?;
    for rejected in &loaded.rejected {
        eprintln!("Warning: {}: skipped {}", path.display(), rejected);
    }
    let roster = loaded.roster.with_threshold(threshold);

    if args.report {
        print!("{}", report::render(&roster, args.format));
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(roster, &path, stdin.lock(), stdout.lock());
    if session.run()? == Exit::EndOfInput {
        tracing::info!("session ended without saving");
    }
    Ok(())
}
