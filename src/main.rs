//! demo-page — runs the demo content generator inside a simulated page.

mod cli;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use demo_content::builders::DYNAMIC_ELEMENT_CLASS;
use demo_content::{DemoConfig, DisplayHost, on_ready};
use page::Page;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let stdout = io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn load_config(cli: &Cli) -> Result<DemoConfig> {
    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DemoConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli)?;
    debug!(?config, "effective config");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut page = Page::new();
    let ready_config = config.clone();
    page.on_ready(move |page| on_ready(page, &mut rng, &ready_config).map(|_| ()))?;
    page.load()?;
    page.advance(0)?;

    if let Some(index) = cli.hover {
        let boxes = page.query_class(DYNAMIC_ELEMENT_CLASS);
        let Some(&target) = boxes.get(index) else {
            bail!("no colored box at position {index} (page has {})", boxes.len());
        };
        page.hover(target)?;
        info!(index, "hovered");
    }

    if cli.animate {
        let button = page
            .body()
            .and_then(|body| page.dom().first_child(body))
            .context("page has no animate control")?;
        page.click(button)?;
        info!("animate clicked");
    }

    let run_ms = cli.run_ms.unwrap_or(if cli.animate {
        config.animation_span_ms()
    } else {
        0
    });
    page.advance(run_ms)?;

    for line in page.console() {
        writeln!(out, "{line}")?;
    }

    if let Some(path) = &cli.html {
        write_html(&page, path, out)?;
    }
    Ok(())
}

fn write_html(page: &Page, path: &Path, out: &mut impl Write) -> Result<()> {
    let html = page.to_html();
    if path == Path::new("-") {
        writeln!(out, "{html}")?;
    } else {
        fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
