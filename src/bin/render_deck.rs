//! Render every slide of a report as text.
//!
//! Usage: render_deck [REPORT.json] [--out FILE] [--slide N]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use branchdeck::config::Config;
use branchdeck::logging::{self, obj, v_str, Domain, Level};
use branchdeck::model::Report;
use branchdeck::render::TextRenderer;
use branchdeck::slides::SlideRegistry;
use branchdeck::transfer;

#[derive(Parser)]
#[command(name = "render_deck", about = "Render a report's slides as plain text")]
struct Args {
    /// Exported report; a fresh report for the current month when omitted
    report: Option<PathBuf>,
    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Render only slide N (1-based)
    #[arg(long)]
    slide: Option<usize>,
    /// Line width (overrides RENDER_WIDTH)
    #[arg(long)]
    width: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = Config::from_env();
    if let Some(width) = args.width {
        cfg = Config {
            render_width: width,
            ..cfg
        }
        .normalized();
    }

    let report = match &args.report {
        Some(path) => transfer::import_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Report::fresh(),
    };

    let registry = SlideRegistry::build(&cfg.org_name);
    let renderer = TextRenderer::new(cfg.render_width);
    let slides = match args.slide {
        Some(n) => match n.checked_sub(1).and_then(|i| registry.render(&report, i)) {
            Some(slide) => vec![slide],
            None => bail!("slide {} does not exist (deck has {})", n, registry.len()),
        },
        None => registry.render_all(&report),
    };

    let text = slides
        .iter()
        .map(|s| renderer.render(s))
        .collect::<Vec<_>>()
        .join("\n");

    match &args.out {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("wrote {} slides to {}", slides.len(), path.display());
        }
        None => print!("{}", text),
    }

    logging::log(
        Level::Info,
        Domain::Slides,
        "deck_rendered",
        obj(&[
            ("period", v_str(&report.period_label())),
            ("slides", serde_json::json!(slides.len())),
            ("report_digest", v_str(&transfer::report_digest(&report))),
        ]),
    );
    logging::flush();
    Ok(())
}
