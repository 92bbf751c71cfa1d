//! CLI tool for turning an indented outline into a PowerPoint deck.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::options::{DEFAULT_BODY_PLACEHOLDER_IDX, DEFAULT_LANGUAGE, DEFAULT_LAYOUT_INDEX};
use deck_core::output::DEFAULT_DATED_SUFFIX;
use deck_core::{assemble, parse, Deck, DeckOptions, OutputName};
use deck_pptx::read_outline;
use std::path::{Path, PathBuf};

/// Reminder printed after every run; slide numbers are added by hand.
const REMINDER: &str = "スライド番号を忘れずに";

/// Build a slide deck from an indented outline and a template deck.
#[derive(Parser, Debug)]
#[command(name = "outline-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Outline text file
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Template deck providing layouts and styling
    #[arg(short, long, default_value = "template.pptx")]
    template: PathBuf,

    /// Directory the deck is written to
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Fixed output file name (default: dated name)
    #[arg(short, long)]
    name: Option<String>,

    /// Text after the date in dated file names
    #[arg(long, default_value = DEFAULT_DATED_SUFFIX)]
    suffix: String,

    /// Slide layout index within the first slide master
    #[arg(long, default_value_t = DEFAULT_LAYOUT_INDEX)]
    layout: usize,

    /// idx of the body placeholder on that layout
    #[arg(long, default_value_t = DEFAULT_BODY_PLACEHOLDER_IDX)]
    body_index: u32,

    /// Language tag for body text
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// Print the slide plan to stdout instead of writing a deck
    #[arg(short, long)]
    print: bool,

    /// Print the parsed outline as JSON instead of writing a deck
    #[arg(long, conflicts_with = "print")]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn deck_options(&self) -> DeckOptions {
        DeckOptions::new()
            .with_layout_index(self.layout)
            .with_body_placeholder_idx(self.body_index)
            .with_language(self.lang.clone())
    }

    fn output_name(&self) -> OutputName {
        match &self.name {
            Some(name) => OutputName::Fixed(name.clone()),
            None => OutputName::Dated {
                suffix: self.suffix.clone(),
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.print || args.json {
        return preview(&args);
    }

    let today = chrono::Local::now().date_naive();
    let output_path = args.output_name().path_in(&args.output_dir, today);

    let summary = deck_pptx::generate(
        &args.input,
        &args.template,
        &output_path,
        &args.deck_options(),
    )
    .with_context(|| {
        format!(
            "Failed to build {} from {} with template {}",
            output_path.display(),
            args.input.display(),
            args.template.display()
        )
    })?;

    log::info!(
        "{} slides, {} paragraphs",
        summary.slides,
        summary.paragraphs
    );

    println!("{}を作成", summary.output.display());
    println!("{}", REMINDER);

    Ok(())
}

/// Print the outline without touching the template or output directory.
fn preview(args: &Args) -> Result<()> {
    let text = read_input(&args.input)?;
    let forest = parse(&text);

    if args.json {
        let json = serde_json::to_string_pretty(&forest).context("Failed to serialize outline")?;
        println!("{}", json);
        return Ok(());
    }

    let mut deck = Deck::new();
    assemble(&forest, &mut deck)?;
    print!("{}", render_plan(&deck));
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    read_outline(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Plain-text view of the slides a deck would contain.
fn render_plan(deck: &Deck) -> String {
    let mut out = String::new();
    for (number, slide) in deck.slides.iter().enumerate() {
        if number > 0 {
            out.push('\n');
        }
        out.push_str(&format!("[{}] {}\n", number + 1, slide.title));
        for paragraph in &slide.paragraphs {
            out.push_str(&format!(
                "{}- {}\n",
                "  ".repeat(paragraph.level + 1),
                paragraph.text
            ));
        }
    }
    out
}
