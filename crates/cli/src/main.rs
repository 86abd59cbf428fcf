//! CLI tool for turning a web page into presentations.

mod http;
mod pipeline;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use deck_core::{Locale, PageContent};
use deck_extract::{ExtractOptions, Extractor};
use http::{UreqFetcher, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use pipeline::Settings;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output file names, one per artifact.
const PAGE_FILE: &str = "contenido_web.json";
const MARKDOWN_FILE: &str = "contenido_web.md";
const DECK_FILE: &str = "presentacion.json";
const KEYNOTE_FILE: &str = "presentacion_keynote.json";
const REVEAL_FILE: &str = "presentacion_revealjs.html";

/// Turn a web page into Keynote-style JSON and reveal.js presentations.
#[derive(Parser, Debug)]
#[command(name = "web2deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output directory (default: output)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long, global = true)]
    print: bool,

    /// Language of generated headings and slides (es, en)
    #[arg(short, long, global = true, default_value = "es", value_parser = parse_locale)]
    locale: Locale,

    /// Keynote theme name (default: Modern)
    #[arg(long, global = true)]
    keynote_theme: Option<String>,

    /// reveal.js theme stylesheet (default: white)
    #[arg(long, global = true)]
    reveal_theme: Option<String>,

    /// User-Agent header sent when fetching pages
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT)]
    timeout: u64,

    /// Do not follow links to subsections
    #[arg(long, global = true)]
    no_sections: bool,

    /// Fetch subsections concurrently
    #[arg(long, global = true)]
    concurrent: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a page and its subsections as JSON
    Scrape {
        /// Page URL
        url: String,
    },
    /// Render a page as markdown
    Markdown {
        #[command(flatten)]
        source: Source,
    },
    /// Compile markdown into the intermediate deck JSON
    Deck {
        #[command(flatten)]
        source: Source,
    },
    /// Render a Keynote-style structured JSON presentation
    Keynote {
        #[command(flatten)]
        source: Source,
    },
    /// Render a reveal.js HTML presentation
    Reveal {
        #[command(flatten)]
        source: Source,
    },
    /// Run the whole pipeline and write every artifact
    All {
        /// Page URL
        url: String,
    },
}

/// Where a stage reads its input from.
#[derive(clap::Args, Debug)]
struct Source {
    /// Page URL to fetch
    #[arg(required_unless_present = "input")]
    url: Option<String>,

    /// Read a previous stage's output instead (page .json, .md, or deck .json)
    #[arg(short, long, conflicts_with = "url")]
    input: Option<PathBuf>,
}

fn parse_locale(code: &str) -> Result<Locale, String> {
    Locale::from_code(code).ok_or_else(|| format!("unsupported locale '{}'", code))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let settings = Settings {
        locale: args.locale,
        keynote_theme: args.keynote_theme.clone(),
        reveal_theme: args.reveal_theme.clone(),
    };
    let options = ExtractOptions::new()
        .with_max_depth(if args.no_sections { 0 } else { 1 })
        .with_concurrent(args.concurrent);
    let fetcher = UreqFetcher::new(Duration::from_secs(args.timeout), args.user_agent.as_str());
    let extractor = Extractor::new(fetcher)
        .with_options(options)
        .with_locale(args.locale);

    match &args.command {
        Command::Scrape { url } => {
            // Failures are reported inside the JSON, not as a process error
            let page = extractor.scrape(url);
            emit(&args, PAGE_FILE, &page.to_json()?)?;
        }
        Command::Markdown { source } => {
            let page = load_page(&extractor, source)?;
            emit(&args, MARKDOWN_FILE, &settings.markdown_compiler().compile(&page))?;
        }
        Command::Deck { source } => {
            let deck = load_deck(&extractor, source, &settings)?;
            emit(&args, DECK_FILE, &serde_json::to_string_pretty(&deck)?)?;
        }
        Command::Keynote { source } => {
            let deck = load_deck(&extractor, source, &settings)?;
            emit(&args, KEYNOTE_FILE, &settings.keynote_renderer().render_json(&deck))?;
        }
        Command::Reveal { source } => {
            let deck = load_deck(&extractor, source, &settings)?;
            emit(&args, REVEAL_FILE, &settings.reveal_renderer().render(&deck))?;
        }
        Command::All { url } => {
            if args.verbose {
                eprintln!("Processing: {}", url);
            }
            let page = pipeline::scrape(&extractor, url)?;
            let outputs = pipeline::run(&page, &settings)?;
            if args.verbose {
                eprintln!(
                    "  Found {} blocks, {} sections; built {} slides",
                    page.blocks.len(),
                    page.subsections.len(),
                    outputs.deck.slides.len()
                );
            }

            emit(&args, PAGE_FILE, &outputs.page_json)?;
            emit(&args, MARKDOWN_FILE, &outputs.markdown)?;
            emit(&args, DECK_FILE, &serde_json::to_string_pretty(&outputs.deck)?)?;
            emit(&args, KEYNOTE_FILE, &outputs.keynote_json)?;
            emit(&args, REVEAL_FILE, &outputs.reveal_html)?;
        }
    }

    Ok(())
}

/// Get a page either by fetching its URL or from a page JSON file.
fn load_page(extractor: &Extractor<UreqFetcher>, source: &Source) -> Result<PageContent> {
    match (&source.url, &source.input) {
        (_, Some(path)) => {
            let text = read_input(path)?;
            PageContent::from_json(&text)
                .with_context(|| format!("Failed to parse page JSON {}", path.display()))
        }
        (Some(url), None) => pipeline::scrape(extractor, url),
        (None, None) => Err(anyhow!("Either a URL or --input is required")),
    }
}

/// Get a deck from a URL, a markdown file, or a deck JSON file.
fn load_deck(
    extractor: &Extractor<UreqFetcher>,
    source: &Source,
    settings: &Settings,
) -> Result<deck_core::Deck> {
    match (&source.url, &source.input) {
        (_, Some(path)) => {
            let text = read_input(path)?;
            let is_json = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"));
            pipeline::load_deck(&text, is_json, settings)
                .with_context(|| format!("Failed to load deck from {}", path.display()))
        }
        (Some(url), None) => {
            let page = pipeline::scrape(extractor, url)?;
            let markdown = settings.markdown_compiler().compile(&page);
            pipeline::load_deck(&markdown, false, settings)
        }
        (None, None) => Err(anyhow!("Either a URL or --input is required")),
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Print or write one artifact.
fn emit(args: &Args, filename: &str, content: &str) -> Result<()> {
    if args.print {
        println!("{}", content);
        return Ok(());
    }

    let output_path = get_output_path(args.output.as_deref(), filename)?;
    write_output(&output_path, content)?;
    if args.verbose {
        eprintln!("Written to: {}", output_path.display());
    }
    Ok(())
}

/// Determine the output path for an artifact, creating the directory.
fn get_output_path(output_dir: Option<&Path>, filename: &str) -> Result<PathBuf> {
    let dir = output_dir.unwrap_or_else(|| Path::new("output"));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    Ok(dir.join(filename))
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
