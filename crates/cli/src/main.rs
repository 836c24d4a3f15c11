//! CLI for building course material from lecture-note markdown.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use deck_core::{reorganize, SectionPlan, SlideParser};
use deck_figures::{datasets, diagrams, SlideArtist, SlideStyle};
use deck_html::HtmlOptions;
use deck_pptx::{image_deck, markdown_deck, sectioned_decks, DeckOptions, DeckReader};
use std::path::{Path, PathBuf};

/// Build slide decks, slide images, diagrams, datasets and HTML notes from
/// lecture-note markdown.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert markdown notes into a text and picture PPTX deck
    Deck {
        /// Lecture-note markdown file
        input: PathBuf,

        /// Output deck (default: input name with .pptx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Slides whose title contains this text become title slides
        #[arg(long)]
        title_marker: Option<String>,
    },

    /// Render every slide to a PNG and assemble an image-only deck
    Slides {
        input: PathBuf,

        /// Slide image style
        #[arg(short, long, default_value = "plain")]
        style: SlideStyle,

        /// Directory for slide_NNN.png files (default: <input>_slides)
        #[arg(long)]
        images_dir: Option<PathBuf>,

        /// Output deck (default: <input>_slides.pptx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only render the images, do not build a deck
        #[arg(long)]
        no_deck: bool,
    },

    /// Render a single slide to a PNG
    RenderSlide {
        input: PathBuf,

        /// 1-based slide number
        #[arg(long)]
        slide: usize,

        #[arg(short, long, default_value = "flat")]
        style: SlideStyle,

        /// Output image (default: slide_NNN.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split rendered slide images into per-section decks with a navigation deck
    Sections {
        /// Directory holding slide_NNN.png files
        images_dir: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "sections")]
        output: PathBuf,

        /// Section plan (TOML); the built-in plan when omitted
        #[arg(long)]
        plan: Option<PathBuf>,
    },

    /// Rewrite markdown notes with a table of contents and section banners
    Reorganize {
        input: PathBuf,

        /// Output markdown (default: <input>_reorganized.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        plan: Option<PathBuf>,
    },

    /// Convert markdown notes into a styled HTML page
    Html {
        input: PathBuf,

        /// Output page (default: input name with .html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Inline every local image as a data URI
        #[arg(long)]
        self_contained: bool,

        /// Page title (default: first level-one heading)
        #[arg(long)]
        title: Option<String>,
    },

    /// Render concept diagrams to PNG
    Diagrams {
        /// Output directory
        #[arg(short, long, default_value = "images")]
        output: PathBuf,

        /// Only render these diagrams (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// List the available diagrams and exit
        #[arg(long)]
        list: bool,

        #[arg(long, default_value_t = diagrams::DEFAULT_SEED)]
        seed: u64,
    },

    /// Generate the synthetic exercise datasets as CSV
    Datasets {
        /// Output directory
        #[arg(short, long, default_value = "data")]
        output: PathBuf,

        #[arg(long, default_value_t = datasets::DEFAULT_SEED)]
        seed: u64,
    },

    /// List the slides of a PPTX deck
    Inspect {
        input: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match args.command {
        Command::Deck {
            input,
            output,
            title_marker,
        } => run_deck(&input, output, title_marker),
        Command::Slides {
            input,
            style,
            images_dir,
            output,
            no_deck,
        } => run_slides(&input, style, images_dir, output, no_deck),
        Command::RenderSlide {
            input,
            slide,
            style,
            output,
        } => run_render_slide(&input, slide, style, output),
        Command::Sections {
            images_dir,
            output,
            plan,
        } => run_sections(&images_dir, &output, plan.as_deref()),
        Command::Reorganize {
            input,
            output,
            plan,
        } => run_reorganize(&input, output, plan.as_deref()),
        Command::Html {
            input,
            output,
            self_contained,
            title,
        } => run_html(&input, output, self_contained, title),
        Command::Diagrams {
            output,
            only,
            list,
            seed,
        } => run_diagrams(&output, &only, list, seed),
        Command::Datasets { output, seed } => run_datasets(&output, seed),
        Command::Inspect { input, json } => run_inspect(&input, json),
    }
}

/// Read a markdown input file.
fn read_markdown(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Directory relative paths inside `input` resolve against.
fn base_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map(Path::to_path_buf)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `input` with its extension replaced, or `suffix` appended to its stem.
fn derived_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    base_dir(input).join(format!("{}{}{}", stem, suffix, extension))
}

fn run_deck(input: &Path, output: Option<PathBuf>, title_marker: Option<String>) -> Result<()> {
    let markdown = read_markdown(input)?;
    let slides = SlideParser::new().parse_deck(&markdown);
    log::info!("Found {} slides", slides.len());

    let mut options = DeckOptions::default().with_base_dir(base_dir(input));
    if title_marker.is_some() {
        options = options.with_title_marker(title_marker);
    }
    let (deck, report) = markdown_deck(&slides, &options)?;

    let output = output.unwrap_or_else(|| derived_path(input, "", ".pptx"));
    deck.save_to_path(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Created {} with {} slides", output.display(), deck.slide_count());
    println!("  Pictures: {}", report.pictures);
    for missing in &report.placeholders {
        println!("  Placeholder for missing image: {}", missing);
    }
    Ok(())
}

fn run_slides(
    input: &Path,
    style: SlideStyle,
    images_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    no_deck: bool,
) -> Result<()> {
    let markdown = read_markdown(input)?;
    let images_dir = images_dir.unwrap_or_else(|| derived_path(input, "_slides", ""));

    let artist = SlideArtist::new(style).with_base_dir(base_dir(input));
    let paths = artist.render_all(&markdown, &images_dir)?;
    println!("Rendered {} slide images to {}", paths.len(), images_dir.display());

    if no_deck {
        return Ok(());
    }
    let deck = image_deck(&paths)?;
    let output = output.unwrap_or_else(|| derived_path(input, "_slides", ".pptx"));
    deck.save_to_path(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Created {} with {} slides", output.display(), deck.slide_count());
    Ok(())
}

fn run_render_slide(input: &Path, number: usize, style: SlideStyle, output: Option<PathBuf>) -> Result<()> {
    if number == 0 {
        bail!("Slide numbers start at 1");
    }
    let markdown = read_markdown(input)?;
    let output = output.unwrap_or_else(|| PathBuf::from(deck_figures::slide_file_name(number)));

    let artist = SlideArtist::new(style).with_base_dir(base_dir(input));
    let path = artist.render_one(&markdown, number, &output)?;
    println!("Rendered slide {} ({} style) to {}", number, style, path.display());
    Ok(())
}

fn run_sections(images_dir: &Path, output: &Path, plan: Option<&Path>) -> Result<()> {
    let plan = SectionPlan::load_or_default(plan)?;
    let report = sectioned_decks(images_dir, output, &plan)?;

    println!("Created {} section decks in {}", report.sections.len(), output.display());
    for section in &report.sections {
        println!("  {} ({} images)", section.deck_path.display(), section.images);
        if !section.missing.is_empty() {
            println!("    Missing slides: {:?}", section.missing);
        }
    }
    println!("  Navigation: {}", report.master_path.display());
    println!("  README: {}", report.readme_path.display());
    Ok(())
}

fn run_reorganize(input: &Path, output: Option<PathBuf>, plan: Option<&Path>) -> Result<()> {
    let markdown = read_markdown(input)?;
    let plan = SectionPlan::load_or_default(plan)?;
    let result = reorganize(&markdown, &plan)?;

    let output = output.unwrap_or_else(|| derived_path(input, "_reorganized", ".md"));
    std::fs::write(&output, &result.markdown)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Created {}", output.display());
    println!("  Slides: {}", result.slide_count);
    println!("  Index entries: {}", result.toc_entries);
    println!("  Section dividers: {}", result.dividers);
    Ok(())
}

fn run_html(input: &Path, output: Option<PathBuf>, self_contained: bool, title: Option<String>) -> Result<()> {
    let mut options = HtmlOptions::new()
        .self_contained(self_contained)
        .with_base_dir(base_dir(input));
    if let Some(title) = title {
        options = options.with_title(title);
    }

    let suffix = if self_contained { "_SelfContained" } else { "" };
    let output = output.unwrap_or_else(|| derived_path(input, suffix, ".html"));
    let page = deck_html::convert_file(input, &output, &options)?;

    println!("Created {} ({:.2} MB)", output.display(), page.html.len() as f64 / 1024.0 / 1024.0);
    if self_contained {
        println!("  Embedded images: {}", page.images.embedded.len());
        for missing in &page.images.missing {
            println!("  Not found: {}", missing);
        }
    }
    Ok(())
}

fn run_diagrams(output: &Path, only: &[String], list: bool, seed: u64) -> Result<()> {
    if list {
        for diagram in diagrams::catalog() {
            println!("{:<24} {}", diagram.name, diagram.description);
        }
        return Ok(());
    }

    let written = diagrams::generate(output, only, seed)?;
    println!("Created {} diagrams in {}", written.len(), output.display());
    Ok(())
}

fn run_datasets(output: &Path, seed: u64) -> Result<()> {
    let summaries = datasets::generate_all(output, seed)?;

    println!("Dataset summary:");
    for summary in &summaries {
        let name = summary
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("  {:<28}: {:>6} rows  {}", name, summary.rows, summary.note);
    }
    let total: usize = summaries.iter().map(|s| s.rows).sum();
    println!("Total rows: {}", total);
    Ok(())
}

fn run_inspect(input: &Path, json: bool) -> Result<()> {
    let summary = DeckReader::new().read_path(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{}: {} slides, {} pictures",
        summary.name,
        summary.slide_count(),
        summary.picture_count()
    );
    for slide in &summary.slides {
        let first = slide.lines.first().map(String::as_str).unwrap_or("");
        println!("  {:>3}. {} [{} pictures]", slide.number, first, slide.pictures);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let input = Path::new("notes/Class4.md");
        assert_eq!(derived_path(input, "", ".pptx"), PathBuf::from("notes/Class4.pptx"));
        assert_eq!(
            derived_path(input, "_slides", ""),
            PathBuf::from("notes/Class4_slides")
        );
        assert_eq!(
            derived_path(Path::new("Class4.md"), "_reorganized", ".md"),
            PathBuf::from("./Class4_reorganized.md")
        );
    }

    #[test]
    fn test_parses_subcommands() {
        let args = Args::try_parse_from([
            "deckgen", "-v", "render-slide", "notes.md", "--slide", "3", "--style", "jetsons",
        ])
        .unwrap();
        assert!(args.verbose);
        match args.command {
            Command::RenderSlide { slide, style, .. } => {
                assert_eq!(slide, 3);
                assert_eq!(style, SlideStyle::Jetsons);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let args = Args::try_parse_from([
            "deckgen", "diagrams", "--only", "eda_cycle", "--only", "data_types",
        ])
        .unwrap();
        match args.command {
            Command::Diagrams { only, seed, .. } => {
                assert_eq!(only, vec!["eda_cycle", "data_types"]);
                assert_eq!(seed, 42);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_style() {
        assert!(Args::try_parse_from(["deckgen", "slides", "notes.md", "--style", "neon"]).is_err());
    }
}
