//! Deck building operations: markdown notes, image sequences and
//! per-section decks with a navigation deck.

use crate::writer::{Align, DeckSlide, DeckWriter, Frame, Media, Paragraph};
use deck_core::clean::clean_for_deck;
use deck_core::{Error, Result, SectionPlan, Slide};
use std::path::{Path, PathBuf};

/// File name of the navigation deck written next to the section folders.
pub const MASTER_NAVIGATION_FILE: &str = "00_Master_Navigation.pptx";

/// Longest subtitle taken from a title slide's body.
const SUBTITLE_MAX_CHARS: usize = 200;

/// Layout and styling of decks converted from markdown.
#[derive(Debug, Clone)]
pub struct DeckOptions {
    /// Slide width in inches.
    pub slide_width: f64,
    /// Slide height in inches.
    pub slide_height: f64,
    /// Slides whose title contains this text become title slides.
    pub title_marker: Option<String>,
    /// `RRGGBB` colour of slide titles.
    pub title_color: String,
    pub title_size_pt: f64,
    pub body_size_pt: f64,
    /// Directory image paths are resolved against.
    pub base_dir: PathBuf,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            slide_width: 10.0,
            slide_height: 7.5,
            title_marker: Some("Class 3 – Data Visualization".to_string()),
            title_color: "003366".to_string(),
            title_size_pt: 28.0,
            body_size_pt: 14.0,
            base_dir: PathBuf::from("."),
        }
    }
}

impl DeckOptions {
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn with_title_marker(mut self, marker: Option<String>) -> Self {
        self.title_marker = marker;
        self
    }

    fn new_deck(&self) -> DeckWriter {
        DeckWriter::new().with_slide_size(
            crate::Emu::from_inches(self.slide_width),
            crate::Emu::from_inches(self.slide_height),
        )
    }
}

/// Pictures placed and images replaced by placeholders in a composed deck.
#[derive(Debug, Clone, Default)]
pub struct ComposeReport {
    pub pictures: usize,
    pub placeholders: Vec<String>,
}

/// Build a text and picture deck from parsed slides.
pub fn markdown_deck(slides: &[Slide], options: &DeckOptions) -> Result<(DeckWriter, ComposeReport)> {
    if slides.is_empty() {
        return Err(Error::MarkdownError("No slides found in document".to_string()));
    }

    let mut deck = options.new_deck();
    let mut report = ComposeReport::default();

    for slide in slides {
        let page = match &slide.image {
            Some(image) if !image.is_remote() => {
                let path = options.base_dir.join(&image.path);
                image_slide(&mut deck, &slide.title, &path, options, &mut report)?
            }
            Some(_) => content_slide(&slide.title, &slide.body, options),
            None if is_title_slide(slide, options) => {
                let subtitle: String = slide.body.chars().take(SUBTITLE_MAX_CHARS).collect();
                title_slide(&slide.title, &subtitle, options)
            }
            None => content_slide(&slide.title, &slide.body, options),
        };
        deck.push_slide(page);

        if slide.number % 10 == 0 {
            log::info!("Processed {} slides...", slide.number);
        }
    }

    Ok((deck, report))
}

fn is_title_slide(slide: &Slide, options: &DeckOptions) -> bool {
    options
        .title_marker
        .as_deref()
        .is_some_and(|marker| slide.title.contains(marker))
}

fn title_paragraph(title: &str, options: &DeckOptions) -> Paragraph {
    Paragraph::new(clean_for_deck(title))
        .size(options.title_size_pt)
        .bold()
        .color(options.title_color.as_str())
}

/// Title slide: large centred title and an optional subtitle below it.
pub fn title_slide(title: &str, subtitle: &str, options: &DeckOptions) -> DeckSlide {
    let mut slide = DeckSlide::new();
    let width = options.slide_width - 1.0;
    slide.add_text_box(
        Frame::inches(0.5, options.slide_height * 0.3, width, 1.5),
        vec![title_paragraph(title, options).size(32.0).align(Align::Center)],
    );

    let subtitle = clean_for_deck(subtitle);
    if !subtitle.is_empty() {
        let paragraphs = subtitle
            .split('\n')
            .map(|line| Paragraph::new(line.trim()).size(18.0).align(Align::Center))
            .collect();
        slide.add_text_box(
            Frame::inches(1.0, options.slide_height * 0.3 + 1.7, width - 1.0, 2.0),
            paragraphs,
        );
    }
    slide
}

/// Title box plus one paragraph per non-empty body line.
///
/// `- item` lines become level-0 bullets, items indented by two or more
/// spaces level-1 bullets, the same levels the slide parser gives them.
pub fn content_slide(title: &str, body: &str, options: &DeckOptions) -> DeckSlide {
    let mut slide = DeckSlide::new();
    let width = options.slide_width - 1.0;
    slide.add_text_box(
        Frame::inches(0.5, 0.3, width, 0.8),
        vec![title_paragraph(title, options)],
    );

    let paragraphs: Vec<Paragraph> = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| body_paragraph(line, options))
        .collect();
    if !paragraphs.is_empty() {
        slide.add_text_box(
            Frame::inches(0.5, 1.3, width, options.slide_height - 1.7),
            paragraphs,
        );
    }
    slide
}

fn body_paragraph(line: &str, options: &DeckOptions) -> Paragraph {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();

    let paragraph = |text: &str| {
        Paragraph::new(clean_for_deck(text))
            .size(options.body_size_pt)
            .space_before(6.0)
    };
    match trimmed.strip_prefix('-') {
        Some(item) => paragraph(item).bullet(u8::from(indent >= 2)),
        None if trimmed.starts_with('#') => paragraph(trimmed.trim_start_matches('#')).bold(),
        None => paragraph(trimmed),
    }
}

/// Centred title and the picture 8in wide, or a placeholder when the
/// file is missing.
fn image_slide(
    deck: &mut DeckWriter,
    title: &str,
    path: &Path,
    options: &DeckOptions,
    report: &mut ComposeReport,
) -> Result<DeckSlide> {
    let mut slide = DeckSlide::new();
    slide.add_text_box(
        Frame::inches(0.5, 0.2, options.slide_width - 1.0, 0.8),
        vec![title_paragraph(title, options).align(Align::Center)],
    );
    let top = 1.3;

    let media = match Media::from_path(path) {
        Ok(media) => media,
        Err(Error::MissingFile(_)) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            log::warn!("Image not found, adding placeholder: {}", path.display());
            slide.add_text_box(
                Frame::inches(2.0, top, 6.0, 1.0),
                vec![Paragraph::new(format!("[Image: {}]", name)).align(Align::Center)],
            );
            report.placeholders.push(name);
            return Ok(slide);
        }
        Err(e) => return Err(e),
    };

    let (px_width, px_height) = media.dimensions()?;
    let mut width = 8.0;
    let mut height = width * px_height as f64 / px_width.max(1) as f64;
    let max_height = options.slide_height - top - 0.2;
    if height > max_height {
        width *= max_height / height;
        height = max_height;
    }
    let left = (options.slide_width - width) / 2.0;

    let index = deck.add_media(media);
    slide.add_picture(Frame::inches(left, top, width, height), index);
    report.pictures += 1;
    Ok(slide)
}

/// One blank slide per image, each picture stretched over the whole slide.
pub fn image_deck(paths: &[PathBuf]) -> Result<DeckWriter> {
    let mut deck = DeckWriter::new();
    append_full_bleed(&mut deck, paths)?;
    Ok(deck)
}

fn append_full_bleed(deck: &mut DeckWriter, paths: &[PathBuf]) -> Result<()> {
    let full = crate::writer::Frame {
        x: crate::Emu(0),
        y: crate::Emu(0),
        cx: deck.slide_width,
        cy: deck.slide_height,
    };
    for path in paths {
        let index = deck.add_media(Media::from_path(path)?);
        let mut slide = DeckSlide::new();
        slide.add_picture(full, index);
        deck.push_slide(slide);
    }
    Ok(())
}

/// Path of the rendered image for a slide number.
pub fn slide_image_name(number: usize) -> String {
    format!("slide_{:03}.png", number)
}

/// What was written for one section.
#[derive(Debug, Clone)]
pub struct SectionOutcome {
    pub name: String,
    pub deck_path: PathBuf,
    pub images: usize,
    /// Slide numbers in the section range with no rendered image.
    pub missing: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct SectionReport {
    pub sections: Vec<SectionOutcome>,
    pub master_path: PathBuf,
    pub readme_path: PathBuf,
}

/// Split rendered slide images into per-section folders and decks, plus
/// a navigation deck and a README.
pub fn sectioned_decks(images_dir: &Path, out_dir: &Path, plan: &SectionPlan) -> Result<SectionReport> {
    plan.validate()?;
    if !images_dir.is_dir() {
        return Err(Error::MissingFile(images_dir.to_path_buf()));
    }
    std::fs::create_dir_all(out_dir)?;
    let options = DeckOptions::default();

    let mut outcomes = Vec::with_capacity(plan.sections.len());
    for section in &plan.sections {
        let section_dir = out_dir.join(&section.name);
        std::fs::create_dir_all(&section_dir)?;

        let mut copied = Vec::new();
        let mut missing = Vec::new();
        for number in section.slide_numbers() {
            let name = slide_image_name(number);
            let source = images_dir.join(&name);
            if source.exists() {
                let target = section_dir.join(&name);
                std::fs::copy(&source, &target)?;
                copied.push(target);
            } else {
                missing.push(number);
            }
        }
        log::info!("Copied {} images to {}", copied.len(), section.name);
        if !missing.is_empty() {
            log::warn!("{}: {} slide images missing", section.name, missing.len());
        }

        let mut deck = DeckWriter::new().with_title(section.title.as_str());
        deck.push_slide(title_slide(
            &section.title,
            &format!("{}\n\n{} slides", section.description, section.len()),
            &options,
        ));
        append_full_bleed(&mut deck, &copied)?;

        let deck_path = section_dir.join(format!("{}.pptx", section.name));
        deck.save_to_path(&deck_path)?;
        log::info!("Created {}.pptx ({} slides)", section.name, section.len());

        outcomes.push(SectionOutcome {
            name: section.name.clone(),
            deck_path,
            images: copied.len(),
            missing,
        });
    }

    let master_path = out_dir.join(MASTER_NAVIGATION_FILE);
    navigation_deck(plan, &options).save_to_path(&master_path)?;
    log::info!("Created master navigation: {}", MASTER_NAVIGATION_FILE);

    let readme_path = out_dir.join("README.md");
    std::fs::write(&readme_path, plan.readme_markdown(MASTER_NAVIGATION_FILE))?;

    Ok(SectionReport {
        sections: outcomes,
        master_path,
        readme_path,
    })
}

/// Course title slide followed by a slide listing every section.
pub fn navigation_deck(plan: &SectionPlan, options: &DeckOptions) -> DeckWriter {
    let mut deck = DeckWriter::new().with_title(plan.course_title.as_str());
    let subtitle = if plan.course_subtitle.is_empty() {
        "Click to navigate to each section".to_string()
    } else {
        format!("{}\n\nClick to navigate to each section", plan.course_subtitle)
    };
    deck.push_slide(title_slide(&plan.course_title, &subtitle, options));

    let mut nav = DeckSlide::new();
    nav.add_text_box(
        Frame::inches(0.5, 0.5, options.slide_width - 1.0, 1.0),
        vec![title_paragraph("Course Sections - Navigation", options).align(Align::Center)],
    );

    let mut paragraphs = Vec::with_capacity(plan.sections.len() * 3);
    for (idx, section) in plan.sections.iter().enumerate() {
        paragraphs.push(
            Paragraph::new(format!("{}. {}", idx + 1, section.title))
                .size(18.0)
                .bold()
                .space_before(if idx == 0 { 0.0 } else { 18.0 }),
        );
        paragraphs.push(Paragraph::new(format!("   {}", section.description)).size(13.0));
        paragraphs.push(
            Paragraph::new(format!(
                "   {} slides | File: {}.pptx",
                section.len(),
                section.name
            ))
            .size(11.0)
            .italic(),
        );
    }
    nav.add_text_box(Frame::inches(1.0, 2.0, 8.0, 4.5), paragraphs);
    deck.push_slide(nav);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::DeckReader;
    use deck_core::SlideParser;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::from_pixel(width, height, image::Rgb([200, 220, 240]))
            .save(path)
            .unwrap();
    }

    fn options(dir: &Path) -> DeckOptions {
        DeckOptions::default().with_base_dir(dir)
    }

    #[test]
    fn test_markdown_deck_mixed_slides() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("images")).unwrap();
        write_png(&dir.path().join("images/chart.png"), 80, 60);

        let md = "# Header\n---\n## Slide 1 – Class 3 – Data Visualization\nPerception and **encoding**\n---\n## Slide 2 – Chart\n![chart](images/chart.png)\n---\n## Slide 3 – Missing\n![gone](images/gone.png)\n---\n## Slide 4 – Remote\n![r](https://example.com/x.png)\n- remote body\n---\n## Slide 5 – Bullets\n- top ✅\n  - nested `code`\n";
        let slides = SlideParser::new().parse_deck(md);
        assert_eq!(slides.len(), 5);

        let (deck, report) = markdown_deck(&slides, &options(dir.path())).unwrap();
        assert_eq!(deck.slide_count(), 5);
        assert_eq!(report.pictures, 1);
        assert_eq!(report.placeholders, vec!["gone.png".to_string()]);

        // Title slide: title and subtitle boxes
        assert_eq!(
            deck.slides()[0].texts(),
            vec!["Slide 1 – Class 3 – Data Visualization", "Perception and encoding"]
        );
        assert_eq!(deck.slides()[1].picture_count(), 1);
        assert!(deck.slides()[2].texts().contains(&"[Image: gone.png]"));
        assert!(deck.slides()[3].texts().contains(&"remote body"));
        assert_eq!(
            deck.slides()[4].texts(),
            vec!["Slide 5 – Bullets", "top [OK]", "nested code"]
        );
    }

    #[test]
    fn test_body_bullet_levels_match_parser() {
        let options = DeckOptions::default();
        let body = "- top\n  - nested\n### Heading\nprose";
        let parsed = deck_core::markdown::extract_bullets(body);
        assert_eq!(parsed[0].level, 0);
        assert_eq!(parsed[1].level, 1);

        let top = body_paragraph("- top", &options);
        assert_eq!(top.bullet, Some(parsed[0].level));
        assert_eq!(body_paragraph("  - nested", &options).bullet, Some(parsed[1].level));
        let heading = body_paragraph("### Heading", &options);
        assert_eq!(heading.bullet, None);
        assert!(heading.bold);
        assert_eq!(body_paragraph("prose", &options).bullet, None);
    }

    #[test]
    fn test_image_keeps_aspect_ratio() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("wide.png"), 200, 100);
        let slides = SlideParser::new().parse_deck("## Wide\n![w](wide.png)\n");
        let (deck, _) = markdown_deck(&slides, &options(dir.path())).unwrap();

        let frame = deck.slides()[0]
            .shapes
            .iter()
            .find_map(|s| match s {
                crate::writer::Shape::Picture { frame, .. } => Some(*frame),
                _ => None,
            })
            .unwrap();
        assert_eq!(frame.x, crate::Emu::from_inches(1.0));
        assert_eq!(frame.cx, crate::Emu::from_inches(8.0));
        assert_eq!(frame.cy, crate::Emu::from_inches(4.0));
    }

    #[test]
    fn test_tall_image_fits_slide() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("tall.png"), 100, 200);
        let slides = SlideParser::new().parse_deck("## Tall\n![t](tall.png)\n");
        let (deck, _) = markdown_deck(&slides, &options(dir.path())).unwrap();
        match &deck.slides()[0].shapes[1] {
            crate::writer::Shape::Picture { frame, .. } => {
                assert!(frame.y.inches() + frame.cy.inches() <= 7.5);
            }
            other => panic!("expected picture, got {:?}", other),
        }
    }

    #[test]
    fn test_markdown_deck_empty_is_error() {
        let err = markdown_deck(&[], &DeckOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MarkdownError(_)));
    }

    #[test]
    fn test_image_deck_round_trip() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (1..=3)
            .map(|n| {
                let path = dir.path().join(slide_image_name(n));
                write_png(&path, 40, 30);
                path
            })
            .collect();

        let deck = image_deck(&paths).unwrap();
        let out = dir.path().join("deck.pptx");
        deck.save_to_path(&out).unwrap();

        let summary = DeckReader::new().read_path(&out).unwrap();
        assert_eq!(summary.slide_count(), 3);
        assert!(summary.slides.iter().all(|s| s.pictures == 1));
    }

    #[test]
    fn test_image_deck_missing_file() {
        let err = image_deck(&[PathBuf::from("/no/such/slide_001.png")]).unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }

    #[test]
    fn test_sectioned_decks() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("slide_images");
        fs::create_dir(&images).unwrap();
        for n in [1, 2, 4] {
            write_png(&images.join(slide_image_name(n)), 40, 30);
        }
        let plan = SectionPlan::from_toml_str(
            r#"
course_title = "Demo Course"
[[sections]]
name = "Part1_Intro"
title = "Part 1: Intro"
description = "Basics"
first_slide = 1
last_slide = 2
[[sections]]
name = "Part2_More"
title = "Part 2: More"
description = "Depth"
first_slide = 3
last_slide = 4
"#,
        )
        .unwrap();

        let out = dir.path().join("sections");
        let report = sectioned_decks(&images, &out, &plan).unwrap();

        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[0].images, 2);
        assert_eq!(report.sections[1].missing, vec![3]);
        assert!(out.join("Part1_Intro/slide_001.png").exists());
        assert!(out.join("README.md").exists());

        let part2 = DeckReader::new().read_path(&report.sections[1].deck_path).unwrap();
        assert_eq!(part2.slide_count(), 2);
        assert_eq!(part2.slides[0].lines[0], "Part 2: More");
        assert!(part2.slides[0].lines.contains(&"2 slides".to_string()));

        let master = DeckReader::new().read_path(&report.master_path).unwrap();
        assert_eq!(master.slide_count(), 2);
        assert!(master.slides[1].lines.contains(&"2. Part 2: More".to_string()));
    }
}
