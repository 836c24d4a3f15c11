//! Markdown reorganization: table of contents, clean headings, section banners.

use crate::clean::anchor_slug;
use crate::markdown::split_slides;
use crate::sections::{Section, SectionPlan};
use crate::Result;
use regex::Regex;
use std::fmt::Write as _;
use std::sync::LazyLock;

/// `## Slide N – ` heading prefix anywhere in a document.
static HEADING_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## Slide \d+\s*[–—-]\s*").unwrap());

static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.+?)\s*$").unwrap());

const BANNER_RULE: &str = "═══════════════════════════════════════════════════════════════";

/// Output of [`reorganize`].
#[derive(Debug, Clone)]
pub struct Reorganized {
    /// The rewritten document.
    pub markdown: String,

    /// Number of slides carried over.
    pub slide_count: usize,

    /// Number of entries in the detailed index.
    pub toc_entries: usize,

    /// Number of section banners inserted.
    pub dividers: usize,
}

/// Remove `Slide N – ` from every level-two heading.
pub fn strip_heading_numbers(content: &str) -> String {
    HEADING_PREFIX_REGEX.replace_all(content, "## ").to_string()
}

fn first_heading(section: &str) -> Option<String> {
    HEADING_REGEX
        .captures(section)
        .map(|caps| caps[1].trim().to_string())
}

fn section_banner(section: &Section) -> String {
    format!(
        "# {rule}\n# {title}\n# Slides {first}-{last}\n# {rule}\n\n",
        rule = BANNER_RULE,
        title = section.title.to_uppercase(),
        first = section.first_slide,
        last = section.last_slide,
    )
}

fn table_of_contents(plan: &SectionPlan, titles: &[String]) -> (String, usize) {
    let mut toc = String::new();
    let _ = writeln!(toc, "# {}", plan.course_title);
    if !plan.course_subtitle.is_empty() {
        let _ = writeln!(toc, "## {}", plan.course_subtitle);
    }
    let _ = writeln!(toc, "\n---\n");
    let _ = writeln!(toc, "# 📚 Table of Contents\n");
    let _ = writeln!(toc, "## Quick Navigation");
    for section in &plan.sections {
        let _ = writeln!(toc, "- [{}](#{})", section.title, anchor_slug(&section.title));
    }
    let _ = writeln!(toc, "\n---\n");
    let _ = writeln!(toc, "## Detailed Index");

    let mut entries = 0;
    for section in &plan.sections {
        let _ = writeln!(
            toc,
            "\n### {} (Slides {}-{})",
            section.title, section.first_slide, section.last_slide
        );
        for number in section.slide_numbers() {
            if let Some(title) = number.checked_sub(1).and_then(|i| titles.get(i)) {
                let _ = writeln!(toc, "- [{}](#{})", title, anchor_slug(title));
                entries += 1;
            }
        }
    }

    (toc, entries)
}

/// Rebuild lecture notes with a table of contents and section banners.
///
/// Sections without a `## ` heading (the old document header) are dropped;
/// the new header is generated from the plan, which must be valid.
pub fn reorganize(content: &str, plan: &SectionPlan) -> Result<Reorganized> {
    plan.validate()?;
    let content = strip_heading_numbers(&content.replace("\r\n", "\n"));

    let slides: Vec<(String, String)> = split_slides(&content)
        .into_iter()
        .filter_map(|section| first_heading(&section).map(|title| (title, section)))
        .collect();
    let titles: Vec<String> = slides.iter().map(|(t, _)| t.clone()).collect();

    let (toc, toc_entries) = table_of_contents(plan, &titles);
    let mut output = toc;
    output.push_str("\n---\n\n");

    let mut dividers = 0;
    let bodies: Vec<String> = slides
        .iter()
        .enumerate()
        .map(|(idx, (_, body))| {
            let number = idx + 1;
            match plan.sections.iter().find(|s| s.first_slide == number) {
                Some(section) => {
                    dividers += 1;
                    format!("{}{}", section_banner(section), body)
                }
                None => body.clone(),
            }
        })
        .collect();
    output.push_str(&bodies.join("\n\n---\n\n"));
    output.push('\n');

    log::debug!(
        "Reorganized {} slides with {} index entries",
        slides.len(),
        toc_entries
    );

    Ok(Reorganized {
        markdown: output,
        slide_count: slides.len(),
        toc_entries,
        dividers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::SlideParser;

    fn plan() -> SectionPlan {
        SectionPlan::from_toml_str(
            r#"
course_title = "Class 3 – Data Visualization"
course_subtitle = "Perception"

[[sections]]
name = "Part1"
title = "Part 1: Perception"
description = "d"
first_slide = 1
last_slide = 2

[[sections]]
name = "Part2"
title = "Part 2: Encodings"
description = "d"
first_slide = 3
last_slide = 3
"#,
        )
        .unwrap()
    }

    const DOC: &str = "# Old Header\nno slide heading here\n---\n## Slide 1 – Preattentive Processing\n- pop out\n---\n## Slide 2 - Gestalt: Proximity\n- grouping\n---\n## Slide 3 – Data Types\n- nominal\n";

    #[test]
    fn test_strip_heading_numbers() {
        assert_eq!(
            strip_heading_numbers("## Slide 4 – Color\ntext\n## Other"),
            "## Color\ntext\n## Other"
        );
    }

    #[test]
    fn test_reorganize_counts() {
        let result = reorganize(DOC, &plan()).unwrap();
        assert_eq!(result.slide_count, 3);
        assert_eq!(result.toc_entries, 3);
        assert_eq!(result.dividers, 2);
    }

    #[test]
    fn test_reorganize_output() {
        let md = reorganize(DOC, &plan()).unwrap().markdown;
        assert!(md.starts_with("# Class 3 – Data Visualization\n## Perception\n"));
        assert!(!md.contains("Slide 1 –"));
        assert!(!md.contains("Old Header"));
        assert!(md.contains("- [Part 1: Perception](#part-1-perception)"));
        assert!(md.contains("- [Gestalt: Proximity](#gestalt-proximity)"));
        assert!(md.contains("### Part 2: Encodings (Slides 3-3)"));
        assert!(md.contains("# PART 2: ENCODINGS\n# Slides 3-3"));

        let banner = md.find("# PART 2: ENCODINGS").unwrap();
        let slide3 = md.find("## Data Types").unwrap();
        assert!(banner < slide3);
    }

    #[test]
    fn test_reorganize_rejects_slide_zero() {
        let mut plan = plan();
        plan.sections[0].first_slide = 0;
        let err = reorganize(DOC, &plan).unwrap_err();
        assert!(err.to_string().contains("starts at slide 0"));
    }

    #[test]
    fn test_reorganize_rejects_overlap() {
        let mut plan = plan();
        plan.sections[1].first_slide = 2;
        assert!(reorganize(DOC, &plan).is_err());
    }

    #[test]
    fn test_slide_zero_index_is_skipped() {
        let mut plan = plan();
        plan.sections[0].first_slide = 0;
        let titles = vec!["Only".to_string()];
        let (_, entries) = table_of_contents(&plan, &titles);
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_reorganized_slides_still_parse() {
        let md = reorganize(DOC, &plan()).unwrap().markdown;
        let titles: Vec<String> = SlideParser::new()
            .parse_deck(&md)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert!(titles.contains(&"Preattentive Processing".to_string()));
        assert!(titles.contains(&"Data Types".to_string()));
    }
}
