//! Markdown slide extraction.
//!
//! Lecture notes are a single markdown file where slides are separated by a
//! `---` line and each slide starts with a `## ` heading.

use crate::clean::clean_bullet;
use crate::{Bullet, Error, ImageRef, Result, Slide, SlideDigest};
use regex::Regex;
use std::sync::LazyLock;

/// Slide separator: a line holding only `---`.
static SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n---\n").unwrap());

/// A numbered slide heading, preferred over any other `## ` heading.
static NUMBERED_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (Slide \d+.*?)[ \t]*$").unwrap());

/// Any level-two heading.
static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*?)[ \t]*$").unwrap());

/// Image reference `![alt](path)`.
static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());

/// Characters stripped from fallback key points.
static MARKUP_CHARS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*`]+").unwrap());

/// Title used when a section has no heading at all.
pub const DEFAULT_FALLBACK_TITLE: &str = "Untitled Slide";

/// Maximum number of key points kept in a digest.
const MAX_POINTS: usize = 3;

/// Plain lines shorter than this are not used as fallback key points.
const MIN_FALLBACK_POINT_LEN: usize = 20;

/// Split a markdown document into trimmed, non-empty slide sections.
pub fn split_slides(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n");
    SEPARATOR_REGEX
        .split(&normalized)
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find every image reference in a piece of markdown.
pub fn image_refs(text: &str) -> Vec<ImageRef> {
    IMAGE_REGEX
        .captures_iter(text)
        .map(|caps| ImageRef::new(&caps[1], &caps[2]))
        .collect()
}

/// Remove every image reference from a piece of markdown.
pub fn strip_images(text: &str) -> String {
    IMAGE_REGEX.replace_all(text, "").trim().to_string()
}

/// Extract bullet items from slide body text.
///
/// A `- ` item indented by two or more spaces is a sub-bullet.
pub fn extract_bullets(body: &str) -> Vec<Bullet> {
    body.lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            let text = trimmed.strip_prefix('-')?;
            let indent = line.len() - trimmed.len();
            let level = if indent >= 2 { 1 } else { 0 };
            Some(Bullet::new(level, text.trim()))
        })
        .filter(|b| !b.text.is_empty())
        .collect()
}

/// Parser turning lecture-note markdown into slides.
#[derive(Debug, Clone)]
pub struct SlideParser {
    /// Title given to sections without any heading.
    fallback_title: String,
}

impl Default for SlideParser {
    fn default() -> Self {
        Self {
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        }
    }
}

impl SlideParser {
    /// Create a parser with the default fallback title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title used for sections without headings.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Parse one section into a slide.
    ///
    /// Returns `None` for sections without a `## ` heading, such as the
    /// document header.
    pub fn parse_slide(&self, section: &str, number: usize) -> Option<Slide> {
        let caps = NUMBERED_TITLE_REGEX
            .captures(section)
            .or_else(|| TITLE_REGEX.captures(section))?;
        let heading = caps.get(0)?;
        let title = caps[1].trim().to_string();

        let rest = &section[heading.end()..];
        let image = image_refs(rest).into_iter().next();
        let body = strip_images(rest);
        let bullets = extract_bullets(&body);

        Some(Slide {
            number,
            title,
            body,
            bullets,
            image,
        })
    }

    /// Parse a whole document, numbering accepted slides from 1.
    pub fn parse_deck(&self, content: &str) -> Vec<Slide> {
        let mut slides = Vec::new();
        for section in split_slides(content) {
            if let Some(slide) = self.parse_slide(&section, slides.len() + 1) {
                slides.push(slide);
            } else {
                log::debug!("Skipping section without a slide heading");
            }
        }
        slides
    }

    /// Condense one section into a title and up to three key points.
    pub fn digest(&self, section: &str, number: usize) -> SlideDigest {
        let lines: Vec<&str> = section
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let h2 = lines.iter().find_map(|l| l.strip_prefix("## "));
        let h1 = lines.iter().find_map(|l| l.strip_prefix("# "));
        let title = h2
            .or(h1)
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| self.fallback_title.clone());

        let mut points: Vec<String> = lines
            .iter()
            .filter_map(|l| l.strip_prefix("- "))
            .map(clean_bullet)
            .collect();

        if points.is_empty() {
            for line in &lines {
                if line.starts_with('#') || line.starts_with('!') || line.starts_with("```") {
                    continue;
                }
                if line.chars().count() > MIN_FALLBACK_POINT_LEN {
                    points.push(MARKUP_CHARS_REGEX.replace_all(line, "").to_string());
                }
                if points.len() >= MAX_POINTS {
                    break;
                }
            }
        }
        points.truncate(MAX_POINTS);

        SlideDigest {
            number,
            title,
            points,
            text: section.to_string(),
        }
    }

    /// Digest every section of a document, numbering all sections from 1.
    pub fn digest_all(&self, content: &str) -> Vec<SlideDigest> {
        split_slides(content)
            .iter()
            .enumerate()
            .map(|(idx, section)| self.digest(section, idx + 1))
            .collect()
    }

    /// Digest a single 1-based section of a document.
    pub fn digest_one(&self, content: &str, number: usize) -> Result<SlideDigest> {
        let sections = split_slides(content);
        if number == 0 || number > sections.len() {
            return Err(Error::SlideOutOfRange {
                requested: number,
                available: sections.len(),
            });
        }
        Ok(self.digest(&sections[number - 1], number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Class 3 – Data Visualization\nIntro text\n\n---\n\n## Slide 1 – Why Visualize?\n- **Patterns** pop out\n- Faster than tables\n  - sub point\n\n---\n\n## Gestalt\n![Proximity](images/gestalt_proximity.png)\nObjects close together group.\n";

    #[test]
    fn test_split_slides() {
        let parts = split_slides(DOC);
        assert_eq!(parts.len(), 3);
        assert!(parts[0].starts_with("# Class 3"));
        assert!(parts[2].starts_with("## Gestalt"));
    }

    #[test]
    fn test_split_slides_crlf_and_empty() {
        let parts = split_slides("## A\r\n---\r\n\r\n---\r\n## B");
        assert_eq!(parts, vec!["## A", "## B"]);
    }

    #[test]
    fn test_n_separators_yield_n_plus_one_slides() {
        let doc = (1..=5)
            .map(|i| format!("## Slide {}\n- point", i))
            .collect::<Vec<_>>()
            .join("\n---\n");
        assert_eq!(SlideParser::new().parse_deck(&doc).len(), 5);
    }

    #[test]
    fn test_parse_deck_skips_header() {
        let slides = SlideParser::new().parse_deck(DOC);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].number, 1);
        assert_eq!(slides[0].title, "Slide 1 – Why Visualize?");
        assert_eq!(slides[1].number, 2);
        assert_eq!(slides[1].title, "Gestalt");
    }

    #[test]
    fn test_parse_slide_bullets() {
        let slides = SlideParser::new().parse_deck(DOC);
        let bullets = &slides[0].bullets;
        assert_eq!(bullets.len(), 3);
        assert_eq!(bullets[0], Bullet::new(0, "**Patterns** pop out"));
        assert_eq!(bullets[2], Bullet::new(1, "sub point"));
    }

    #[test]
    fn test_parse_slide_image() {
        let slides = SlideParser::new().parse_deck(DOC);
        let slide = &slides[1];
        assert_eq!(
            slide.image,
            Some(ImageRef::new("Proximity", "images/gestalt_proximity.png"))
        );
        assert_eq!(slide.body, "Objects close together group.");
    }

    #[test]
    fn test_numbered_heading_preferred() {
        let section = "## Overview\nstuff\n## Slide 7 – Real Title\nmore";
        let slide = SlideParser::new().parse_slide(section, 1).unwrap();
        assert_eq!(slide.title, "Slide 7 – Real Title");
        assert_eq!(slide.body, "more");
    }

    #[test]
    fn test_level_three_heading_is_not_a_slide() {
        assert!(SlideParser::new().parse_slide("### Detail\ntext", 1).is_none());
    }

    #[test]
    fn test_level_three_slide_heading_is_not_a_title() {
        for line in ["### Slide 4 – Sub point", "#### Slide 5"] {
            assert!(!NUMBERED_TITLE_REGEX.is_match(line), "{}", line);
            assert!(!TITLE_REGEX.is_match(line), "{}", line);
        }
        assert!(SlideParser::new().parse_slide("### Slide 4 – Sub point\ntext", 1).is_none());

        let section = "### Slide 4 – Sub point\n## Real Title\nbody";
        let slide = SlideParser::new().parse_slide(section, 1).unwrap();
        assert_eq!(slide.title, "Real Title");
        assert_eq!(slide.body, "body");
    }

    #[test]
    fn test_digest_with_bullets() {
        let parser = SlideParser::new();
        let digest = parser.digest("## Missing Data\n- **MCAR** random\n- `df.isna()` checks\n- three\n- four", 4);
        assert_eq!(digest.number, 4);
        assert_eq!(digest.title, "Missing Data");
        assert_eq!(digest.points, vec!["MCAR random", "df.isna() checks", "three"]);
    }

    #[test]
    fn test_digest_title_fallbacks() {
        let parser = SlideParser::new().with_fallback_title("Class 4 Slide");
        assert_eq!(parser.digest("# Top Heading\ntext", 1).title, "Top Heading");
        assert_eq!(parser.digest("just some text", 1).title, "Class 4 Slide");
    }

    #[test]
    fn test_digest_plain_line_fallback() {
        let parser = SlideParser::new();
        let section = "## Title\nshort\n```python\nThis is a **long enough** plain line here\n![img](a.png)\nAnother sufficiently long plain line";
        let digest = parser.digest(section, 1);
        assert_eq!(
            digest.points,
            vec![
                "This is a long enough plain line here",
                "Another sufficiently long plain line"
            ]
        );
    }

    #[test]
    fn test_digest_one_out_of_range() {
        let parser = SlideParser::new();
        let err = parser.digest_one("## A\n---\n## B", 3).unwrap_err();
        assert!(matches!(
            err,
            Error::SlideOutOfRange {
                requested: 3,
                available: 2
            }
        ));
        assert!(parser.digest_one("## A", 0).is_err());
        assert_eq!(parser.digest_one("## A\n---\n## B", 2).unwrap().title, "B");
    }

    #[test]
    fn test_strip_images() {
        assert_eq!(strip_images("a ![x](y.png) b"), "a  b");
        assert_eq!(image_refs("![one](1.png) and ![two](2.png)").len(), 2);
    }
}
