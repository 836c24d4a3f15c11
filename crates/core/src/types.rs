//! Domain types for representing slides parsed from lecture notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single slide extracted from a markdown document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number among the accepted slides.
    pub number: usize,

    /// Heading text, without the leading `## `.
    pub title: String,

    /// Everything after the heading, with image references removed.
    pub body: String,

    /// Bullet items found in the body, in document order.
    pub bullets: Vec<Bullet>,

    /// First image referenced by the slide, if any.
    pub image: Option<ImageRef>,
}

impl Slide {
    /// Create a slide with a title and no content.
    pub fn new(number: usize, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            body: String::new(),
            bullets: Vec::new(),
            image: None,
        }
    }

    /// Whether the slide references a local image file.
    pub fn has_local_image(&self) -> bool {
        self.image.as_ref().is_some_and(|img| !img.is_remote())
    }

    /// Non-empty body lines, untrimmed so indentation survives.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines().filter(|l| !l.trim().is_empty())
    }
}

/// A bullet item with its nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    /// 0 for a top-level item, 1 for an indented item.
    pub level: u8,

    /// Item text with the list marker removed.
    pub text: String,
}

impl Bullet {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// An image reference of the form `![alt](path)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub alt: String,
    pub path: String,
}

impl ImageRef {
    pub fn new(alt: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            path: path.into(),
        }
    }

    /// True for http(s) links, which are never loaded from disk.
    pub fn is_remote(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }

    /// File name component of the path, used for placeholder labels.
    pub fn file_name(&self) -> &str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(&self.path)
    }
}

/// Condensed view of a slide: a title and a few key points.
///
/// Illustrated slide styles only have room for this much text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDigest {
    /// 1-based position of the section in the document.
    pub number: usize,

    pub title: String,

    /// At most three short points.
    pub points: Vec<String>,

    /// The raw section text, kept for theme detection.
    pub text: String,
}

/// Keyword-matched label that picks the illustration motif of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Missing,
    Correlation,
    Distribution,
    Outlier,
    Comparison,
    Workflow,
    Exercise,
    Code,
    Summary,
    Assignment,
    General,
}

impl Theme {
    /// Lowercase label as shown on slide images.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Missing => "missing",
            Theme::Correlation => "correlation",
            Theme::Distribution => "distribution",
            Theme::Outlier => "outlier",
            Theme::Comparison => "comparison",
            Theme::Workflow => "workflow",
            Theme::Exercise => "exercise",
            Theme::Code => "code",
            Theme::Summary => "summary",
            Theme::Assignment => "assignment",
            Theme::General => "general",
        }
    }

    /// Label with the first letter capitalised.
    pub fn title_case(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "missing" => Ok(Theme::Missing),
            "correlation" => Ok(Theme::Correlation),
            "distribution" => Ok(Theme::Distribution),
            "outlier" => Ok(Theme::Outlier),
            "comparison" => Ok(Theme::Comparison),
            "workflow" => Ok(Theme::Workflow),
            "exercise" => Ok(Theme::Exercise),
            "code" => Ok(Theme::Code),
            "summary" => Ok(Theme::Summary),
            "assignment" => Ok(Theme::Assignment),
            "general" => Ok(Theme::General),
            other => Err(crate::Error::ConfigError(format!("unknown theme '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ref_remote() {
        assert!(ImageRef::new("", "https://example.com/a.png").is_remote());
        assert!(ImageRef::new("", "http://example.com/a.png").is_remote());
        assert!(!ImageRef::new("", "images/a.png").is_remote());
    }

    #[test]
    fn test_image_ref_file_name() {
        assert_eq!(ImageRef::new("", "images/gestalt.png").file_name(), "gestalt.png");
        assert_eq!(ImageRef::new("", "plain.png").file_name(), "plain.png");
    }

    #[test]
    fn test_has_local_image() {
        let mut slide = Slide::new(1, "Title");
        assert!(!slide.has_local_image());
        slide.image = Some(ImageRef::new("x", "images/x.png"));
        assert!(slide.has_local_image());
        slide.image = Some(ImageRef::new("x", "https://x.org/x.png"));
        assert!(!slide.has_local_image());
    }

    #[test]
    fn test_theme_round_trip_names() {
        assert_eq!("Correlation".parse::<Theme>().unwrap(), Theme::Correlation);
        assert_eq!(Theme::Workflow.title_case(), "Workflow");
        assert!("nonsense".parse::<Theme>().is_err());
    }
}
