//! Section plans: how a course's slides are grouped into parts.
//!
//! A plan is either the built-in four-part layout or loaded from TOML:
//!
//! ```toml
//! course_title = "Class 3: Data Visualization"
//! course_subtitle = "Visual Perception, Cognitive Load & Python Fundamentals"
//!
//! [[sections]]
//! name = "Part1_Visual_Perception"
//! title = "Part 1: Visual Perception"
//! description = "How humans perceive visual information"
//! first_slide = 1
//! last_slide = 21
//! topics = ["Preattentive processing"]
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::ops::RangeInclusive;
use std::path::Path;

/// A contiguous run of slides taught as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Folder and file stem, e.g. `Part1_Visual_Perception_Cognitive_Load`.
    pub name: String,

    /// Human-readable title.
    pub title: String,

    /// One-line summary shown on title and navigation slides.
    pub description: String,

    /// First slide number (1-based, inclusive).
    pub first_slide: usize,

    /// Last slide number (inclusive).
    pub last_slide: usize,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub key_learning: Option<String>,
}

impl Section {
    pub fn slide_numbers(&self) -> RangeInclusive<usize> {
        self.first_slide..=self.last_slide
    }

    /// Number of slides covered by the section.
    pub fn len(&self) -> usize {
        if self.last_slide < self.first_slide {
            0
        } else {
            self.last_slide - self.first_slide + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, slide: usize) -> bool {
        self.slide_numbers().contains(&slide)
    }

    /// Path of the section deck relative to the sections root.
    pub fn deck_path(&self) -> String {
        format!("{}/{}.pptx", self.name, self.name)
    }
}

/// The full grouping of a course deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPlan {
    pub course_title: String,

    #[serde(default)]
    pub course_subtitle: String,

    pub sections: Vec<Section>,
}

impl Default for SectionPlan {
    fn default() -> Self {
        Self {
            course_title: "Class 3: Data Visualization".to_string(),
            course_subtitle: "Visual Perception, Cognitive Load & Python Fundamentals".to_string(),
            sections: vec![
                Section {
                    name: "Part1_Visual_Perception_Cognitive_Load".to_string(),
                    title: "Part 1: Visual Perception & Cognitive Load".to_string(),
                    description: "How humans perceive visual information and process data"
                        .to_string(),
                    first_slide: 1,
                    last_slide: 21,
                    topics: vec![
                        "Preattentive processing and the 200ms window".to_string(),
                        "Visual attention limitations".to_string(),
                        "Change blindness and inattentional blindness".to_string(),
                        "Gestalt principles of grouping".to_string(),
                        "Cognitive load theory (intrinsic, extraneous, germane)".to_string(),
                        "Dashboard design principles".to_string(),
                    ],
                    key_learning: Some(
                        "Understand how humans perceive and process visual information".to_string(),
                    ),
                },
                Section {
                    name: "Part2_Data_Types_Encodings".to_string(),
                    title: "Part 2: Data Types & Visual Encodings".to_string(),
                    description:
                        "Understanding data types and choosing effective visual encodings"
                            .to_string(),
                    first_slide: 22,
                    last_slide: 33,
                    topics: vec![
                        "Four fundamental data types (Nominal, Ordinal, Quantitative, Temporal)"
                            .to_string(),
                        "Bertin's visual variables".to_string(),
                        "Cleveland & McGill's ranking of visual encodings".to_string(),
                        "Why color is weak for quantitative data".to_string(),
                        "Data × Task × Encoding framework".to_string(),
                        "Common encoding violations".to_string(),
                    ],
                    key_learning: Some(
                        "Match data types to appropriate visual encodings".to_string(),
                    ),
                },
                Section {
                    name: "Part3_Grammar_of_Graphics".to_string(),
                    title: "Part 3: Grammar of Graphics Framework".to_string(),
                    description: "Compositional approach to building visualizations".to_string(),
                    first_slide: 34,
                    last_slide: 44,
                    topics: vec![
                        "Introduction to Grammar of Graphics".to_string(),
                        "Seven core components (Data, Aesthetics, Geoms, Stats, Scales, Coordinates, Facets)"
                            .to_string(),
                        "Compositional thinking vs. chart templates".to_string(),
                        "How grammar reduces cognitive load".to_string(),
                        "Systematic approach to visualization design".to_string(),
                    ],
                    key_learning: Some("Think in layers and mappings, not chart types".to_string()),
                },
                Section {
                    name: "Part4_Python_Implementation".to_string(),
                    title: "Part 4: Python Visualization Implementation".to_string(),
                    description: "Hands-on Python with Matplotlib and Seaborn".to_string(),
                    first_slide: 45,
                    last_slide: 84,
                    topics: vec![
                        "Python visualization ecosystem".to_string(),
                        "Matplotlib anatomy and fundamentals".to_string(),
                        "Seaborn for statistical graphics".to_string(),
                        "Applying perception principles in code".to_string(),
                        "Color palette selection".to_string(),
                        "Reducing clutter and cognitive load".to_string(),
                        "Direct labeling vs. legends".to_string(),
                    ],
                    key_learning: Some("Implement perception-based design in Python".to_string()),
                },
            ],
        }
    }
}

impl SectionPlan {
    /// Parse and validate a plan from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let plan: SectionPlan = toml::from_str(text)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Load and validate a plan from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loaded section plan from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Load a plan from `path` when given, else use the built-in plan.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Reject empty plans, inverted ranges, slide 0 and overlapping sections.
    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::ConfigError("section plan has no sections".to_string()));
        }

        for section in &self.sections {
            if section.name.trim().is_empty() {
                return Err(Error::ConfigError("section with an empty name".to_string()));
            }
            if section.first_slide == 0 {
                return Err(Error::ConfigError(format!(
                    "section '{}' starts at slide 0; slides are numbered from 1",
                    section.name
                )));
            }
            if section.last_slide < section.first_slide {
                return Err(Error::ConfigError(format!(
                    "section '{}' ends before it starts ({}..{})",
                    section.name, section.first_slide, section.last_slide
                )));
            }
        }

        let mut ordered: Vec<&Section> = self.sections.iter().collect();
        ordered.sort_by_key(|s| s.first_slide);
        for pair in ordered.windows(2) {
            if pair[1].first_slide <= pair[0].last_slide {
                return Err(Error::ConfigError(format!(
                    "sections '{}' and '{}' overlap",
                    pair[0].name, pair[1].name
                )));
            }
        }

        Ok(())
    }

    /// The section containing a slide, if any.
    pub fn section_for(&self, slide: usize) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains(slide))
    }

    /// Total number of slides across all sections.
    pub fn total_slides(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// README describing the sectioned decks.
    pub fn readme_markdown(&self, master_file: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {} - Sectioned Presentations\n", self.course_title);
        let _ = writeln!(
            out,
            "This directory contains the course content divided into {} sections for easier navigation and teaching.\n",
            self.sections.len()
        );
        let _ = writeln!(out, "## Master Navigation");
        let _ = writeln!(out, "- **{}** - Overview and links to all sections\n", master_file);
        let _ = writeln!(out, "## Section Breakdown\n");

        for section in &self.sections {
            let _ = writeln!(
                out,
                "### {} (Slides {}-{})",
                section.title, section.first_slide, section.last_slide
            );
            let _ = writeln!(out, "**File**: `{}`", section.deck_path());
            if !section.topics.is_empty() {
                let _ = writeln!(out, "**Topics**:");
                for topic in &section.topics {
                    let _ = writeln!(out, "- {}", topic);
                }
            }
            if let Some(learning) = &section.key_learning {
                let _ = writeln!(out, "\n**Key Learning**: {}", learning);
            }
            let _ = writeln!(out, "\n---\n");
        }

        let _ = writeln!(out, "## Usage\n");
        let _ = writeln!(out, "### For Modular Teaching:");
        let _ = writeln!(out, "1. Start with `{}` to show course structure", master_file);
        let _ = writeln!(out, "2. Teach each part separately over multiple sessions");
        let _ = writeln!(out, "3. Each section is self-contained\n");

        let _ = writeln!(out, "## File Structure\n");
        let _ = writeln!(out, "```");
        let _ = writeln!(out, "sections/");
        let _ = writeln!(out, "├── {}", master_file);
        for (idx, section) in self.sections.iter().enumerate() {
            let last = idx + 1 == self.sections.len();
            let (branch, indent) = if last { ("└──", "    ") } else { ("├──", "│   ") };
            let _ = writeln!(out, "{} {}/", branch, section.name);
            let _ = writeln!(out, "{}├── {}.pptx", indent, section.name);
            let _ = writeln!(
                out,
                "{}└── slide_{:03}.png through slide_{:03}.png",
                indent, section.first_slide, section.last_slide
            );
        }
        let _ = writeln!(out, "```\n");

        let _ = writeln!(
            out,
            "**Total**: {} slides across {} sections + 1 master navigation",
            self.total_slides(),
            self.sections.len()
        );

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PLAN_TOML: &str = r#"
course_title = "Class 4: EDA"

[[sections]]
name = "Part1_Foundations"
title = "Part 1: Foundations"
description = "Why explore first"
first_slide = 1
last_slide = 10
topics = ["EDA cycle"]

[[sections]]
name = "Part2_Practice"
title = "Part 2: Practice"
description = "Hands-on"
first_slide = 11
last_slide = 25
"#;

    #[test]
    fn test_default_plan_is_valid() {
        let plan = SectionPlan::default();
        plan.validate().unwrap();
        assert_eq!(plan.sections.len(), 4);
        assert_eq!(plan.total_slides(), 84);
        assert_eq!(plan.sections[1].len(), 12);
    }

    #[test]
    fn test_from_toml() {
        let plan = SectionPlan::from_toml_str(PLAN_TOML).unwrap();
        assert_eq!(plan.course_title, "Class 4: EDA");
        assert_eq!(plan.course_subtitle, "");
        assert_eq!(plan.sections.len(), 2);
        assert_eq!(plan.sections[0].topics, vec!["EDA cycle"]);
        assert!(plan.sections[1].topics.is_empty());
        assert_eq!(plan.section_for(11).unwrap().name, "Part2_Practice");
        assert!(plan.section_for(26).is_none());
    }

    #[test]
    fn test_overlap_rejected() {
        let text = PLAN_TOML.replace("first_slide = 11", "first_slide = 10");
        let err = SectionPlan::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let text = PLAN_TOML.replace("last_slide = 25", "last_slide = 5");
        assert!(SectionPlan::from_toml_str(&text).is_err());
    }

    #[test]
    fn test_empty_plan_rejected() {
        assert!(SectionPlan::from_toml_str("course_title = \"x\"\nsections = []").is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SectionPlan::from_toml_str("course_title = ").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PLAN_TOML.as_bytes()).unwrap();
        let plan = SectionPlan::load(file.path()).unwrap();
        assert_eq!(plan.sections[0].deck_path(), "Part1_Foundations/Part1_Foundations.pptx");
    }

    #[test]
    fn test_load_missing_file() {
        let err = SectionPlan::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }

    #[test]
    fn test_readme_mentions_every_section() {
        let plan = SectionPlan::default();
        let readme = plan.readme_markdown("00_Master_Navigation.pptx");
        for section in &plan.sections {
            assert!(readme.contains(&section.title));
            assert!(readme.contains(&section.deck_path()));
        }
        assert!(readme.contains("**Total**: 84 slides across 4 sections"));
        assert!(readme.contains("└── Part4_Python_Implementation/"));
    }
}
