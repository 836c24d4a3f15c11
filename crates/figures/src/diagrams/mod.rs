//! Concept diagrams for the perception and EDA lectures.
//!
//! Each diagram is a named builder that draws a [`Scene`] from a seeded
//! random generator, so repeated runs produce identical PNGs.

mod attention;
mod eda;
mod eda_charts;
mod encoding;
mod exercises;
mod palette;
mod panel;
mod perception;

pub use panel::{nice_ticks, tick_label, Panel};

use crate::raster::render_png;
use crate::scene::{paint, HAlign, Item, Scene, VAlign};
use csscolorparser::Color;
use deck_core::{Error, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// Seed used for every diagram unless another is given.
pub const DEFAULT_SEED: u64 = 42;

/// A named diagram builder.
pub struct Diagram {
    pub name: &'static str,
    pub description: &'static str,
    builder: fn(&mut SmallRng) -> Result<Scene>,
}

impl Diagram {
    /// Build the scene with a generator seeded from `seed`.
    pub fn build(&self, seed: u64) -> Result<Scene> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (self.builder)(&mut rng)
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }
}

impl std::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagram")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

static CATALOG: &[Diagram] = &[
    Diagram {
        name: "preattentive_popout",
        description: "One red circle among fifty blue ones",
        builder: perception::preattentive_popout,
    },
    Diagram {
        name: "gestalt_proximity",
        description: "Three clusters of dots grouped by distance",
        builder: perception::gestalt_proximity,
    },
    Diagram {
        name: "gestalt_similarity",
        description: "Alternating colour columns read as groups",
        builder: perception::gestalt_similarity,
    },
    Diagram {
        name: "gestalt_enclosure",
        description: "Two enclosed regions of scattered dots",
        builder: perception::gestalt_enclosure,
    },
    Diagram {
        name: "gestalt_connection",
        description: "Connected markers against loose circles",
        builder: perception::gestalt_connection,
    },
    Diagram {
        name: "cognitive_load_balance",
        description: "Intrinsic, extraneous and germane load in a fixed capacity",
        builder: perception::cognitive_load_balance,
    },
    Diagram {
        name: "encoding_effectiveness",
        description: "Ranking of visual encodings by accuracy",
        builder: perception::encoding_effectiveness,
    },
    Diagram {
        name: "data_types",
        description: "Nominal, ordinal, quantitative and temporal data",
        builder: perception::data_types,
    },
    Diagram {
        name: "grammar_layers",
        description: "Layers of the grammar of graphics",
        builder: perception::grammar_layers,
    },
    Diagram {
        name: "data_task_encoding",
        description: "Data type plus user task gives the encoding",
        builder: perception::data_task_encoding,
    },
    Diagram {
        name: "eda_cycle",
        description: "Question, explore, analyze and refine as a loop",
        builder: eda::eda_cycle,
    },
    Diagram {
        name: "eda_workflow",
        description: "Where EDA sits in the analytics workflow",
        builder: eda::eda_workflow,
    },
    Diagram {
        name: "distribution_shapes",
        description: "Histograms of six common distribution shapes",
        builder: eda::distribution_shapes,
    },
    Diagram {
        name: "correlation_heatmap",
        description: "Full, triangular and thresholded correlation matrices",
        builder: eda::correlation_heatmap,
    },
    Diagram {
        name: "anscombes_quartet",
        description: "Four datasets with identical summary statistics",
        builder: eda::anscombes_quartet,
    },
    Diagram {
        name: "missing_data_types",
        description: "MCAR, MAR and MNAR with examples and impact",
        builder: eda::missing_data_types,
    },
    Diagram {
        name: "data_decision_pipeline",
        description: "From raw data through perception to a decision",
        builder: attention::data_decision_pipeline,
    },
    Diagram {
        name: "visual_processing_pathways",
        description: "Preattentive and attentive processing stages",
        builder: attention::visual_processing_pathways,
    },
    Diagram {
        name: "attention_limits",
        description: "Working memory holds only a handful of items",
        builder: attention::attention_limits,
    },
    Diagram {
        name: "selective_attention",
        description: "Focus on one signal while filtering the rest",
        builder: attention::selective_attention,
    },
    Diagram {
        name: "change_blindness",
        description: "Two frames differing in a single element",
        builder: attention::change_blindness,
    },
    Diagram {
        name: "inattentional_blindness",
        description: "An unexpected object missed while counting",
        builder: attention::inattentional_blindness,
    },
    Diagram {
        name: "feature_search_easy",
        description: "A red target among blue distractors",
        builder: attention::feature_search_easy,
    },
    Diagram {
        name: "conjunction_search_difficult",
        description: "A red square among red circles and blue squares",
        builder: attention::conjunction_search_difficult,
    },
    Diagram {
        name: "preattentive_comparison",
        description: "Colour, size, shape and orientation pop-out",
        builder: attention::preattentive_comparison,
    },
    Diagram {
        name: "gestalt_overview",
        description: "Six Gestalt principles side by side",
        builder: attention::gestalt_overview,
    },
    Diagram {
        name: "ordinal_data",
        description: "Ordered categories on a sequential palette",
        builder: encoding::ordinal_data,
    },
    Diagram {
        name: "quantitative_encodings",
        description: "Position, length, angle and area for the same values",
        builder: encoding::quantitative_encodings,
    },
    Diagram {
        name: "time_series",
        description: "Monthly values along a time axis",
        builder: encoding::time_series,
    },
    Diagram {
        name: "bertin_variables",
        description: "Bertin's seven visual variables",
        builder: encoding::bertin_variables,
    },
    Diagram {
        name: "cleveland_mcgill",
        description: "Cleveland and McGill accuracy ranking",
        builder: encoding::cleveland_mcgill,
    },
    Diagram {
        name: "color_perception",
        description: "Sequential, diverging and qualitative palettes",
        builder: encoding::color_perception,
    },
    Diagram {
        name: "matplotlib_anatomy",
        description: "Parts of a chart labelled",
        builder: encoding::matplotlib_anatomy,
    },
    Diagram {
        name: "bad_visualization_exercise",
        description: "A cluttered pie chart to critique",
        builder: encoding::bad_visualization_exercise,
    },
    Diagram {
        name: "task_viz_matrix",
        description: "Analysis tasks paired with chart types",
        builder: eda::task_viz_matrix,
    },
    Diagram {
        name: "data_quality_issues",
        description: "Common data quality problems and fixes",
        builder: eda::data_quality_issues,
    },
    Diagram {
        name: "bivariate_matrix",
        description: "Chart choice by pair of variable types",
        builder: eda::bivariate_matrix,
    },
    Diagram {
        name: "missing_data_handling",
        description: "Deletion and imputation strategies",
        builder: eda::missing_data_handling,
    },
    Diagram {
        name: "eda_workflow_template",
        description: "Step-by-step EDA checklist",
        builder: eda::eda_workflow_template,
    },
    Diagram {
        name: "eda_best_practices",
        description: "Do and don't lists for EDA",
        builder: eda::eda_best_practices,
    },
    Diagram {
        name: "common_eda_mistakes",
        description: "Frequent EDA mistakes and remedies",
        builder: eda::common_eda_mistakes,
    },
    Diagram {
        name: "data_type_eda",
        description: "EDA techniques by data type",
        builder: eda::data_type_eda,
    },
    Diagram {
        name: "eda_to_features",
        description: "Findings turned into engineered features",
        builder: eda::eda_to_features,
    },
    Diagram {
        name: "distribution_viz_comparison",
        description: "Histogram, KDE, box, violin and ECDF of one sample",
        builder: eda_charts::distribution_viz_comparison,
    },
    Diagram {
        name: "univariate_numeric",
        description: "Skewed prices with central tendency and Q-Q plot",
        builder: eda_charts::univariate_numeric,
    },
    Diagram {
        name: "skewness_transformations",
        description: "Log, square root and Box-Cox on skewed data",
        builder: eda_charts::skewness_transformations,
    },
    Diagram {
        name: "univariate_categorical",
        description: "Counts, pie and shares of customer segments",
        builder: eda_charts::univariate_categorical,
    },
    Diagram {
        name: "outlier_detection",
        description: "IQR, z-score and percentile outlier methods",
        builder: eda_charts::outlier_detection,
    },
    Diagram {
        name: "scatter_variations",
        description: "Scatter plots with fit, category and size encodings",
        builder: eda_charts::scatter_variations,
    },
    Diagram {
        name: "overplotting_solutions",
        description: "Alpha, small points, hexbin, density and sampling",
        builder: eda_charts::overplotting_solutions,
    },
    Diagram {
        name: "group_comparison",
        description: "Salary by department six ways",
        builder: eda_charts::group_comparison,
    },
    Diagram {
        name: "categorical_relationships",
        description: "Grouped, stacked and heatmap views of a crosstab",
        builder: eda_charts::categorical_relationships,
    },
    Diagram {
        name: "correlation_interpretation",
        description: "Scatter plots across correlation strengths",
        builder: eda_charts::correlation_interpretation,
    },
    Diagram {
        name: "pair_plot",
        description: "Pairwise scatter matrix with histograms",
        builder: eda_charts::pair_plot,
    },
    Diagram {
        name: "multivariate_encoding",
        description: "Colour, size and category on one scatter",
        builder: eda_charts::multivariate_encoding,
    },
    Diagram {
        name: "missing_data_visualization",
        description: "Missingness pattern, shares and correlation",
        builder: eda_charts::missing_data_visualization,
    },
    Diagram {
        name: "imputation_comparison",
        description: "Mean, median, random and nearest-neighbour imputation",
        builder: eda_charts::imputation_comparison,
    },
    Diagram {
        name: "exercise2_redesign_challenge",
        description: "Dashboard before and after removing extraneous load",
        builder: exercises::exercise2_redesign_challenge,
    },
    Diagram {
        name: "exercise3_grammar_example",
        description: "A line chart decomposed into grammar layers",
        builder: exercises::exercise3_grammar_example,
    },
    Diagram {
        name: "exercise4_color_palette",
        description: "Rainbow, sequential and diverging temperature maps",
        builder: exercises::exercise4_color_palette,
    },
    Diagram {
        name: "exercise5_preattentive_highlighting",
        description: "Grouped bars with Q4 highlighted",
        builder: exercises::exercise5_preattentive_highlighting,
    },
    Diagram {
        name: "exercise1_distribution",
        description: "Diagnosing a skewed transaction distribution",
        builder: exercises::exercise1_distribution,
    },
    Diagram {
        name: "exercise2_outliers",
        description: "Holiday revenue spikes investigated",
        builder: exercises::exercise2_outliers,
    },
    Diagram {
        name: "exercise3_relationships",
        description: "Correlates of house price",
        builder: exercises::exercise3_relationships,
    },
    Diagram {
        name: "exercise4_missing_data",
        description: "Survey missingness diagnosis and imputation",
        builder: exercises::exercise4_missing_data,
    },
    Diagram {
        name: "exercise5_eda_report",
        description: "Layout of a one-page EDA report",
        builder: exercises::exercise5_eda_report,
    },
];

/// Every known diagram, in generation order.
pub fn catalog() -> &'static [Diagram] {
    CATALOG
}

pub fn find(name: &str) -> Option<&'static Diagram> {
    CATALOG.iter().find(|d| d.name == name)
}

/// Names of every known diagram.
pub fn names() -> Vec<&'static str> {
    CATALOG.iter().map(|d| d.name).collect()
}

/// Render diagrams into `out_dir` as `<name>.png`.
///
/// An empty `only` renders the whole catalog. Names are checked before
/// anything is written.
pub fn generate(out_dir: impl AsRef<Path>, only: &[String], seed: u64) -> Result<Vec<PathBuf>> {
    let selected: Vec<&Diagram> = if only.is_empty() {
        CATALOG.iter().collect()
    } else {
        only.iter()
            .map(|name| {
                find(name).ok_or_else(|| {
                    Error::ConfigError(format!(
                        "Unknown diagram '{}'. Known diagrams: {}",
                        name,
                        names().join(", ")
                    ))
                })
            })
            .collect::<Result<_>>()?
    };

    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(selected.len());
    for diagram in selected {
        let scene = diagram.build(seed)?;
        let path = out_dir.join(diagram.file_name());
        render_png(&scene, &path)?;
        log::info!("Created {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// A CSS colour with its alpha replaced.
fn tinted(css: &str, alpha: f32) -> Color {
    let mut color = paint(css);
    color.a = alpha;
    color
}

fn heading(scene: &mut Scene, x: f64, y: f64, text: &str, size_pt: f64) {
    scene.text(x, y, text).size(size_pt).bold().ha(HAlign::Center).z(5);
}

/// Rounded box tinted with `color` and outlined in it.
fn tile<'a>(scene: &'a mut Scene, x: f64, y: f64, w: f64, h: f64, color: &str, fill_alpha: f32) -> &'a mut Item {
    scene
        .padded_box(x, y, w, h, 0.1, 0.1)
        .fill_color(tinted(color, fill_alpha))
        .stroke(color, 3.0)
}

/// Multi-line text hanging down and right from `(x, y)`.
fn block<'a>(scene: &'a mut Scene, x: f64, y: f64, text: &str, size_pt: f64) -> &'a mut Item {
    scene
        .text(x, y, text)
        .size(size_pt)
        .align(HAlign::Left, VAlign::Top)
        .z(5)
}

fn caption(scene: &mut Scene, x: f64, y: f64, text: &str) {
    scene
        .text(x, y, text)
        .size(11.0)
        .italic()
        .ha(HAlign::Center)
        .z(5);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_catalog_names_unique() {
        let names: HashSet<_> = catalog().iter().map(|d| d.name).collect();
        assert_eq!(names.len(), 66);
        assert_eq!(catalog().len(), 66);
        assert!(find("anscombes_quartet").is_some());
        assert!(find("pie_chart").is_none());
    }

    #[test]
    fn test_every_diagram_builds() {
        for diagram in catalog() {
            let scene = diagram.build(DEFAULT_SEED).unwrap();
            assert!(!scene.is_empty(), "{} is empty", diagram.name);
        }
    }

    #[test]
    fn test_every_diagram_renders_png() {
        for diagram in catalog() {
            let scene = diagram.build(DEFAULT_SEED).unwrap().with_dpi(40.0);
            let png = crate::raster::render_png_bytes(&scene).unwrap();
            assert!(png.starts_with(b"\x89PNG"), "{} is not a PNG", diagram.name);
            assert!(png.len() > 100, "{} rendered nothing", diagram.name);
        }
    }

    #[test]
    fn test_builds_are_reproducible() {
        let diagram = find("preattentive_popout").unwrap();
        assert_eq!(diagram.build(7).unwrap(), diagram.build(7).unwrap());
        assert_ne!(diagram.build(7).unwrap(), diagram.build(8).unwrap());
    }

    #[test]
    fn test_unknown_name_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("figures");
        let only = vec!["eda_cycle".to_string(), "nope".to_string()];
        let err = generate(&out, &only, DEFAULT_SEED).unwrap_err();
        assert!(err.to_string().contains("Unknown diagram 'nope'"));
        assert!(!out.exists());
    }

    #[test]
    fn test_generate_selected() {
        let dir = TempDir::new().unwrap();
        let only = vec!["gestalt_similarity".to_string()];
        let written = generate(dir.path(), &only, DEFAULT_SEED).unwrap();
        assert_eq!(written, vec![dir.path().join("gestalt_similarity.png")]);
        assert!(written[0].is_file());
    }

    #[test]
    fn test_tinted_keeps_rgb() {
        let color = tinted("#2E86AB", 0.2);
        assert_eq!(&color.to_rgba8()[..3], &[0x2E, 0x86, 0xAB]);
        assert!((color.a - 0.2).abs() < 1e-6);
    }
}
