//! Figures for course decks: a small scene model rendered to PNG, slide image
//! styles, concept diagrams and synthetic exercise datasets.

pub mod art;
pub mod datasets;
pub mod diagrams;
pub mod raster;
pub mod scene;
pub mod stats;

pub use art::{render_slide_images, slide_file_name, SlideArtist, SlideStyle};
pub use datasets::DatasetSummary;
pub use diagrams::Diagram;
pub use raster::{render_png, render_png_bytes, to_svg};
pub use scene::{Item, Scene, Shape};
