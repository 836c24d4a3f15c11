//! Core domain types, markdown slide extraction, text cleaning, theme
//! detection and section plans for course deck generation.

pub mod clean;
pub mod error;
pub mod markdown;
pub mod reorganize;
pub mod sections;
pub mod theme;
pub mod types;

pub use error::{Error, Result};
pub use markdown::SlideParser;
pub use reorganize::{reorganize, Reorganized};
pub use sections::{Section, SectionPlan};
pub use theme::detect_theme;
pub use types::{Bullet, ImageRef, Slide, SlideDigest, Theme};
