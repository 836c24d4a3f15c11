//! PPTX (Office Open XML) output for course decks.
//!
//! Writes packages from positioned text boxes and pictures, composes decks
//! from markdown notes or rendered slide images, and reads packages back for
//! inspection.

pub mod compose;
mod parts;
pub mod reader;
pub mod writer;

pub use compose::{
    image_deck, markdown_deck, sectioned_decks, ComposeReport, DeckOptions, SectionReport,
};
pub use reader::{DeckReader, DeckSummary, SlideSummary};
pub use writer::{Align, DeckSlide, DeckWriter, Emu, Frame, Media, Paragraph, Shape};
