//! Standalone HTML pages from lecture-note markdown, optionally with every
//! local image inlined so the page works as a single file.

pub mod convert;
pub mod embed;

pub use convert::{convert_file, render_page, HtmlOptions, Page};
pub use embed::{embed_images, Embedded};
