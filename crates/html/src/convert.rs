//! Markdown to styled HTML page conversion.

use crate::embed::{embed_images, Embedded};
use deck_core::{Error, Result};
use pulldown_cmark::{html, Options, Parser};
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");
const PAGE_NAME: &str = "page.html";

/// Banner shown at the top of self-contained pages.
pub const SELF_CONTAINED_BANNER: &str =
    "📦 Self-Contained HTML - All images embedded (no external files needed)";

/// Title used when neither the options nor the document provide one.
pub const DEFAULT_TITLE: &str = "Lecture Notes";

/// Page conversion settings.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Page title; the first `# ` heading when unset.
    pub title: Option<String>,
    /// Inline local images and show the self-contained banner.
    pub self_contained: bool,
    /// Directory image paths are resolved against.
    pub base_dir: PathBuf,
}

impl HtmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn self_contained(mut self, enabled: bool) -> Self {
        self.self_contained = enabled;
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }
}

/// A rendered page plus what happened to its images.
#[derive(Debug, Clone)]
pub struct Page {
    pub html: String,
    pub title: String,
    pub images: Embedded,
}

/// Text of the first level-one heading, if any.
pub fn document_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Markdown body to HTML with tables, footnotes, strikethrough and task lists.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render `markdown` as a complete styled HTML document.
pub fn render_page(markdown: &str, options: &HtmlOptions) -> Result<Page> {
    let title = options
        .title
        .clone()
        .or_else(|| document_title(markdown))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let images = if options.self_contained {
        let embedded = embed_images(markdown, &options.base_dir);
        log::info!(
            "Embedded {} images ({} missing)",
            embedded.embedded.len(),
            embedded.missing.len()
        );
        embedded
    } else {
        Embedded {
            markdown: markdown.to_string(),
            ..Embedded::default()
        }
    };

    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_NAME, PAGE_TEMPLATE)
        .map_err(|e| Error::TemplateError(format!("Invalid page template: {}", e)))?;

    let mut context = Context::new();
    context.insert("title", &title);
    context.insert("body", &markdown_to_html(&images.markdown));
    context.insert(
        "banner",
        if options.self_contained { SELF_CONTAINED_BANNER } else { "" },
    );

    let html = tera
        .render(PAGE_NAME, &context)
        .map_err(|e| Error::TemplateError(format!("Failed to render page: {}", e)))?;

    Ok(Page { html, title, images })
}

/// Convert a markdown file into an HTML file.
///
/// Images resolve against the markdown file's directory unless the options
/// name another one.
pub fn convert_file(input: &Path, output: &Path, options: &HtmlOptions) -> Result<Page> {
    if !input.is_file() {
        return Err(Error::MissingFile(input.to_path_buf()));
    }
    let markdown = std::fs::read_to_string(input)?;

    let mut options = options.clone();
    if options.base_dir.as_os_str().is_empty() {
        options.base_dir = input.parent().map(Path::to_path_buf).unwrap_or_default();
    }

    let page = render_page(&markdown, &options)?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, &page.html)?;
    log::info!(
        "Wrote {} ({:.2} MB)",
        output.display(),
        page.html.len() as f64 / 1024.0 / 1024.0
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_document_title() {
        assert_eq!(
            document_title("intro\n# Class 4 – EDA\n## Slide 1"),
            Some("Class 4 – EDA".to_string())
        );
        assert_eq!(document_title("## Only level two"), None);
    }

    #[test]
    fn test_markdown_extensions() {
        let html = markdown_to_html(
            "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~ text[^1]\n\n[^1]: note\n\n```python\nx = 1\n```\n",
        );
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("footnote-definition"));
        assert!(html.contains("<pre><code class=\"language-python\">"));
    }

    #[test]
    fn test_page_wraps_body_and_escapes_title() {
        let options = HtmlOptions::new().with_title("Q&A <Notes>");
        let page = render_page("## Hello\n\n**bold**", &options).unwrap();
        assert!(page.html.starts_with("<!DOCTYPE html>"));
        assert!(page.html.contains("<title>Q&amp;A &lt;Notes&gt;</title>"));
        assert!(page.html.contains("<h2>Hello</h2>"));
        assert!(page.html.contains("<strong>bold</strong>"));
        assert!(!page.html.contains("<div class=\"info-banner\">"));
    }

    #[test]
    fn test_title_falls_back() {
        let page = render_page("# Course Notes\ntext", &HtmlOptions::new()).unwrap();
        assert_eq!(page.title, "Course Notes");
        let page = render_page("no heading", &HtmlOptions::new()).unwrap();
        assert_eq!(page.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_self_contained_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/p.png"), b"\x89PNG\r\n\x1a\n").unwrap();
        let input = dir.path().join("notes.md");
        std::fs::write(&input, "# Notes\n\n![Plot](images/p.png)\n\n![Lost](images/q.png)\n").unwrap();

        let output = dir.path().join("out/notes.html");
        let page = convert_file(&input, &output, &HtmlOptions::new().self_contained(true)).unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("<div class=\"info-banner\">"));
        assert!(html.contains("src=\"data:image/png;base64,"));
        assert_eq!(page.images.embedded, vec!["images/p.png"]);
        assert_eq!(page.images.missing, vec!["images/q.png"]);
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let err = convert_file(
            &dir.path().join("absent.md"),
            &dir.path().join("out.html"),
            &HtmlOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }
}
