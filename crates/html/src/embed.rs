//! Inline local images as base64 data URIs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use deck_core::Result;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Markdown with local images inlined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embedded {
    pub markdown: String,
    /// Image paths that were inlined, in document order.
    pub embedded: Vec<String>,
    /// Image paths that could not be found or read.
    pub missing: Vec<String>,
}

/// MIME type for an image path, judged by extension; PNG when unknown.
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    }
}

/// Read a file into a `data:` URI.
pub fn data_uri(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime_type(path), STANDARD.encode(bytes)))
}

/// Replace every local `![alt](path)` whose file exists under `base_dir`
/// with a data URI. Remote links and existing data URIs are left alone.
pub fn embed_images(markdown: &str, base_dir: &Path) -> Embedded {
    let mut embedded = Vec::new();
    let mut missing = Vec::new();

    let replaced = IMAGE_REGEX.replace_all(markdown, |caps: &Captures| {
        let alt = &caps[1];
        let target = caps[2].trim();
        if target.starts_with("http://") || target.starts_with("https://") || target.starts_with("data:") {
            return caps[0].to_string();
        }

        let path = base_dir.join(target);
        if !path.is_file() {
            log::warn!("Image not found: {}", path.display());
            missing.push(target.to_string());
            return caps[0].to_string();
        }

        match data_uri(&path) {
            Ok(uri) => {
                log::debug!("Embedding {}", path.display());
                embedded.push(target.to_string());
                format!("![{}]({})", alt, uri)
            }
            Err(e) => {
                log::warn!("Failed to embed {}: {}", path.display(), e);
                missing.push(target.to_string());
                caps[0].to_string()
            }
        }
    });

    Embedded {
        markdown: replaced.into_owned(),
        embedded,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_type(Path::new("a.gif")), "image/gif");
        assert_eq!(mime_type(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(mime_type(Path::new("a.webp")), "image/png");
        assert_eq!(mime_type(Path::new("noext")), "image/png");
    }

    #[test]
    fn test_embeds_existing_images() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/a.gif"), b"GIF89a").unwrap();

        let md = "Intro\n\n![Chart](images/a.gif)\n\n![Gone](images/b.png)\n";
        let result = embed_images(md, dir.path());

        assert_eq!(result.embedded, vec!["images/a.gif"]);
        assert_eq!(result.missing, vec!["images/b.png"]);
        assert!(result
            .markdown
            .contains(&format!("![Chart](data:image/gif;base64,{})", STANDARD.encode(b"GIF89a"))));
        assert!(result.markdown.contains("![Gone](images/b.png)"));
    }

    #[test]
    fn test_remote_and_data_links_untouched() {
        let md = "![x](https://example.com/a.png) ![y](data:image/png;base64,AAAA)";
        let result = embed_images(md, Path::new("."));
        assert_eq!(result.markdown, md);
        assert!(result.embedded.is_empty() && result.missing.is_empty());
    }
}
