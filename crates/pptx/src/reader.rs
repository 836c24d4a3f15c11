//! PPTX reader used to inspect generated decks.

use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// What one slide of a package contains.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlideSummary {
    pub number: usize,
    /// Text lines of every shape, top-to-bottom then left-to-right.
    pub lines: Vec<String>,
    pub pictures: usize,
}

/// Slide listing of a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeckSummary {
    pub name: String,
    pub slides: Vec<SlideSummary>,
}

impl DeckSummary {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn picture_count(&self) -> usize {
        self.slides.iter().map(|s| s.pictures).sum()
    }
}

/// Reader for PPTX (Office Open XML) packages.
pub struct DeckReader;

impl DeckReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<DeckSummary> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.read(BufReader::new(File::open(path)?), &name)
    }

    /// Summarize a package from a reader.
    pub fn read<R: Read + Seek>(&self, reader: R, name: &str) -> Result<DeckSummary> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut summary = DeckSummary {
            name: name.to_string(),
            slides: Vec::new(),
        };

        for (idx, slide_path) in self.slide_order(&mut archive)?.iter().enumerate() {
            let content = read_part(&mut archive, slide_path)?;
            summary.slides.push(summarize_slide(&content, idx + 1));
        }

        Ok(summary)
    }

    /// Slide part paths in presentation order.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = read_part(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(e, b"Id").unwrap_or_default();
                    let rel_type = attr_value(e, b"Type").unwrap_or_default();
                    let target = attr_value(e, b"Target").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order = slide_number(&id).or_else(|| slide_number(&target));
                        let full_path = match target.strip_prefix('/') {
                            Some(stripped) => stripped.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }
}

impl Default for DeckReader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct ShapeInfo {
    text: String,
    x: i64,
    y: i64,
}

/// Collect the text shapes and picture count of one slide.
fn summarize_slide(xml: &str, number: usize) -> SlideSummary {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut shapes: Vec<ShapeInfo> = Vec::new();
    let mut pictures = 0;
    let mut current: Option<ShapeInfo> = None;
    let mut in_text_run = false;
    let mut paragraph_open = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => current = Some(ShapeInfo::default()),
                b"pic" => {
                    pictures += 1;
                    current = None;
                }
                b"off" => set_offset(&mut current, e),
                b"p" => {
                    if let Some(shape) = current.as_mut() {
                        if paragraph_open || !shape.text.is_empty() {
                            shape.text.push('\n');
                        }
                        paragraph_open = true;
                    }
                }
                b"t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if local_name(e.name().as_ref()) == b"off" {
                    set_offset(&mut current, e);
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_text_run {
                    if let Some(shape) = current.as_mut() {
                        shape.text.push_str(&e.unescape().unwrap_or_default());
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(shape) = current.take() {
                        if !shape.text.trim().is_empty() {
                            shapes.push(shape);
                        }
                    }
                    paragraph_open = false;
                }
                b"t" => in_text_run = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error in slide {} (continuing): {}", number, e);
                break;
            }
            _ => {}
        }
    }

    shapes.sort_by(|a, b| a.y.cmp(&b.y).then(a.x.cmp(&b.x)));

    let lines = shapes
        .iter()
        .flat_map(|s| s.text.lines())
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    SlideSummary {
        number,
        lines,
        pictures,
    }
}

fn set_offset(shape: &mut Option<ShapeInfo>, e: &BytesStart) {
    if let Some(shape) = shape.as_mut() {
        if let Some(x) = attr_value(e, b"x").and_then(|v| v.parse().ok()) {
            shape.x = x;
        }
        if let Some(y) = attr_value(e, b"y").and_then(|v| v.parse().ok()) {
            shape.y = y;
        }
    }
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Local part of a possibly namespaced element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Trailing number of "rId2" or "slides/slide3.xml".
fn slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    s[start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{DeckSlide, DeckWriter, Frame, Paragraph};
    use std::io::Cursor;

    #[test]
    fn test_slide_number() {
        assert_eq!(slide_number("rId1"), Some(1));
        assert_eq!(slide_number("rId12"), Some(12));
        assert_eq!(slide_number("slides/slide123.xml"), Some(123));
        assert_eq!(slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_summarize_orders_by_position() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:sp><p:spPr><a:xfrm><a:off x="0" y="500"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>lower</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:spPr><a:xfrm><a:off x="0" y="100"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>upper</a:t></a:r></a:p><a:p><a:r><a:t>second</a:t></a:r></a:p></p:txBody></p:sp>
            <p:pic><p:spPr><a:xfrm><a:off x="0" y="0"/></a:xfrm></p:spPr></p:pic>
            </p:spTree></p:cSld></p:sld>"#;
        let slide = summarize_slide(xml, 1);
        assert_eq!(slide.lines, vec!["upper", "second", "lower"]);
        assert_eq!(slide.pictures, 1);
    }

    #[test]
    fn test_write_then_read() {
        let mut deck = DeckWriter::new();
        for idx in 1..=12 {
            let mut slide = DeckSlide::new();
            slide.add_text_box(
                Frame::inches(0.5, 1.3, 9.0, 5.0),
                vec![Paragraph::new(format!("Body {}", idx)), Paragraph::new("R&D <ok>")],
            );
            slide.add_text_box(
                Frame::inches(0.5, 0.3, 9.0, 0.8),
                vec![Paragraph::new(format!("Title {}", idx))],
            );
            deck.push_slide(slide);
        }

        let mut buffer = Cursor::new(Vec::new());
        deck.save(&mut buffer).unwrap();
        buffer.set_position(0);

        let summary = DeckReader::new().read(buffer, "demo.pptx").unwrap();
        assert_eq!(summary.slide_count(), 12);
        assert_eq!(summary.picture_count(), 0);
        assert_eq!(summary.slides[0].lines, vec!["Title 1", "Body 1", "R&D <ok>"]);
        // rId ordering must be numeric, not lexicographic
        assert_eq!(summary.slides[9].lines[0], "Title 10");
        assert_eq!(summary.slides[11].number, 12);
    }

    #[test]
    fn test_read_missing_path() {
        let err = DeckReader::new().read_path("/nope/missing.pptx").unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }
}
