//! PPTX package writer.
//!
//! Builds slides from absolutely positioned text boxes and pictures and
//! serializes them into an Office Open XML package (a ZIP of XML parts).

use crate::parts::{self, *};
use deck_core::{Error, Result};
use quick_xml::escape::escape;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A length in English Metric Units (914 400 per inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Emu(pub i64);

impl Emu {
    pub const PER_INCH: i64 = 914_400;
    pub const PER_POINT: i64 = 12_700;

    pub fn from_inches(inches: f64) -> Self {
        Emu((inches * Self::PER_INCH as f64).round() as i64)
    }

    pub fn from_points(points: f64) -> Self {
        Emu((points * Self::PER_POINT as f64).round() as i64)
    }

    pub fn inches(self) -> f64 {
        self.0 as f64 / Self::PER_INCH as f64
    }
}

/// Position and size of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl Frame {
    /// Frame given in inches, the unit every layout in this crate uses.
    pub fn inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Emu::from_inches(x),
            y: Emu::from_inches(y),
            cx: Emu::from_inches(width),
            cy: Emu::from_inches(height),
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    fn attr(self) -> Option<&'static str> {
        match self {
            Align::Left => None,
            Align::Center => Some("ctr"),
            Align::Right => Some("r"),
        }
    }
}

/// One paragraph of a text box: a single run with uniform formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    /// Bullet nesting level, 0 for top-level bullets; `None` means no bullet.
    pub bullet: Option<u8>,
    pub size_pt: f64,
    pub bold: bool,
    pub italic: bool,
    /// `RRGGBB` hex colour.
    pub color: Option<String>,
    pub align: Align,
    pub space_before_pt: f64,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bullet: None,
            size_pt: 18.0,
            bold: false,
            italic: false,
            color: None,
            align: Align::Left,
            space_before_pt: 0.0,
        }
    }

    pub fn size(mut self, size_pt: f64) -> Self {
        self.size_pt = size_pt;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into().trim_start_matches('#').to_uppercase());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Make this a bullet at `level`, 0 being the outermost.
    pub fn bullet(mut self, level: u8) -> Self {
        self.bullet = Some(level);
        self
    }

    pub fn space_before(mut self, points: f64) -> Self {
        self.space_before_pt = points;
        self
    }
}

/// Image formats a picture part may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Png,
    Jpeg,
    Gif,
}

impl MediaFormat {
    pub fn extension(self) -> &'static str {
        match self {
            MediaFormat::Png => "png",
            MediaFormat::Jpeg => "jpeg",
            MediaFormat::Gif => "gif",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            MediaFormat::Png => "image/png",
            MediaFormat::Jpeg => "image/jpeg",
            MediaFormat::Gif => "image/gif",
        }
    }

    /// Detect the format from the file signature.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(MediaFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(MediaFormat::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(MediaFormat::Gif)
        } else {
            None
        }
    }
}

/// Encoded image bytes embedded in the package.
#[derive(Debug, Clone)]
pub struct Media {
    pub name: String,
    pub format: MediaFormat,
    pub bytes: Vec<u8>,
}

impl Media {
    /// Read an image file, checking that it is a format PowerPoint embeds.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        let format = MediaFormat::sniff(&bytes).ok_or_else(|| {
            Error::ImageError(format!("Unsupported image format: {}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            name,
            format,
            bytes,
        })
    }

    /// Pixel dimensions, read from the image header.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        image::ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .map_err(|e| Error::ImageError(e.to_string()))?
            .into_dimensions()
            .map_err(|e| Error::ImageError(format!("{}: {}", self.name, e)))
    }
}

/// A shape placed on a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    TextBox {
        frame: Frame,
        paragraphs: Vec<Paragraph>,
    },
    Picture {
        frame: Frame,
        /// Index into the writer's media list.
        media: usize,
    },
}

/// A blank-layout slide and its shapes, in z-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckSlide {
    pub shapes: Vec<Shape>,
}

impl DeckSlide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text_box(&mut self, frame: Frame, paragraphs: Vec<Paragraph>) {
        self.shapes.push(Shape::TextBox { frame, paragraphs });
    }

    pub fn add_picture(&mut self, frame: Frame, media: usize) {
        self.shapes.push(Shape::Picture { frame, media });
    }

    pub fn picture_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Picture { .. }))
            .count()
    }

    /// Paragraph texts of every text box, in shape order.
    pub fn texts(&self) -> Vec<&str> {
        self.shapes
            .iter()
            .filter_map(|s| match s {
                Shape::TextBox { paragraphs, .. } => Some(paragraphs),
                Shape::Picture { .. } => None,
            })
            .flatten()
            .map(|p| p.text.as_str())
            .collect()
    }
}

/// An in-memory presentation ready to be written as `.pptx`.
#[derive(Debug, Clone)]
pub struct DeckWriter {
    pub slide_width: Emu,
    pub slide_height: Emu,
    pub title: String,
    slides: Vec<DeckSlide>,
    media: Vec<Media>,
}

impl Default for DeckWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckWriter {
    /// A 10in × 7.5in (4:3) deck.
    pub fn new() -> Self {
        Self {
            slide_width: Emu::from_inches(10.0),
            slide_height: Emu::from_inches(7.5),
            title: String::new(),
            slides: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn with_slide_size(mut self, width: Emu, height: Emu) -> Self {
        self.slide_width = width;
        self.slide_height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Register an image and return its media index.
    pub fn add_media(&mut self, media: Media) -> usize {
        self.media.push(media);
        self.media.len() - 1
    }

    pub fn media(&self, index: usize) -> Option<&Media> {
        self.media.get(index)
    }

    pub fn push_slide(&mut self, slide: DeckSlide) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[DeckSlide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Write the package to a file, creating parent directories.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        self.save(BufWriter::new(file))?;
        log::debug!("Wrote {} ({} slides)", path.display(), self.slides.len());
        Ok(())
    }

    /// Write the package to any seekable sink.
    pub fn save<W: Write + Seek>(&self, writer: W) -> Result<()> {
        for slide in &self.slides {
            for shape in &slide.shapes {
                if let Shape::Picture { media, .. } = shape {
                    if *media >= self.media.len() {
                        return Err(Error::XmlError(format!(
                            "Picture refers to unknown media {}",
                            media
                        )));
                    }
                }
            }
        }

        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = FileOptions::default().compression_method(CompressionMethod::Stored);

        let put = |zip: &mut ZipWriter<W>, name: &str, data: &[u8], opts: FileOptions| {
            zip.start_file(name, opts)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
            zip.write_all(data)?;
            Ok::<(), Error>(())
        };

        put(&mut zip, "[Content_Types].xml", self.content_types_xml().as_bytes(), options)?;
        put(&mut zip, "_rels/.rels", self.package_rels_xml().as_bytes(), options)?;
        put(&mut zip, "docProps/core.xml", core_props_xml(&self.title).as_bytes(), options)?;
        put(&mut zip, "docProps/app.xml", app_props_xml(self.slides.len()).as_bytes(), options)?;
        put(&mut zip, "ppt/presentation.xml", self.presentation_xml().as_bytes(), options)?;
        put(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            self.presentation_rels_xml().as_bytes(),
            options,
        )?;
        put(&mut zip, "ppt/presProps.xml", pres_props_xml().as_bytes(), options)?;
        put(&mut zip, "ppt/viewProps.xml", view_props_xml().as_bytes(), options)?;
        put(&mut zip, "ppt/tableStyles.xml", table_styles_xml().as_bytes(), options)?;
        put(&mut zip, "ppt/theme/theme1.xml", theme_xml().as_bytes(), options)?;
        put(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            slide_master_xml().as_bytes(),
            options,
        )?;
        put(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            relationships_xml(&[
                (
                    "rId1".to_string(),
                    REL_SLIDE_LAYOUT,
                    "../slideLayouts/slideLayout1.xml".to_string(),
                ),
                ("rId2".to_string(), REL_THEME, "../theme/theme1.xml".to_string()),
            ])
            .as_bytes(),
            options,
        )?;
        put(
            &mut zip,
            "ppt/slideLayouts/slideLayout1.xml",
            blank_layout_xml().as_bytes(),
            options,
        )?;
        put(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            relationships_xml(&[(
                "rId1".to_string(),
                REL_SLIDE_MASTER,
                "../slideMasters/slideMaster1.xml".to_string(),
            )])
            .as_bytes(),
            options,
        )?;

        for (idx, slide) in self.slides.iter().enumerate() {
            let number = idx + 1;
            let (xml, rels) = self.slide_xml(slide);
            put(&mut zip, &format!("ppt/slides/slide{}.xml", number), xml.as_bytes(), options)?;
            put(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                rels.as_bytes(),
                options,
            )?;
        }

        // Already-compressed image data is stored as is.
        for (idx, media) in self.media.iter().enumerate() {
            put(&mut zip, &media_part_name(idx, media), &media.bytes, stored)?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish package: {}", e)))?;
        Ok(())
    }

    fn content_types_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        for format in [MediaFormat::Png, MediaFormat::Jpeg, MediaFormat::Gif] {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                format.extension(),
                format.content_type()
            ));
        }

        let overrides = [
            ("/ppt/presentation.xml", CT_PRESENTATION),
            ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
            ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
            ("/ppt/theme/theme1.xml", CT_THEME),
            ("/ppt/presProps.xml", CT_PRES_PROPS),
            ("/ppt/viewProps.xml", CT_VIEW_PROPS),
            ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
            ("/docProps/core.xml", CT_CORE_PROPS),
            ("/docProps/app.xml", CT_EXTENDED_PROPS),
        ];
        for (part, content_type) in overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                part, content_type
            ));
        }
        for number in 1..=self.slides.len() {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
                number, CT_SLIDE
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    fn package_rels_xml(&self) -> String {
        relationships_xml(&[
            ("rId1".to_string(), REL_OFFICE_DOCUMENT, "ppt/presentation.xml".to_string()),
            ("rId2".to_string(), REL_CORE_PROPS, "docProps/core.xml".to_string()),
            ("rId3".to_string(), REL_EXTENDED_PROPS, "docProps/app.xml".to_string()),
        ])
    }

    /// Relationship ids: rId1 is the master, slides follow from rId2.
    fn presentation_rels_xml(&self) -> String {
        let mut rels = vec![(
            "rId1".to_string(),
            REL_SLIDE_MASTER,
            "slideMasters/slideMaster1.xml".to_string(),
        )];
        for idx in 0..self.slides.len() {
            rels.push((
                format!("rId{}", idx + 2),
                REL_SLIDE,
                format!("slides/slide{}.xml", idx + 1),
            ));
        }
        let next = self.slides.len() + 2;
        rels.push((format!("rId{}", next), REL_THEME, "theme/theme1.xml".to_string()));
        rels.push((format!("rId{}", next + 1), REL_PRES_PROPS, "presProps.xml".to_string()));
        rels.push((format!("rId{}", next + 2), REL_VIEW_PROPS, "viewProps.xml".to_string()));
        rels.push((
            format!("rId{}", next + 3),
            REL_TABLE_STYLES,
            "tableStyles.xml".to_string(),
        ));
        relationships_xml(&rels)
    }

    fn presentation_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            parts::NS_A,
            parts::NS_R,
            parts::NS_P
        ));
        xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for idx in 0..self.slides.len() {
                xml.push_str(&format!(
                    r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                    256 + idx,
                    idx + 2
                ));
            }
            xml.push_str("</p:sldIdLst>");
        }
        xml.push_str(&format!(
            r#"<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="6858000" cy="9144000"/>"#,
            self.slide_width.0, self.slide_height.0
        ));
        xml.push_str("</p:presentation>");
        xml
    }

    /// Slide XML and its relationship part.
    fn slide_xml(&self, slide: &DeckSlide) -> (String, String) {
        let mut rels = vec![(
            "rId1".to_string(),
            REL_SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml".to_string(),
        )];

        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(
            r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:cSld><p:spTree>"#,
            parts::NS_A,
            parts::NS_R,
            parts::NS_P
        ));
        xml.push_str(SP_TREE_HEADER);

        // Id 1 is the group; shapes start at 2.
        for (idx, shape) in slide.shapes.iter().enumerate() {
            let id = idx + 2;
            match shape {
                Shape::TextBox { frame, paragraphs } => {
                    xml.push_str(&text_box_xml(id, frame, paragraphs));
                }
                Shape::Picture { frame, media } => {
                    let rel_id = format!("rId{}", rels.len() + 1);
                    let (name, target) = match self.media.get(*media) {
                        Some(m) => (m.name.as_str(), media_part_name(*media, m)),
                        None => ("", String::new()),
                    };
                    xml.push_str(&picture_xml(id, frame, &rel_id, name));
                    rels.push((
                        rel_id,
                        REL_IMAGE,
                        target.replacen("ppt/", "../", 1),
                    ));
                }
            }
        }

        xml.push_str(r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#);
        (xml, relationships_xml(&rels))
    }
}

fn media_part_name(index: usize, media: &Media) -> String {
    format!("ppt/media/image{}.{}", index + 1, media.format.extension())
}

fn xfrm_xml(frame: &Frame) -> String {
    format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        frame.x.0, frame.y.0, frame.cx.0, frame.cy.0
    )
}

fn text_box_xml(id: usize, frame: &Frame, paragraphs: &[Paragraph]) -> String {
    let mut xml = format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
        id = id
    );
    xml.push_str("<p:spPr>");
    xml.push_str(&xfrm_xml(frame));
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#);
    if paragraphs.is_empty() {
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#);
    }
    for paragraph in paragraphs {
        xml.push_str(&paragraph_xml(paragraph));
    }
    xml.push_str("</p:txBody></p:sp>");
    xml
}

fn paragraph_xml(p: &Paragraph) -> String {
    let mut ppr_attrs = String::new();
    if let Some(level) = p.bullet {
        let indent = 285_750 * (i64::from(level) + 1);
        ppr_attrs.push_str(&format!(
            r#" marL="{}" indent="-228600" lvl="{}""#,
            indent + 228_600,
            level
        ));
    }
    if let Some(algn) = p.align.attr() {
        ppr_attrs.push_str(&format!(r#" algn="{}""#, algn));
    }

    let mut ppr_children = String::new();
    if p.space_before_pt > 0.0 {
        ppr_children.push_str(&format!(
            r#"<a:spcBef><a:spcPts val="{}"/></a:spcBef>"#,
            (p.space_before_pt * 100.0).round() as i64
        ));
    }
    if p.bullet.is_some() {
        ppr_children.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="•"/>"#);
    }

    let mut xml = String::from("<a:p>");
    if !ppr_attrs.is_empty() || !ppr_children.is_empty() {
        if ppr_children.is_empty() {
            xml.push_str(&format!("<a:pPr{}/>", ppr_attrs));
        } else {
            xml.push_str(&format!("<a:pPr{}>{}</a:pPr>", ppr_attrs, ppr_children));
        }
    }

    let size = (p.size_pt * 100.0).round() as i64;
    let mut rpr = format!(r#"lang="en-US" sz="{}""#, size);
    if p.bold {
        rpr.push_str(r#" b="1""#);
    }
    if p.italic {
        rpr.push_str(r#" i="1""#);
    }
    rpr.push_str(r#" dirty="0""#);
    let fill = p
        .color
        .as_ref()
        .map(|c| format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, escape(c.as_str())))
        .unwrap_or_default();

    if p.text.is_empty() {
        xml.push_str(&format!("<a:endParaRPr {}/>", rpr));
    } else {
        xml.push_str(&format!(
            "<a:r><a:rPr {}>{}</a:rPr><a:t>{}</a:t></a:r>",
            rpr,
            fill,
            escape(p.text.as_str())
        ));
    }
    xml.push_str("</a:p>");
    xml
}

fn picture_xml(id: usize, frame: &Frame, rel_id: &str, descr: &str) -> String {
    let mut xml = format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}" descr="{descr}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
        id = id,
        descr = escape(descr)
    );
    xml.push_str(&format!(
        r#"<p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
        rel_id
    ));
    xml.push_str("<p:spPr>");
    xml.push_str(&xfrm_xml(frame));
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    /// Smallest valid PNG: 1×1 transparent pixel.
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_emu_conversions() {
        assert_eq!(Emu::from_inches(1.0), Emu(914_400));
        assert_eq!(Emu::from_inches(10.0), Emu(9_144_000));
        assert_eq!(Emu::from_points(28.0), Emu(355_600));
        assert!((Emu(457_200).inches() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_media_sniff() {
        assert_eq!(MediaFormat::sniff(TINY_PNG), Some(MediaFormat::Png));
        assert_eq!(MediaFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(MediaFormat::Jpeg));
        assert_eq!(MediaFormat::sniff(b"GIF89a..."), Some(MediaFormat::Gif));
        assert_eq!(MediaFormat::sniff(b"<svg"), None);
    }

    #[test]
    fn test_media_dimensions() {
        let media = Media {
            name: "tiny.png".to_string(),
            format: MediaFormat::Png,
            bytes: TINY_PNG.to_vec(),
        };
        assert_eq!(media.dimensions().unwrap(), (1, 1));
    }

    #[test]
    fn test_missing_media_file() {
        let err = Media::from_path("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }

    #[test]
    fn test_paragraph_xml_formatting() {
        let xml = paragraph_xml(
            &Paragraph::new("Tom & Jerry")
                .size(28.0)
                .bold()
                .color("#003366")
                .align(Align::Center),
        );
        assert!(xml.contains(r#"algn="ctr""#));
        assert!(xml.contains(r#"sz="2800""#));
        assert!(xml.contains(r#"b="1""#));
        assert!(xml.contains(r#"<a:srgbClr val="003366"/>"#));
        assert!(xml.contains("<a:t>Tom &amp; Jerry</a:t>"));
    }

    #[test]
    fn test_paragraph_xml_bullet_level() {
        let xml = paragraph_xml(&Paragraph::new("nested").bullet(1).space_before(6.0));
        assert!(xml.contains(r#"marL="800100""#));
        assert!(xml.contains(r#"lvl="1""#));
        assert!(xml.contains(r#"<a:spcPts val="600"/>"#));
        assert!(xml.contains("<a:buChar"));
    }

    #[test]
    fn test_paragraph_xml_top_level_bullet() {
        let xml = paragraph_xml(&Paragraph::new("point").bullet(0));
        assert!(xml.contains(r#"marL="514350""#));
        assert!(xml.contains(r#"lvl="0""#));
        assert!(xml.contains("<a:buChar"));

        let plain = paragraph_xml(&Paragraph::new("prose"));
        assert!(!plain.contains("lvl="));
        assert!(!plain.contains("<a:buChar"));
    }

    #[test]
    fn test_save_writes_package_parts() {
        let mut deck = DeckWriter::new().with_title("Demo");
        let media = deck.add_media(Media {
            name: "tiny.png".to_string(),
            format: MediaFormat::Png,
            bytes: TINY_PNG.to_vec(),
        });
        let mut slide = DeckSlide::new();
        slide.add_text_box(Frame::inches(0.5, 0.3, 9.0, 0.8), vec![Paragraph::new("Hello")]);
        slide.add_picture(Frame::inches(1.0, 1.3, 8.0, 6.0), media);
        deck.push_slide(slide);
        deck.push_slide(DeckSlide::new());

        let mut buffer = Cursor::new(Vec::new());
        deck.save(&mut buffer).unwrap();
        let bytes = buffer.into_inner();

        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains("/ppt/slides/slide2.xml"));

        let pres = read_part(&bytes, "ppt/presentation.xml");
        assert!(pres.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(pres.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(pres.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));

        let rels = read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains("../media/image1.png"));

        let slide1 = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide1.contains(r#"r:embed="rId2""#));

        let mut archive = ZipArchive::new(Cursor::new(&bytes)).unwrap();
        assert!(archive.by_name("ppt/media/image1.png").is_ok());
    }

    #[test]
    fn test_save_rejects_unknown_media() {
        let mut deck = DeckWriter::new();
        let mut slide = DeckSlide::new();
        slide.add_picture(Frame::default(), 3);
        deck.push_slide(slide);
        let err = deck.save(Cursor::new(Vec::new())).unwrap_err();
        assert!(matches!(err, Error::XmlError(_)));
    }
}
