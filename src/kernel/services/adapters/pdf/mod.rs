//! PDF export through `lopdf`.
//!
//! Text uses the standard Type1 fonts with WinAnsi encoding, so nothing is embedded. Images are
//! drawn as labeled placeholder boxes; their pixels are never read.

mod fonts;
mod layout;

pub use fonts::{FontFace, FontId};
pub use layout::{layout_document, DrawOp, PageLayout, PAGE_HEIGHT, PAGE_WIDTH};

use crate::kernel::services::ports::{FileError, FileProvider};
use crate::models::{RichDocument, Rgb};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::path::Path;

#[derive(Debug)]
pub enum PdfError {
    Pdf(lopdf::Error),
    Io(std::io::Error),
    File(FileError),
}

impl std::fmt::Display for PdfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdfError::Pdf(e) => write!(f, "PDF error: {}", e),
            PdfError::Io(e) => write!(f, "IO error: {}", e),
            PdfError::File(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<lopdf::Error> for PdfError {
    fn from(e: lopdf::Error) -> Self {
        PdfError::Pdf(e)
    }
}

impl From<std::io::Error> for PdfError {
    fn from(e: std::io::Error) -> Self {
        PdfError::Io(e)
    }
}

impl From<FileError> for PdfError {
    fn from(e: FileError) -> Self {
        PdfError::File(e)
    }
}

pub struct PdfExporter {
    title: Option<String>,
}

impl PdfExporter {
    pub fn new() -> Self {
        Self { title: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn render(&self, document: &RichDocument) -> Result<Vec<u8>, PdfError> {
        let pages = layout_document(document);
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for index in 0..fonts::FONT_COUNT {
            let Some(font) = FontId::from_index(index) else {
                continue;
            };
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in &pages {
            let content = Content {
                operations: page_operations(page),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(fonts::encode_latin1(title)),
                "Producer" => Object::string_literal("PowerText"),
            });
            doc.trailer.set("Info", info_id);
        }

        doc.compress();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn export(
        &self,
        files: &dyn FileProvider,
        document: &RichDocument,
        path: &Path,
    ) -> Result<(), PdfError> {
        let bytes = self.render(document)?;
        files.write_file_bytes(path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "pdf exported");
        Ok(())
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_operands(color: Rgb) -> Vec<Object> {
    let (r, g, b) = color.unit_components();
    vec![r.into(), g.into(), b.into()]
}

fn page_operations(page: &PageLayout) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("rg", rgb_operands(*color)));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("RG", rgb_operands(*color)));
                ops.push(Operation::new("w", vec![0.5f32.into()]));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                ops.push(Operation::new("RG", rgb_operands(*color)));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
                ops.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                ops.push(Operation::new("rg", rgb_operands(*color)));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(font.resource_name().into_bytes()),
                        (*size).into(),
                    ],
                ));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(fonts::encode_latin1(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }
    ops
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/pdf/mod.rs"]
mod tests;
