//! Document model: formats, the block/run document, its cursor and on-disk markup.

pub mod color;
pub mod cursor;
pub mod document;
pub mod format;
pub mod markup;
pub mod surface;

pub use color::Rgb;
pub use cursor::{Motion, TextCursor};
pub use document::{
    Block, DocPosition, Inline, Paragraph, RichDocument, Table, MAX_TABLE_DIMENSION,
    OBJECT_REPLACEMENT,
};
pub use format::{
    Alignment, BlockFormat, CharFormat, CharFormatPatch, FontWeight, ImageFormat, ListFormat,
    ListStyle,
};
pub use markup::{DocumentKind, MarkupError};
pub use surface::DocumentSurface;
