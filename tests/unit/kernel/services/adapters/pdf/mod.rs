use super::*;
use crate::kernel::services::adapters::LocalFileProvider;
use crate::models::CharFormat;
use tempfile::tempdir;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn page_contents(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut doc = Document::load_mem(bytes).unwrap();
    doc.decompress();
    doc.get_pages()
        .values()
        .map(|id| doc.get_page_content(*id).unwrap())
        .collect()
}

#[test]
fn test_render_produces_loadable_pdf() {
    let doc = RichDocument::from_plain_text("Hello PDF", CharFormat::new("Arial", 12));
    let bytes = PdfExporter::new().render(&doc).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let contents = page_contents(&bytes);
    assert_eq!(contents.len(), 1);
    assert!(contains(&contents[0], b"Hello"));
    assert!(contains(&contents[0], b"/F1"));
}

#[test]
fn test_long_document_has_several_pages() {
    let text = vec!["paragraph"; 300].join("\n");
    let doc = RichDocument::from_plain_text(&text, CharFormat::new("Times New Roman", 12));
    let bytes = PdfExporter::new().render(&doc).unwrap();
    let contents = page_contents(&bytes);
    assert!(contents.len() > 1);
    assert!(contains(&contents[0], b"/F5"));
}

#[test]
fn test_all_standard_fonts_are_declared() {
    let doc = RichDocument::new(CharFormat::new("Calibri", 12));
    let bytes = PdfExporter::new().with_title("Empty").render(&doc).unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();

    let base_fonts: Vec<Vec<u8>> = loaded
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .filter(|dict| dict.get(b"Type").and_then(Object::as_name).ok() == Some(b"Font".as_slice()))
        .filter_map(|dict| dict.get(b"BaseFont").and_then(Object::as_name).ok())
        .map(<[u8]>::to_vec)
        .collect();
    assert_eq!(base_fonts.len(), 12);
    assert!(base_fonts.contains(&b"Courier-BoldOblique".to_vec()));
}

#[test]
fn test_export_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    let doc = RichDocument::from_plain_text("saved", CharFormat::new("Arial", 12));

    PdfExporter::new()
        .export(&LocalFileProvider::new(), &doc, &path)
        .unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(Document::load_mem(&bytes).is_ok());
}

#[test]
fn test_export_into_directory_fails() {
    let dir = tempdir().unwrap();
    let doc = RichDocument::from_plain_text("x", CharFormat::new("Arial", 12));
    let err = PdfExporter::new()
        .export(&LocalFileProvider::new(), &doc, dir.path())
        .unwrap_err();
    assert!(matches!(err, PdfError::File(FileError::NotAFile(_))));
}
