use super::*;
use crate::models::Rgb;

#[test]
fn test_merge_only_touches_patched_fields() {
    let mut format = CharFormat::new("Calibri", 12);
    format.italic = true;

    assert!(format.merge(&CharFormatPatch::weight(FontWeight::Bold)));
    assert!(format.is_bold());
    assert!(format.italic);
    assert_eq!(format.family, "Calibri");
    assert_eq!(format.point_size, 12);
}

#[test]
fn test_merge_reports_no_change() {
    let mut format = CharFormat::new("Calibri", 12);
    assert!(!format.merge(&CharFormatPatch::point_size(12)));
    assert!(!format.merge(&CharFormatPatch::default()));
    assert!(format.merge(&CharFormatPatch::point_size(14)));
    assert_eq!(format.point_size, 14);
}

#[test]
fn test_merge_colors() {
    let base = CharFormat::new("Arial", 10);
    let mut merged = base.clone();
    assert!(merged.merge(&CharFormatPatch::foreground(Rgb::new(0xFF, 0, 0))));
    assert!(merged.merge(&CharFormatPatch::background(Rgb::YELLOW)));
    assert_eq!(merged.foreground, Some(Rgb::new(0xFF, 0, 0)));
    assert_eq!(merged.background, Some(Rgb::YELLOW));
    assert_eq!(base.foreground, None);
}

#[test]
fn test_patch_is_empty() {
    assert!(CharFormatPatch::default().is_empty());
    assert!(!CharFormatPatch::family("Times").is_empty());
    assert!(!CharFormatPatch::strike_out(false).is_empty());
}

#[test]
fn test_char_format_serde_defaults() {
    let format: CharFormat =
        serde_json::from_str(r#"{"family":"Courier","point_size":9}"#).unwrap();
    assert_eq!(format, CharFormat::new("Courier", 9));

    let json = serde_json::to_string(&CharFormat::new("Courier", 9)).unwrap();
    assert!(!json.contains("foreground"));
}

#[test]
fn test_block_format_default_is_left_without_list() {
    let block = BlockFormat::default();
    assert_eq!(block.alignment, Alignment::Left);
    assert_eq!(block.list, None);
}
