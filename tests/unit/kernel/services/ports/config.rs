use super::*;

#[test]
fn test_default_config() {
    let config = EditorConfig::default();
    assert_eq!(config.font_family, "Calibri");
    assert_eq!(config.font_size, 12);
    assert_eq!(config.scroll_step(), 3);
}

#[test]
fn test_default_char_format_clamps_size() {
    let config = EditorConfig {
        font_size: 400,
        ..EditorConfig::default()
    };
    assert_eq!(config.default_char_format().point_size, MAX_FONT_SIZE);

    let config = EditorConfig {
        font_size: 1,
        font_family: "  ".to_string(),
        ..EditorConfig::default()
    };
    let format = config.default_char_format();
    assert_eq!(format.point_size, MIN_FONT_SIZE);
    assert_eq!(format.family, "Calibri");
}

#[test]
fn test_editor_config_serde_aliases() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        editor: EditorConfig,
    }

    let data = r#"{ "editor": { "fontFamily": "Times New Roman", "fontSize": 18 } }"#;
    let parsed: Wrapper = serde_json::from_str(data).expect("parse settings");
    assert_eq!(parsed.editor.font_family, "Times New Roman");
    assert_eq!(parsed.editor.font_size, 18);
    assert_eq!(parsed.editor.scroll_lines, 3);
}
