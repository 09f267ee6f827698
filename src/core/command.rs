//! Semantic commands. Keys map to commands; the kernel only ever sees commands.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== Workspaces ====================
    NewWorkspace,
    CloseWorkspace,
    NextWorkspace,
    PrevWorkspace,

    // ==================== Files ====================
    NewDocument,
    OpenDocument,
    SaveDocument,
    SaveDocumentAs,
    ExportPdf,

    // ==================== Character format ====================
    FontFamily,
    FontSize,
    FontSizeUp,
    FontSizeDown,
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleStrikethrough,
    Highlight,
    TextColor,

    // ==================== Block format ====================
    AlignLeft,
    AlignRight,
    AlignCenter,
    AlignJustify,
    NumberedList,
    BulletList,

    // ==================== Insertion ====================
    InsertImage,
    InsertTable,

    // ==================== Cursor ====================
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorWordLeft,
    CursorWordRight,
    CursorLineStart,
    CursorLineEnd,
    CursorDocumentStart,
    CursorDocumentEnd,
    NextCell,
    PrevCell,

    // ==================== Selection ====================
    SelectLeft,
    SelectRight,
    SelectUp,
    SelectDown,
    SelectWordLeft,
    SelectWordRight,
    SelectLineStart,
    SelectLineEnd,
    SelectAll,

    // ==================== Editing ====================
    InsertChar(char),
    InsertNewline,
    DeleteBackward,
    DeleteForward,

    Quit,
    Custom(String),
}

const NAMED: &[Command] = &[
    Command::NewWorkspace,
    Command::CloseWorkspace,
    Command::NextWorkspace,
    Command::PrevWorkspace,
    Command::NewDocument,
    Command::OpenDocument,
    Command::SaveDocument,
    Command::SaveDocumentAs,
    Command::ExportPdf,
    Command::FontFamily,
    Command::FontSize,
    Command::FontSizeUp,
    Command::FontSizeDown,
    Command::ToggleBold,
    Command::ToggleItalic,
    Command::ToggleUnderline,
    Command::ToggleStrikethrough,
    Command::Highlight,
    Command::TextColor,
    Command::AlignLeft,
    Command::AlignRight,
    Command::AlignCenter,
    Command::AlignJustify,
    Command::NumberedList,
    Command::BulletList,
    Command::InsertImage,
    Command::InsertTable,
    Command::CursorLeft,
    Command::CursorRight,
    Command::CursorUp,
    Command::CursorDown,
    Command::CursorWordLeft,
    Command::CursorWordRight,
    Command::CursorLineStart,
    Command::CursorLineEnd,
    Command::CursorDocumentStart,
    Command::CursorDocumentEnd,
    Command::NextCell,
    Command::PrevCell,
    Command::SelectLeft,
    Command::SelectRight,
    Command::SelectUp,
    Command::SelectDown,
    Command::SelectWordLeft,
    Command::SelectWordRight,
    Command::SelectLineStart,
    Command::SelectLineEnd,
    Command::SelectAll,
    Command::InsertNewline,
    Command::DeleteBackward,
    Command::DeleteForward,
    Command::Quit,
];

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::NewWorkspace => "newWorkspace",
            Command::CloseWorkspace => "closeWorkspace",
            Command::NextWorkspace => "nextWorkspace",
            Command::PrevWorkspace => "prevWorkspace",
            Command::NewDocument => "newDocument",
            Command::OpenDocument => "openDocument",
            Command::SaveDocument => "saveDocument",
            Command::SaveDocumentAs => "saveDocumentAs",
            Command::ExportPdf => "exportPdf",
            Command::FontFamily => "fontFamily",
            Command::FontSize => "fontSize",
            Command::FontSizeUp => "fontSizeUp",
            Command::FontSizeDown => "fontSizeDown",
            Command::ToggleBold => "toggleBold",
            Command::ToggleItalic => "toggleItalic",
            Command::ToggleUnderline => "toggleUnderline",
            Command::ToggleStrikethrough => "toggleStrikethrough",
            Command::Highlight => "highlight",
            Command::TextColor => "textColor",
            Command::AlignLeft => "alignLeft",
            Command::AlignRight => "alignRight",
            Command::AlignCenter => "alignCenter",
            Command::AlignJustify => "alignJustify",
            Command::NumberedList => "numberedList",
            Command::BulletList => "bulletList",
            Command::InsertImage => "insertImage",
            Command::InsertTable => "insertTable",
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorWordLeft => "cursorWordLeft",
            Command::CursorWordRight => "cursorWordRight",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::CursorDocumentStart => "cursorDocumentStart",
            Command::CursorDocumentEnd => "cursorDocumentEnd",
            Command::NextCell => "nextCell",
            Command::PrevCell => "prevCell",
            Command::SelectLeft => "selectLeft",
            Command::SelectRight => "selectRight",
            Command::SelectUp => "selectUp",
            Command::SelectDown => "selectDown",
            Command::SelectWordLeft => "selectWordLeft",
            Command::SelectWordRight => "selectWordRight",
            Command::SelectLineStart => "selectLineStart",
            Command::SelectLineEnd => "selectLineEnd",
            Command::SelectAll => "selectAll",
            Command::InsertChar(_) => "insertChar",
            Command::InsertNewline => "insertNewline",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
            Command::Quit => "quit",
            Command::Custom(name) => name,
        }
    }

    /// Unknown names become `Custom`, which the kernel ignores.
    pub fn from_name(name: &str) -> Command {
        let name = name.trim();
        NAMED
            .iter()
            .find(|cmd| cmd.name() == name)
            .cloned()
            .unwrap_or_else(|| Command::Custom(name.to_string()))
    }

    /// Commands that change the document's text or structure.
    pub fn is_edit_command(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::InsertNewline
                | Command::DeleteBackward
                | Command::DeleteForward
                | Command::InsertImage
                | Command::InsertTable
        )
    }

    pub fn is_cursor_command(&self) -> bool {
        matches!(
            self,
            Command::CursorLeft
                | Command::CursorRight
                | Command::CursorUp
                | Command::CursorDown
                | Command::CursorWordLeft
                | Command::CursorWordRight
                | Command::CursorLineStart
                | Command::CursorLineEnd
                | Command::CursorDocumentStart
                | Command::CursorDocumentEnd
                | Command::NextCell
                | Command::PrevCell
        )
    }

    pub fn is_selection_command(&self) -> bool {
        matches!(
            self,
            Command::SelectLeft
                | Command::SelectRight
                | Command::SelectUp
                | Command::SelectDown
                | Command::SelectWordLeft
                | Command::SelectWordRight
                | Command::SelectLineStart
                | Command::SelectLineEnd
                | Command::SelectAll
        )
    }
}
