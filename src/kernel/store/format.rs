use crate::core::Command;
use crate::kernel::dialog::{ColorTarget, IntRange, PendingDialog};
use crate::kernel::services::ports::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::kernel::workspace::WorkspaceId;
use crate::models::{Alignment, CharFormatPatch, FontWeight, ListStyle, Rgb};

impl super::Store {
    /// With a selection the patch lands on the selected text; without one it only changes what
    /// the next typed character looks like.
    fn merge_into_active(&mut self, patch: &CharFormatPatch) -> bool {
        self.state
            .workspaces
            .active_mut()
            .is_some_and(|ws| ws.surface.merge_char_format(patch))
    }

    pub(super) fn apply_font_family(&mut self, family: String) -> super::DispatchResult {
        let family = family.trim();
        if family.is_empty() {
            return super::DispatchResult::changed(false);
        }
        let toolbar_changed = self.state.ui.toolbar.font_family != family;
        self.state.ui.toolbar.font_family = family.to_string();
        let doc_changed = self.merge_into_active(&CharFormatPatch::family(family));
        super::DispatchResult::changed(toolbar_changed || doc_changed)
    }

    pub(super) fn apply_font_size(&mut self, size: u16) -> super::DispatchResult {
        let size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        let toolbar_changed = self.state.ui.toolbar.font_size != size;
        self.state.ui.toolbar.font_size = size;
        let doc_changed = self.merge_into_active(&CharFormatPatch::point_size(size));
        super::DispatchResult::changed(toolbar_changed || doc_changed)
    }

    pub(super) fn toggle_style(&mut self, command: &Command) -> super::DispatchResult {
        let toolbar = &mut self.state.ui.toolbar;
        let patch = match command {
            Command::ToggleBold => {
                toolbar.bold = !toolbar.bold;
                CharFormatPatch::weight(if toolbar.bold {
                    FontWeight::Bold
                } else {
                    FontWeight::Normal
                })
            }
            Command::ToggleItalic => {
                toolbar.italic = !toolbar.italic;
                CharFormatPatch::italic(toolbar.italic)
            }
            Command::ToggleUnderline => {
                toolbar.underline = !toolbar.underline;
                CharFormatPatch::underline(toolbar.underline)
            }
            Command::ToggleStrikethrough => {
                toolbar.strikethrough = !toolbar.strikethrough;
                CharFormatPatch::strike_out(toolbar.strikethrough)
            }
            _ => return super::DispatchResult::changed(false),
        };
        self.merge_into_active(&patch);
        super::DispatchResult::changed(true)
    }

    pub(super) fn apply_block_command(&mut self, command: &Command) -> super::DispatchResult {
        let Some(ws) = self.state.workspaces.active_mut() else {
            return super::DispatchResult::changed(false);
        };
        let changed = match command {
            Command::AlignLeft => ws.surface.set_alignment(Alignment::Left),
            Command::AlignRight => ws.surface.set_alignment(Alignment::Right),
            Command::AlignCenter => ws.surface.set_alignment(Alignment::Center),
            Command::AlignJustify => ws.surface.set_alignment(Alignment::Justify),
            Command::NumberedList => ws.surface.create_list(ListStyle::Decimal),
            Command::BulletList => ws.surface.create_list(ListStyle::Bullet),
            _ => false,
        };
        super::DispatchResult::changed(changed)
    }

    pub(super) fn begin_font_family(&mut self) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        let initial = self.state.ui.toolbar.font_family.clone();
        let hint = self.state.font_families.join(", ");
        self.open_dialog(
            PendingDialog::FontFamily { workspace },
            Some(initial),
            Some(hint),
        );
        super::DispatchResult::changed(true)
    }

    pub(super) fn begin_font_size(&mut self) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        let range = IntRange {
            min: i64::from(MIN_FONT_SIZE),
            max: i64::from(MAX_FONT_SIZE),
            default: i64::from(self.state.ui.toolbar.font_size),
        };
        self.open_dialog(PendingDialog::FontSize { workspace, range }, None, None);
        super::DispatchResult::changed(true)
    }

    pub(super) fn begin_pick_color(&mut self, target: ColorTarget) -> super::DispatchResult {
        let Some(workspace) = self.state.workspaces.active_id() else {
            return super::DispatchResult::changed(false);
        };
        self.open_dialog(PendingDialog::PickColor { workspace, target }, None, None);
        super::DispatchResult::changed(true)
    }

    pub(super) fn apply_color(&mut self, workspace: WorkspaceId, target: ColorTarget, color: Rgb) {
        let patch = match target {
            ColorTarget::Highlight => CharFormatPatch::background(color),
            ColorTarget::Text => CharFormatPatch::foreground(color),
        };
        if let Some(ws) = self.state.workspaces.get_mut(workspace) {
            ws.surface.merge_char_format(&patch);
        }
    }
}
