use crate::error::AppResult;
use crate::ui::{
    DebugStatus, HitMap, draw_dialog_overlay, draw_editor_overlay, draw_panel,
    draw_prompt_overlay, draw_status, draw_tab_bar, split_layout,
};

use super::core::App;
use super::terminal_session::TerminalSurface;

impl App {
    /// Render one frame and rebuild the hit map from what was actually
    /// drawn, so clicks resolve against the current screen.
    pub(crate) fn render_frame(&mut self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let mut hits = HitMap::default();
        let state = &self.state;
        let workspace = &self.workspace;
        let debug = DebugStatus {
            nav_idx: self.history.coordinator.nav_idx(),
            current_nav: self.history.coordinator.current_token().to_string(),
            in_flight: state.in_flight_requests,
        };
        let editor = self.interaction.extensions.editor();
        let dialog = self.interaction.extensions.dialog();
        let prompt = self.interaction.prompt.view();

        session.draw(|frame| {
            let layout = split_layout(frame.area(), state.debug_status_visible);
            if let Some(host) = workspace.main_host() {
                draw_tab_bar(frame, layout.tab_bar, host, &mut hits);
                draw_panel(frame, layout.content, host, &mut hits);
            }
            draw_status(frame, layout.status, state, &debug);

            if let Some(editor) = editor {
                draw_editor_overlay(frame, frame.area(), editor);
            }
            if let Some(dialog) = dialog {
                draw_dialog_overlay(frame, frame.area(), dialog);
            }
            if let Some(view) = &prompt {
                draw_prompt_overlay(frame, frame.area(), view);
            }
        })?;

        self.hits = hits;
        Ok(())
    }
}
