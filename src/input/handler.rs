use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Mode};
use crate::command::Command;
use crate::prompt::PromptKeyResult;
use crate::ui::HitTarget;

use super::events::{AppInputEvent, InputHookResult};
use super::keymap::{KeymapPreset, map_key_to_command_with_preset};

pub(crate) struct InputEventOutcome {
    pub(crate) commands: Vec<Command>,
    pub(crate) redraw: bool,
}

fn outcome(commands: Vec<Command>, redraw: bool) -> InputEventOutcome {
    InputEventOutcome { commands, redraw }
}

impl App {
    pub(crate) fn handle_input_event(&mut self, event: Event) -> InputEventOutcome {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key_event(key)
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.handle_click(column, row),
            Event::Resize(_, _) => outcome(Vec::new(), true),
            _ => outcome(Vec::new(), false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> InputEventOutcome {
        match self.state.mode {
            Mode::Prompt => match self.interaction.prompt.handle_key(key) {
                PromptKeyResult::Consumed { redraw } => outcome(Vec::new(), redraw),
                PromptKeyResult::Submit(token) => {
                    outcome(vec![Command::OpenLocation { token }], true)
                }
                PromptKeyResult::CloseRequested => outcome(vec![Command::Cancel], true),
            },
            Mode::Editor | Mode::Dialog => {
                let hook = self
                    .interaction
                    .extensions
                    .handle_input(AppInputEvent::Key(key), &mut self.state);
                match hook {
                    InputHookResult::EmitCommand(command) => outcome(vec![command], true),
                    InputHookResult::Consumed => outcome(Vec::new(), true),
                    InputHookResult::Ignored => outcome(Vec::new(), false),
                }
            }
            Mode::Normal => {
                let preset = KeymapPreset::parse(&self.config.keymap.preset);
                match map_key_to_command_with_preset(key, self.state.mode, preset) {
                    Some(command) => outcome(vec![command], true),
                    None => outcome(Vec::new(), false),
                }
            }
        }
    }

    // Clicks resolve through the hit map of the last rendered frame;
    // overlays take the keyboard, so clicks only act in normal mode.
    fn handle_click(&mut self, column: u16, row: u16) -> InputEventOutcome {
        if self.state.mode != Mode::Normal {
            return outcome(Vec::new(), false);
        }
        let Some(target) = self.hits.hit(column, row) else {
            return outcome(Vec::new(), false);
        };
        let command = match target {
            HitTarget::Tab { index } => Command::SelectTab { index: *index },
            HitTarget::EditTemplate { origin, name } => Command::EditTemplate {
                origin: origin.clone(),
                name: name.clone(),
            },
            HitTarget::CreateTemplate { origin, name } => Command::CreateTemplate {
                origin: origin.clone(),
                name: name.clone(),
            },
        };
        outcome(vec![command], true)
    }
}
