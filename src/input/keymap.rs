use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Mode;
use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

/// Prompt, editor, and dialog modes consume their keys through the
/// prompt manager and extension input hooks; the keymap only covers
/// normal mode.
pub fn map_key_to_command_with_preset(
    key: KeyEvent,
    mode: Mode,
    preset: KeymapPreset,
) -> Option<Command> {
    match mode {
        Mode::Normal => match preset {
            KeymapPreset::Default => map_normal_mode_key_default(key),
            KeymapPreset::Emacs => map_normal_mode_key_emacs(key),
        },
        Mode::Prompt | Mode::Editor | Mode::Dialog => None,
    }
}

fn map_normal_mode_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('o') => Some(Command::HistoryBack),
            KeyCode::Char('i') => Some(Command::HistoryForward),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Char(']') => Some(Command::NextTab),
        KeyCode::BackTab | KeyCode::Char('[') => Some(Command::PrevTab),
        KeyCode::Char(digit @ '1'..='9') => Some(Command::SelectTab {
            index: digit as usize - '1' as usize,
        }),
        KeyCode::Char('o') => Some(Command::OpenPrompt),
        KeyCode::Char('r') => Some(Command::ReloadTab),
        KeyCode::Char('~') => Some(Command::DebugStatusToggle),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::Cancel),
        _ => None,
    }
}

fn map_normal_mode_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('o') => Some(Command::OpenPrompt),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::NextTab),
            KeyCode::Char('p') => Some(Command::PrevTab),
            KeyCode::Char('o') => Some(Command::HistoryBack),
            KeyCode::Char('i') => Some(Command::HistoryForward),
            KeyCode::Char('r') => Some(Command::ReloadTab),
            KeyCode::Char('g') => Some(Command::Cancel),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }

    map_normal_mode_key_default(key)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::Mode;
    use crate::command::Command;

    use super::{KeymapPreset, map_key_to_command_with_preset};

    #[test]
    fn keymap_preset_parse_defaults_on_unknown_values() {
        assert_eq!(KeymapPreset::parse("default"), KeymapPreset::Default);
        assert_eq!(KeymapPreset::parse("emacs"), KeymapPreset::Emacs);
        assert_eq!(KeymapPreset::parse("unknown"), KeymapPreset::Default);
    }

    #[test]
    fn default_preset_maps_tabs_digits_and_history() {
        let next = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            Mode::Normal,
            KeymapPreset::Default,
        );
        assert_eq!(next, Some(Command::NextTab));

        let third = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE),
            Mode::Normal,
            KeymapPreset::Default,
        );
        assert_eq!(third, Some(Command::SelectTab { index: 2 }));

        let back = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL),
            Mode::Normal,
            KeymapPreset::Default,
        );
        assert_eq!(back, Some(Command::HistoryBack));
    }

    #[test]
    fn editor_mode_consumes_nothing_from_the_keymap() {
        let mapped = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            Mode::Editor,
            KeymapPreset::Default,
        );
        assert_eq!(mapped, None);
    }

    #[test]
    fn emacs_preset_maps_ctrl_n_and_alt_o() {
        let next = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            Mode::Normal,
            KeymapPreset::Emacs,
        );
        assert_eq!(next, Some(Command::NextTab));

        let prompt = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::ALT),
            Mode::Normal,
            KeymapPreset::Emacs,
        );
        assert_eq!(prompt, Some(Command::OpenPrompt));
    }
}
