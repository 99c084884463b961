use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

/// One-line "open location" prompt. Submitted text is dispatched as a
/// location token (`!/path?query`).
#[derive(Debug, Default)]
pub struct PromptManager {
    active: Option<Input>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKeyResult {
    Consumed { redraw: bool },
    Submit(String),
    CloseRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub value: String,
    pub cursor: usize,
}

impl PromptManager {
    pub fn open(&mut self) {
        self.active = Some(Input::default());
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn close(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptKeyResult {
        let Some(input) = self.active.as_mut() else {
            return PromptKeyResult::Consumed { redraw: false };
        };
        match key.code {
            KeyCode::Esc => PromptKeyResult::CloseRequested,
            KeyCode::Enter => PromptKeyResult::Submit(input.value().to_string()),
            _ => {
                input.handle_event(&Event::Key(key));
                PromptKeyResult::Consumed { redraw: true }
            }
        }
    }

    pub fn view(&self) -> Option<PromptView> {
        let input = self.active.as_ref()?;
        Some(PromptView {
            value: input.value().to_string(),
            cursor: input.visual_cursor(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{PromptKeyResult, PromptManager};

    #[test]
    fn typed_text_is_submitted_on_enter() {
        let mut prompt = PromptManager::default();
        prompt.open();
        for ch in "!/a?x=1".chars() {
            prompt.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }

        let result = prompt.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(result, PromptKeyResult::Submit("!/a?x=1".to_string()));
    }

    #[test]
    fn escape_requests_close_without_submitting() {
        let mut prompt = PromptManager::default();
        prompt.open();
        let result = prompt.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(result, PromptKeyResult::CloseRequested);
        assert!(prompt.close());
        assert!(!prompt.close());
    }
}
