use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_segmentation::UnicodeSegmentation;

use crate::prompt::PromptView;
use crate::template::{EditorSession, TemplateDialog};

use super::layout::centered_rect;

pub fn draw_editor_overlay(frame: &mut Frame<'_>, area: Rect, editor: &EditorSession) {
    if area.width < 4 || area.height < 4 {
        return;
    }

    let popup = centered_rect(
        area,
        area.width.saturating_sub(4).min(90),
        area.height.saturating_sub(2).min(24),
    );
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" Edit Template ('{}') ", editor.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height < 2 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body_height = chunks[0].height as usize;
    let (cursor_row, cursor_col) = editor.buffer.cursor();
    let start = cursor_row.saturating_sub(body_height.saturating_sub(1));
    let mut lines = Vec::new();
    for (offset, text) in editor.buffer.lines().iter().skip(start).enumerate() {
        if offset >= body_height {
            break;
        }
        if start + offset == cursor_row {
            lines.push(caret_line(text, cursor_col));
        } else {
            lines.push(Line::raw(text.clone()));
        }
    }
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let footer = if editor.is_saving() {
        Span::styled("saving...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("Ctrl-S save | Esc cancel", Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), chunks[1]);
}

pub fn draw_dialog_overlay(frame: &mut Frame<'_>, area: Rect, dialog: &TemplateDialog) {
    if area.width < 4 || area.height < 4 {
        return;
    }

    let (title, message, hint) = match dialog {
        TemplateDialog::ConfirmOverride { message, .. } => (
            " Errors in template ".to_string(),
            message.as_str(),
            "Save anyway? [y/n]",
        ),
        TemplateDialog::Failure { title, message } => {
            (format!(" {} ", title.trim()), message.as_str(), "[Enter] dismiss")
        }
    };

    let message_lines: Vec<&str> = message.split('\n').collect();
    let height = (message_lines.len() as u16 + 4).min(area.height);
    let popup = centered_rect(area, area.width.saturating_sub(8).min(64), height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines: Vec<Line> = message_lines.into_iter().map(Line::raw).collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(hint, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn draw_prompt_overlay(frame: &mut Frame<'_>, area: Rect, view: &PromptView) {
    if area.width < 10 || area.height < 3 {
        return;
    }

    let popup = centered_rect(area, area.width.saturating_sub(8).min(64), 3);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Open location ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(prompt_input_line(&view.value, view.cursor)),
        inner,
    );
}

// Software caret: the grapheme under the cursor renders reversed, with a
// trailing space standing in at end of line.
fn caret_line(text: &str, cursor_col: usize) -> Line<'static> {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    let cursor_col = cursor_col.min(graphemes.len());
    let before: String = graphemes[..cursor_col].concat();
    let at = graphemes
        .get(cursor_col)
        .copied()
        .unwrap_or(" ")
        .to_string();
    let after: String = graphemes
        .get(cursor_col + 1..)
        .map(|rest| rest.concat())
        .unwrap_or_default();

    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().reversed()),
        Span::raw(after),
    ])
}

fn prompt_input_line(value: &str, cursor: usize) -> Line<'static> {
    let mut spans = vec![Span::styled("> ".to_string(), Style::default().fg(Color::White))];
    spans.extend(caret_line(value, cursor).spans);
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::style::Modifier;

    use crate::prompt::PromptView;
    use crate::template::{EditorSession, TemplateDialog, TemplateOrigin};

    use super::{caret_line, draw_dialog_overlay, draw_editor_overlay, draw_prompt_overlay};

    fn origin() -> TemplateOrigin {
        TemplateOrigin {
            host: "main-tabs".to_string(),
            tab: "home".to_string(),
            base: "/tpl".to_string(),
        }
    }

    #[test]
    fn caret_line_highlights_the_cursor_grapheme() {
        let line = caret_line("abc", 1);
        assert_eq!(line.spans[1].content.as_ref(), "b");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn caret_line_uses_a_space_at_end_of_line() {
        let line = caret_line("abc", 3);
        assert_eq!(line.spans[1].content.as_ref(), " ");
    }

    #[test]
    fn overlays_render_without_panicking() {
        let backend = TestBackend::new(50, 16);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                let area = Rect::new(0, 0, 50, 16);
                draw_editor_overlay(
                    frame,
                    area,
                    &EditorSession::new(origin(), "header", "line one\nline two"),
                );
                draw_dialog_overlay(
                    frame,
                    area,
                    &TemplateDialog::ConfirmOverride {
                        origin: origin(),
                        name: "header".to_string(),
                        content: "x".to_string(),
                        message: "bad token\non line 2".to_string(),
                    },
                );
                draw_prompt_overlay(
                    frame,
                    area,
                    &PromptView {
                        value: "!/grid".to_string(),
                        cursor: 2,
                    },
                );
            })
            .expect("draw should pass");
    }
}
