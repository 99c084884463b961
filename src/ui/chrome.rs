use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::app::{AppState, Mode};
use crate::nav::TabHost;

use super::hits::{HitMap, HitTarget};

/// Values surfaced on the debug status row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugStatus {
    pub nav_idx: u8,
    pub current_nav: String,
    pub in_flight: usize,
}

pub fn draw_tab_bar(frame: &mut Frame<'_>, area: Rect, host: &TabHost, hits: &mut HitMap) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut spans = Vec::new();
    let mut x = area.x;
    for (index, tab) in host.tabs().iter().enumerate() {
        let label = format!(" {}:{} ", index + 1, tab.title);
        let width = label.width() as u16;
        let style = if host.active_index() == Some(index) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        if x < area.right() {
            hits.push(
                Rect::new(x, area.y, width.min(area.right() - x), 1),
                HitTarget::Tab { index },
            );
        }
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("│"));
        x = x.saturating_add(width).saturating_add(1);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn draw_status(frame: &mut Frame<'_>, area: Rect, app: &AppState, debug: &DebugStatus) {
    let mode = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Prompt => "PROMPT",
        Mode::Editor => "EDITOR",
        Mode::Dialog => "DIALOG",
    };

    let message = if app.status.message.is_empty() {
        "-"
    } else {
        app.status.message.as_str()
    };
    let status_text = format!("{message} | {mode}");
    let status = Paragraph::new(status_text)
        .style(Style::default())
        .wrap(Wrap { trim: true });

    if app.debug_status_visible && area.height >= 2 {
        let top = Rect::new(area.x, area.y, area.width, 1);
        frame.render_widget(status, top);

        let command_id = app
            .status
            .last_action_id
            .map(|id| id.as_str())
            .unwrap_or("-");
        let debug_text = format!(
            "cmd={command_id} | nav_idx={} | current={:?} | in_flight={}",
            debug.nav_idx, debug.current_nav, debug.in_flight
        );
        let bottom = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            area.height.saturating_sub(1).max(1),
        );
        frame.render_widget(
            Paragraph::new(debug_text)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true }),
            bottom,
        );
        return;
    }

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::nav::{PanelBody, TabEntry, TabHost};
    use crate::ui::{HitMap, HitTarget};

    use super::draw_tab_bar;

    fn host_with(ids: &[&str]) -> TabHost {
        let mut host = TabHost::new("main-tabs");
        for id in ids {
            host.push_tab(TabEntry {
                id: id.to_string(),
                title: id.to_string(),
                load_cnf: None,
                template_base: None,
                body: PanelBody::Loading,
            });
        }
        host
    }

    #[test]
    fn tab_bar_registers_one_hit_region_per_tab() {
        let host = host_with(&["home", "reports"]);
        let mut hits = HitMap::default();
        let backend = TestBackend::new(40, 4);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                draw_tab_bar(frame, Rect::new(0, 0, 40, 1), &host, &mut hits);
            })
            .expect("draw should pass");

        assert_eq!(hits.len(), 2);
        assert_eq!(hits.hit(1, 0), Some(&HitTarget::Tab { index: 0 }));
    }
}
