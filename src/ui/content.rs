use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::nav::{PanelBody, TabHost};
use crate::template::{PanelBlock, TemplateFragment, TemplateOrigin};

use super::hits::{HitMap, HitTarget};

const EDIT_AFFORDANCE: &str = "[edit]";
const CREATE_AFFORDANCE: &str = "[create]";

/// Render the active tab's panel body. Template fragments get a header
/// row with an edit or create affordance; the affordance cell is
/// registered in the hit map when the tab carries a template controller
/// base.
pub fn draw_panel(frame: &mut Frame<'_>, area: Rect, host: &TabHost, hits: &mut HitMap) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let Some(tab) = host.active_tab() else {
        frame.render_widget(
            Paragraph::new("no open tabs").style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    };

    match &tab.body {
        PanelBody::Loading => {
            frame.render_widget(
                Paragraph::new(format!("loading '{}'...", tab.title))
                    .style(Style::default().fg(Color::Yellow)),
                area,
            );
        }
        PanelBody::Failed(message) => {
            frame.render_widget(
                Paragraph::new(format!("panel load failed: {message}"))
                    .style(Style::default().fg(Color::Red)),
                area,
            );
        }
        PanelBody::Ready(doc) => {
            let mut lines = Vec::new();
            for block in &doc.blocks {
                match block {
                    PanelBlock::Text(text) => lines.push(Line::raw(text.clone())),
                    PanelBlock::Fragment(fragment) => {
                        let row = lines.len() as u16;
                        let origin = tab.template_base.as_ref().map(|base| TemplateOrigin {
                            host: host.id().to_string(),
                            tab: tab.id.clone(),
                            base: base.clone(),
                        });
                        lines.push(fragment_header(fragment, origin, area, row, hits));
                        for body_line in &fragment.body {
                            lines.push(Line::styled(
                                body_line.clone(),
                                Style::default().fg(Color::Gray),
                            ));
                        }
                    }
                }
            }
            frame.render_widget(Paragraph::new(lines), area);
        }
    }
}

fn fragment_header(
    fragment: &TemplateFragment,
    origin: Option<TemplateOrigin>,
    area: Rect,
    row: u16,
    hits: &mut HitMap,
) -> Line<'static> {
    let prefix = if fragment.deployed {
        format!("▸ template '{}'  ", fragment.name)
    } else {
        format!("▸ template '{}' (not deployed)  ", fragment.name)
    };
    let affordance = if fragment.deployed {
        EDIT_AFFORDANCE
    } else {
        CREATE_AFFORDANCE
    };

    let mut spans = vec![Span::styled(
        prefix.clone(),
        Style::default().fg(Color::Cyan),
    )];
    if let Some(origin) = origin {
        let y = area.y.saturating_add(row);
        if y < area.bottom() {
            let x = area.x.saturating_add(prefix.width() as u16);
            if x < area.right() {
                let width = (affordance.width() as u16).min(area.right() - x);
                let target = if fragment.deployed {
                    HitTarget::EditTemplate {
                        origin,
                        name: fragment.name.clone(),
                    }
                } else {
                    HitTarget::CreateTemplate {
                        origin,
                        name: fragment.name.clone(),
                    }
                };
                hits.push(Rect::new(x, y, width, 1), target);
            }
        }
        spans.push(Span::styled(
            affordance.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ));
    }
    Line::from(spans)
}
