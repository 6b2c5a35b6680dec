use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::models::Language;
use crate::prayer_times::clock::format_12h;
use crate::tui::app::Snapshot;
use crate::tui::theme::Palette;

pub fn render(frame: &mut Frame, area: Rect, p: &Palette, snapshot: &Snapshot, language: Language) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", p.gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(p.border())
        .style(p.surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let next = &snapshot.next;
    let name = match language {
        Language::En => next.prayer.display_name().to_uppercase(),
        Language::Bn => next.prayer.display_name_bn().to_string(),
    };
    let when = if next.tomorrow {
        format!("{} tomorrow", format_12h(next.at))
    } else {
        format_12h(next.at)
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {}", name), p.gold().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", when), p.dim()),
        ]),
        Line::from(vec![
            Span::styled("  in  ", p.dim()),
            Span::styled(
                snapshot.remaining.to_string(),
                p.amber().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(content), chunks[0]);

    let gauge_area = Rect {
        x: chunks[1].x + 2,
        width: chunks[1].width.saturating_sub(4),
        ..chunks[1]
    };
    let gauge = Gauge::default()
        .gauge_style(p.gauge())
        .ratio((snapshot.progress / 100.0).clamp(0.0, 1.0))
        .label(Span::styled(format!("{:.0}%", snapshot.progress), p.bold()));
    frame.render_widget(gauge, gauge_area);
}
