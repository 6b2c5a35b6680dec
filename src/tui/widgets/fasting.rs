use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::prayer_times::clock::format_12h;
use crate::tui::app::Snapshot;
use crate::tui::theme::Palette;

pub fn render(frame: &mut Frame, area: Rect, p: &Palette, snapshot: &Snapshot) {
    let block = Block::default()
        .title(Span::styled(" Fast ", p.gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(p.border())
        .style(p.surface());

    let event = &snapshot.fasting;
    let status = if snapshot.fasting_now {
        Span::styled("  Fasting", p.green().add_modifier(Modifier::BOLD))
    } else {
        Span::styled("  Not fasting", p.dim())
    };
    let when = if event.tomorrow {
        format!("{} tomorrow", format_12h(event.at))
    } else {
        format_12h(event.at)
    };

    let content = vec![
        Line::from(""),
        Line::from(status),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {}", event.event.display_name()), p.bold()),
            Span::styled(format!("  {}", when), p.dim()),
        ]),
        Line::from(vec![
            Span::styled("  in  ", p.dim()),
            Span::styled(
                event.remaining.to_string(),
                p.amber().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(content).block(block), area);
}
