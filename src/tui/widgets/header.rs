use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::app::Snapshot;
use crate::tui::theme::Palette;

pub fn render(frame: &mut Frame, area: Rect, p: &Palette, snapshot: &Snapshot) {
    let gregorian_str = snapshot.date.format("%A, %b %d, %Y").to_string();

    let mut title = vec![
        Span::styled("  সেহরি  ", p.gold().add_modifier(Modifier::BOLD)),
        Span::styled(snapshot.division.as_str(), p.gold()),
    ];
    if let Some(day) = snapshot.ramadan_day {
        title.push(Span::styled("  ·  ", p.dim()));
        title.push(Span::styled(format!("Ramadan {}", day), p.amber()));
    }

    let mut date_line = Vec::new();
    if !snapshot.hijri.is_empty() {
        date_line.push(Span::styled(snapshot.hijri.as_str(), p.amber()));
        date_line.push(Span::styled("  ·  ", p.dim()));
    }
    date_line.push(Span::styled(gregorian_str, p.dim()));
    if let Some(shown) = &snapshot.fell_back_to {
        date_line.push(Span::styled(
            format!("  (not in timetable; showing {})", shown),
            p.red(),
        ));
    }

    let text = vec![Line::from(title), Line::from(""), Line::from(date_line)];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(p.gold().add_modifier(Modifier::BOLD))
        .style(p.base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
