use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme::Palette;

/// Key hints, replaced by the reminder when one is due.
pub fn render(frame: &mut Frame, area: Rect, p: &Palette, reminder: Option<&str>) {
    let line = match reminder {
        Some(text) => Line::from(vec![
            Span::styled("⏰ ", p.amber()),
            Span::styled(text, p.amber().add_modifier(Modifier::BOLD)),
        ]),
        None => {
            let hints = [
                ("[d]", " division  "),
                ("[t]", " theme  "),
                ("[l]", " language  "),
                ("[n]", " reminders  "),
                ("[?]", " help  "),
                ("[q]", " quit"),
            ];
            let mut spans = Vec::new();
            for (key, label) in hints {
                spans.push(Span::styled(key, p.gold()));
                spans.push(Span::styled(label, p.dim()));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
