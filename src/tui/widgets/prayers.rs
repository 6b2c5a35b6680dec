use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::Language;
use crate::prayer_times::clock::format_12h;
use crate::tui::app::Snapshot;
use crate::tui::theme::Palette;
use crate::utils::format::pad_display;

pub fn render(frame: &mut Frame, area: Rect, p: &Palette, snapshot: &Snapshot, language: Language) {
    let block = Block::default()
        .title(Span::styled(" Prayers ", p.gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(p.border())
        .style(p.surface());

    let items: Vec<ListItem> = snapshot
        .prayers
        .iter()
        .map(|(prayer, at)| {
            let is_current = snapshot.current == Some(*prayer);
            let passed = !is_current && *at <= snapshot.now;

            let (icon, status_style, status_label) = if is_current {
                ("▶", p.gold(), "now")
            } else if passed {
                ("●", p.green(), "passed")
            } else {
                ("○", p.dim(), "upcoming")
            };

            let name = match language {
                Language::En => prayer.display_name(),
                Language::Bn => prayer.display_name_bn(),
            };
            let name_style = if is_current {
                p.gold().add_modifier(Modifier::BOLD)
            } else {
                p.bold()
            };

            let line = Line::from(vec![
                Span::styled(format!("  {}", pad_display(name, 9)), name_style),
                Span::styled(format!("{:<10}", format_12h(*at)), p.dim()),
                Span::styled(icon, status_style),
                Span::styled(format!("  {}", status_label), p.dim()),
            ]);

            ListItem::new(line)
        })
        .collect();

    let mut lines = items;
    lines.push(ListItem::new(Line::from("")));
    lines.push(ListItem::new(Line::from(vec![
        Span::styled(format!("  {}", pad_display("Sehri", 9)), p.bold()),
        Span::styled(format_12h(snapshot.sehri_end), p.amber()),
    ])));
    lines.push(ListItem::new(Line::from(vec![
        Span::styled(format!("  {}", pad_display("Iftar", 9)), p.bold()),
        Span::styled(format_12h(snapshot.iftar_start), p.amber()),
    ])));

    let list = List::new(lines).block(block);
    frame.render_widget(list, area);
}
