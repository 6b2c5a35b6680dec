use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;

use crate::config::AppConfig;
use crate::data::Catalog;
use crate::models::{Language, PrayerType, Settings, SettingsPatch};
use crate::prayer_times::clock::minute_of_day;
use crate::prayer_times::evaluator::{NextFastingEvent, NextPrayer};
use crate::prayer_times::lookup::DATE_FORMAT;
use crate::prayer_times::{Countdown, DailyPrayers, FastingTimes};
use crate::store::{AppState, StateStore};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme::{self, Palette};
use crate::tui::widgets::{fasting, header, next_prayer, prayers, statusbar};
use crate::utils::hijri::{hijri_string, ramadan_day};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

/// Everything the dashboard shows for one minute of one day.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub date: NaiveDate,
    /// Minute of day the snapshot was taken.
    pub now: u32,
    pub hijri: String,
    pub ramadan_day: Option<usize>,
    pub division: String,
    /// Date of the schedule entry shown when today is not in the timetable.
    pub fell_back_to: Option<String>,
    pub prayers: Vec<(PrayerType, u32)>,
    pub current: Option<PrayerType>,
    pub next: NextPrayer,
    pub remaining: Countdown,
    pub progress: f64,
    pub sehri_end: u32,
    pub iftar_start: u32,
    pub fasting_now: bool,
    pub fasting: NextFastingEvent,
}

impl Snapshot {
    pub fn compute(
        catalog: &Catalog,
        config: &AppConfig,
        settings: &Settings,
        division_id: &str,
        date: NaiveDate,
        now: u32,
    ) -> Result<Self> {
        let division = catalog
            .division(division_id)
            .ok_or_else(|| anyhow!("Unknown division '{}'", division_id))?;
        let resolved = catalog.schedule.resolve(&division.id, date)?;
        let daily = DailyPrayers::from_day(resolved.day)?;
        let today = FastingTimes::from_day(resolved.day)?;

        let tomorrow = match date.succ_opt() {
            Some(d) => catalog
                .schedule
                .exact(&division.id, d)?
                .map(FastingTimes::from_day)
                .transpose()?,
            None => None,
        };

        let offset = config.display.hijri_offset;
        Ok(Self {
            date,
            now,
            hijri: hijri_string(date, offset),
            ramadan_day: ramadan_day(date, offset),
            division: division.label(settings.language).to_string(),
            fell_back_to: resolved.fell_back.then(|| resolved.day.date.clone()),
            prayers: daily.iter().collect(),
            current: daily.current_prayer(now),
            next: daily.next_prayer(now),
            remaining: daily.time_remaining(now),
            progress: daily.progress(now),
            sehri_end: today.sehri_end,
            iftar_start: today.iftar_start,
            fasting_now: today.is_fasting(now),
            fasting: today.next_event(tomorrow.as_ref(), now),
        })
    }

    /// Reminder text when Sehri end or Iftar is close and reminders are on.
    pub fn reminder(&self, settings: &Settings, lead_minutes: u32) -> Option<String> {
        if !settings.notifications {
            return None;
        }
        let left = self.fasting.remaining.total_minutes();
        (left <= lead_minutes).then(|| {
            format!(
                "{} in {}",
                self.fasting.event.display_name(),
                self.fasting.remaining
            )
        })
    }
}

pub struct App<'a> {
    pub view: View,
    pub should_quit: bool,
    pub state: AppState,
    pub snapshot: Result<Snapshot, String>,
    catalog: &'a Catalog,
    config: AppConfig,
    store: StateStore<'a>,
}

impl<'a> App<'a> {
    pub fn new(catalog: &'a Catalog, config: AppConfig, store: StateStore<'a>, state: AppState) -> Self {
        let mut app = App {
            view: View::Dashboard,
            should_quit: false,
            state,
            snapshot: Err(String::new()),
            catalog,
            config,
            store,
        };
        app.refresh();
        app
    }

    pub fn palette(&self) -> &'static Palette {
        theme::palette(self.state.settings.theme)
    }

    pub fn language(&self) -> Language {
        self.state.settings.language
    }

    /// Recompute the dashboard for the current wall-clock minute.
    pub fn refresh(&mut self) {
        let now = Local::now();
        self.snapshot = Snapshot::compute(
            self.catalog,
            &self.config,
            &self.state.settings,
            &self.state.selected_division,
            now.date_naive(),
            minute_of_day(now.time()),
        )
        .map_err(|e| {
            log::warn!("Dashboard refresh failed: {:#}", e);
            format!("{:#}", e)
        });
    }

    /// Division after the selected one, wrapping around.
    fn next_division(&self) -> Option<String> {
        let divisions = &self.catalog.divisions;
        let idx = divisions
            .iter()
            .position(|d| d.id == self.state.selected_division)
            .map(|i| (i + 1) % divisions.len())
            .unwrap_or(0);
        divisions.get(idx).map(|d| d.id.clone())
    }

    fn update<F>(&mut self, update: F)
    where
        F: FnOnce(&AppState) -> AppState,
    {
        self.state = self.store.apply(&self.state, update);
        self.refresh();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle actual key presses; some terminals also send release/repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.view == View::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.view = View::Dashboard;
            }
            return;
        }

        let settings = self.state.settings.clone();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.next_division() {
                    let patch = SettingsPatch {
                        selected_division: Some(id.clone()),
                        ..Default::default()
                    };
                    self.update(|s| s.set_selected_division(&id).update_settings(&patch));
                }
            }
            KeyCode::Char('t') => {
                let patch = SettingsPatch {
                    theme: Some(settings.theme.toggled()),
                    ..Default::default()
                };
                self.update(|s| s.update_settings(&patch));
            }
            KeyCode::Char('l') => {
                let patch = SettingsPatch {
                    language: Some(settings.language.toggled()),
                    ..Default::default()
                };
                self.update(|s| s.update_settings(&patch));
            }
            KeyCode::Char('n') => {
                let patch = SettingsPatch {
                    notifications: Some(!settings.notifications),
                    ..Default::default()
                };
                self.update(|s| s.update_settings(&patch));
            }
            KeyCode::Char('r') => {
                self.refresh();
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        let p = self.palette();
        let language = self.language();

        frame.render_widget(Block::default().style(p.base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let snapshot = match &self.snapshot {
            Ok(s) => s,
            Err(message) => {
                let text = vec![
                    Line::from(""),
                    Line::from(Span::styled(format!("  {}", message), p.red())),
                    Line::from(""),
                    Line::from(Span::styled(
                        "  Press [d] to pick another division",
                        p.dim(),
                    )),
                ];
                frame.render_widget(Paragraph::new(text), outer_chunks[1]);
                statusbar::render(frame, outer_chunks[2], p, None);
                return;
            }
        };

        header::render(frame, outer_chunks[0], p, snapshot);

        let reminder = snapshot.reminder(&self.state.settings, self.config.reminders.lead_minutes);
        statusbar::render(frame, outer_chunks[2], p, reminder.as_deref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer_chunks[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8), // next prayer
                Constraint::Min(0),    // fasting
            ])
            .split(columns[1]);

        prayers::render(frame, columns[0], p, snapshot, language);
        next_prayer::render(frame, right[0], p, snapshot, language);
        fasting::render(frame, right[1], p, snapshot);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let p = self.palette();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(12).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[d]  ", "Next division"),
            ("[t]  ", "Light / dark theme"),
            ("[l]  ", "English / Bangla"),
            ("[n]  ", "Reminders on / off"),
            ("[r]  ", "Refresh now"),
            ("[?]  ", "Toggle help"),
            ("[q]  ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                p.gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {}", key), p.gold()),
                Span::styled(label, p.dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", p.gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(p.gold())
            .style(p.surface());

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, popup_area);
    }
}

fn tick_rate(refresh_secs: u64) -> Duration {
    if refresh_secs == 0 {
        log::warn!("display.refresh_secs is 0; refreshing every second instead");
        return Duration::from_secs(1);
    }
    Duration::from_secs(refresh_secs)
}

/// Run the dashboard until the user quits.
pub fn run(catalog: &Catalog, config: AppConfig, store: StateStore<'_>, state: AppState) -> Result<()> {
    let tick = tick_rate(config.display.refresh_secs);
    let mut app = App::new(catalog, config, store, state);
    log::debug!(
        "Dashboard started for {} on {}",
        app.state.selected_division,
        Local::now().format(DATE_FORMAT)
    );

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Resize) => {}
            Ok(Event::Tick) => app.refresh(),
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::Theme;
    use crate::prayer_times::parse_minutes;
    use crate::prayer_times::evaluator::FastingEvent;
    use rusqlite::Connection;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn snapshot_at(division: &str, day: &str, now: &str) -> Snapshot {
        let catalog = Catalog::bundled().unwrap();
        Snapshot::compute(
            &catalog,
            &AppConfig::default(),
            &Settings::default(),
            division,
            date(day),
            parse_minutes(now).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_snapshot_afternoon() {
        let s = snapshot_at("dhaka", "2025-03-01", "1:00 PM");
        assert_eq!(s.division, "Dhaka");
        assert!(s.fell_back_to.is_none());
        assert_eq!(s.prayers.len(), 5);
        assert_eq!(s.current, Some(PrayerType::Dhuhr));
        assert_eq!(s.next.prayer, PrayerType::Asr);
        assert!(s.fasting_now);
        assert_eq!(s.fasting.event, FastingEvent::Iftar);
        assert!(s.progress > 0.0 && s.progress < 100.0);
    }

    #[test]
    fn test_snapshot_after_isha_uses_tomorrows_sehri() {
        let catalog = Catalog::bundled().unwrap();
        let tomorrow = catalog.schedule.days("dhaka").unwrap()[1].sehri_end.clone();
        let s = snapshot_at("dhaka", "2025-03-01", "11:30 PM");
        assert!(s.next.tomorrow);
        assert_eq!(s.fasting.event, FastingEvent::SehriEnd);
        assert!(s.fasting.tomorrow);
        assert_eq!(s.fasting.at, parse_minutes(&tomorrow).unwrap());
    }

    #[test]
    fn test_snapshot_outside_timetable_falls_back() {
        let s = snapshot_at("sylhet", "2025-06-01", "9:00 AM");
        assert_eq!(s.fell_back_to.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_unknown_division_is_an_error() {
        let catalog = Catalog::bundled().unwrap();
        let result = Snapshot::compute(
            &catalog,
            &AppConfig::default(),
            &Settings::default(),
            "atlantis",
            date("2025-03-01"),
            600,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reminder_respects_lead_and_notifications() {
        let catalog = Catalog::bundled().unwrap();
        let iftar = parse_minutes(&catalog.schedule.days("dhaka").unwrap()[0].iftar_start).unwrap();
        let compute = |now| {
            Snapshot::compute(
                &catalog,
                &AppConfig::default(),
                &Settings::default(),
                "dhaka",
                date("2025-03-01"),
                now,
            )
            .unwrap()
        };

        let close = compute(iftar - 10);
        let on = Settings::default();
        assert_eq!(close.reminder(&on, 15).as_deref(), Some("Iftar in 10m"));
        let off = Settings {
            notifications: false,
            ..Settings::default()
        };
        assert_eq!(close.reminder(&off, 15), None);
        assert_eq!(compute(iftar - 60).reminder(&on, 15), None);
    }

    #[test]
    fn test_keys_update_and_persist_state() {
        let catalog = Catalog::bundled().unwrap();
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let mut app = App::new(
            &catalog,
            AppConfig::default(),
            StateStore::new(&conn),
            AppState::default(),
        );

        let press = |c| KeyEvent::from(KeyCode::Char(c));
        app.handle_key(press('t'));
        app.handle_key(press('l'));
        app.handle_key(press('n'));
        app.handle_key(press('d'));
        assert_eq!(app.state.settings.theme, Theme::Light);
        assert_eq!(app.state.settings.language, Language::Bn);
        assert!(!app.state.settings.notifications);
        assert_eq!(app.state.selected_division, "chattogram");
        assert_eq!(app.state.settings.selected_division, "chattogram");

        let saved = StateStore::new(&conn).load().unwrap();
        assert_eq!(saved, app.state);

        app.handle_key(press('?'));
        assert_eq!(app.view, View::Help);
        app.handle_key(press('q'));
        assert!(!app.should_quit);
        app.handle_key(press('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tick_rate_floors_zero_at_one_second() {
        assert_eq!(tick_rate(0), Duration::from_secs(1));
        assert_eq!(tick_rate(60), Duration::from_secs(60));
    }
}
