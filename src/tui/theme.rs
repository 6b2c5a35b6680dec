use ratatui::style::{Color, Modifier, Style};

use crate::models::Theme;

/// Colours for one theme. Widgets take styles from here, never raw colours.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub text_dim: Color,
    pub gold: Color,
    pub green: Color,
    pub amber: Color,
    pub red: Color,
    pub gauge_empty: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(18, 16, 14),
    surface: Color::Rgb(28, 25, 20),
    border: Color::Rgb(55, 48, 36),
    text: Color::Rgb(230, 218, 196),
    text_dim: Color::Rgb(130, 118, 96),
    gold: Color::Rgb(196, 160, 68),
    green: Color::Rgb(92, 148, 92),
    amber: Color::Rgb(210, 138, 60),
    red: Color::Rgb(180, 82, 62),
    gauge_empty: Color::Rgb(38, 34, 26),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(250, 247, 240),
    surface: Color::Rgb(255, 253, 248),
    border: Color::Rgb(214, 204, 184),
    text: Color::Rgb(40, 36, 30),
    text_dim: Color::Rgb(120, 110, 94),
    gold: Color::Rgb(150, 112, 24),
    green: Color::Rgb(46, 118, 64),
    amber: Color::Rgb(184, 96, 20),
    red: Color::Rgb(170, 56, 40),
    gauge_empty: Color::Rgb(232, 224, 208),
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    pub fn surface(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn bold(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn gold(&self) -> Style {
        Style::default().fg(self.gold)
    }

    pub fn green(&self) -> Style {
        Style::default().fg(self.green)
    }

    pub fn amber(&self) -> Style {
        Style::default().fg(self.amber)
    }

    pub fn red(&self) -> Style {
        Style::default().fg(self.red)
    }

    pub fn gauge(&self) -> Style {
        Style::default().fg(self.gold).bg(self.gauge_empty)
    }
}
