use ratatui::style::{Color, Modifier, Style};

/// Dark slate background with sandstone text and an amber accent.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(22, 24, 28);
    pub const FG: Color = Color::Rgb(226, 214, 190);
    pub const FG_DIM: Color = Color::Rgb(160, 150, 130);
    pub const FG_MUTED: Color = Color::Rgb(90, 92, 98);

    pub const ACCENT_AMBER: Color = Color::Rgb(255, 176, 0);
    pub const ACCENT_GREEN: Color = Color::Rgb(120, 200, 120);
    pub const ACCENT_YELLOW: Color = Color::Rgb(240, 220, 80);
    pub const ACCENT_RED: Color = Color::Rgb(255, 90, 80);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_DIM).bg(Self::BG)
    }

    /// Border of the panel holding the selected field.
    pub fn border_active() -> Style {
        Style::default().fg(Self::ACCENT_AMBER).bg(Self::BG)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Selected input box.
    pub fn input_active() -> Style {
        Style::default()
            .fg(Self::BG)
            .bg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::FG).bg(Color::Rgb(40, 43, 50))
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn ok() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warn() -> Style {
        Style::default()
            .fg(Self::ACCENT_YELLOW)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }
}
