//! Table styling configuration.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== TableStyles =====

/// Styles for every part of the browser screen.
///
/// Without colors, emphasis falls back to modifiers so that the focused
/// column and the search input stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyles {
    pub header: Style,
    pub focused_header: Style,
    pub focused_cell: Style,
    pub cell: Style,
    pub search_border: Style,
    pub search_border_active: Style,
    pub placeholder: Style,
    pub cursor: Style,
    pub message: Style,
    pub footer: Style,
    pub status: Style,
}

impl TableStyles {
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                header: bold.fg(Color::Cyan),
                focused_header: bold.fg(Color::Black).bg(Color::Cyan),
                focused_cell: Style::default().fg(Color::Yellow),
                cell: Style::default(),
                search_border: Style::default().fg(Color::DarkGray),
                search_border_active: Style::default().fg(Color::Cyan),
                placeholder: Style::default().fg(Color::DarkGray),
                cursor: bold.bg(Color::White).fg(Color::Black),
                message: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
                footer: Style::default().fg(Color::Gray),
                status: Style::default().fg(Color::Red),
            }
        } else {
            Self {
                header: bold,
                focused_header: bold.add_modifier(Modifier::REVERSED),
                focused_cell: Style::default().add_modifier(Modifier::UNDERLINED),
                cell: Style::default(),
                search_border: Style::default(),
                search_border_active: bold,
                placeholder: Style::default().add_modifier(Modifier::DIM),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                message: Style::default().add_modifier(Modifier::ITALIC),
                footer: Style::default(),
                status: bold,
            }
        }
    }
}

impl Default for TableStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}
