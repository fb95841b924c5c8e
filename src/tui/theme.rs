// Visual themes, the terminal rendition of the web app's color schemes.
// Cycled with a key; the chosen name is the one piece of persisted state.

use ratatui::style::Color;

pub const DEFAULT_THEME: &str = "default";

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    /// Accent for titles, the play indicator, and active steps.
    pub accent: Color,
    /// Playhead column highlight.
    pub playhead: Color,
    /// Inactive grid cells.
    pub grid_dim: Color,
    pub text: Color,
    pub border: Color,
}

pub static THEMES: &[Theme] = &[
    Theme {
        name: "default",
        accent: Color::Cyan,
        playhead: Color::White,
        grid_dim: Color::DarkGray,
        text: Color::Gray,
        border: Color::DarkGray,
    },
    Theme {
        name: "underground",
        accent: Color::LightGreen,
        playhead: Color::White,
        grid_dim: Color::DarkGray,
        text: Color::Green,
        border: Color::Black,
    },
    Theme {
        name: "forest",
        accent: Color::Green,
        playhead: Color::LightYellow,
        grid_dim: Color::Rgb(45, 74, 45),
        text: Color::Rgb(180, 220, 180),
        border: Color::Rgb(58, 90, 58),
    },
    Theme {
        name: "sunset",
        accent: Color::LightRed,
        playhead: Color::Yellow,
        grid_dim: Color::Rgb(80, 40, 40),
        text: Color::Rgb(240, 200, 170),
        border: Color::Rgb(120, 60, 50),
    },
    Theme {
        name: "ocean",
        accent: Color::LightBlue,
        playhead: Color::White,
        grid_dim: Color::Rgb(30, 50, 80),
        text: Color::Rgb(170, 200, 230),
        border: Color::Rgb(40, 70, 110),
    },
];

pub fn theme_by_name(name: &str) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.name == name)
        .unwrap_or(&THEMES[0])
}

pub fn next_theme(current: &str) -> &'static Theme {
    let idx = THEMES.iter().position(|t| t.name == current).unwrap_or(0);
    &THEMES[(idx + 1) % THEMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert_eq!(theme_by_name("vaporwave").name, "default");
    }

    #[test]
    fn cycling_visits_every_theme_and_wraps() {
        let mut name = THEMES[0].name;
        let mut seen = Vec::new();
        for _ in 0..THEMES.len() {
            seen.push(name);
            name = next_theme(name).name;
        }
        assert_eq!(name, THEMES[0].name);
        assert_eq!(seen.len(), THEMES.len());
    }
}
