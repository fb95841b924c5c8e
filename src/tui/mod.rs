pub mod input;
pub mod theme;
pub mod view;

pub use input::TuiState;
pub use theme::{DEFAULT_THEME, Theme, next_theme, theme_by_name};
