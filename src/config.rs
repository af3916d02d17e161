use crate::widget::OptionsOverride;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WalboxConfig {
    /// Option overrides applied under every binding
    #[serde(default)]
    pub defaults: OptionsOverride,

    /// Colors for the widget's style hooks
    #[serde(default)]
    pub theme: Theme,
}

/// Style for one class hook
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HookStyle {
    #[serde(default)]
    pub fg: Option<Color>,
    #[serde(default)]
    pub bg: Option<Color>,
    #[serde(default)]
    pub bold: bool,
}

impl HookStyle {
    const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            bold: false,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn style(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

/// Styles for `walbox-overlay`, `walbox-modal`, `walbox-title`,
/// `walbox-content` and `walbox-close`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Theme {
    pub overlay: HookStyle,
    pub modal: HookStyle,
    pub title: HookStyle,
    pub content: HookStyle,
    pub close: HookStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            overlay: HookStyle::new(colors::DIM, colors::OVERLAY),
            modal: HookStyle::new(colors::BORDER, colors::BG),
            title: HookStyle::new(colors::HIGHLIGHT, colors::BG).bold(),
            content: HookStyle::new(colors::FG, colors::BG),
            close: HookStyle::new(colors::CLOSE, colors::BG).bold(),
        }
    }
}

impl WalboxConfig {
    /// Load configuration from default path (~/.config/walbox/config.toml)
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Get the default configuration path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new().map_or_else(
            || PathBuf::from("~/.config/walbox/config.toml"),
            |dirs| dirs.config_dir().join("walbox").join("config.toml"),
        )
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: PathBuf) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Generate example configuration file content
    pub fn example() -> String {
        r##"# Walbox Configuration
# Place this file at ~/.config/walbox/config.toml

[defaults]
# Applied under every binding; page bindings override these
# size = "medium"        # small, medium or large
# overlay = false        # clicking the overlay closes the box
# escape = true          # Esc closes the box while the overlay is up
# drag = true            # drag by the title bar
# adjust = true          # follow the viewport on scroll/resize
# showOverlay = true
# showClose = true
# showTitle = true

[theme.overlay]
fg = "#565f89"
bg = "#16161e"

[theme.modal]
fg = "#3b4261"
bg = "#1a1b26"

[theme.title]
fg = "#bb9af7"
bg = "#1a1b26"
bold = true

[theme.content]
fg = "#c0caf5"
bg = "#1a1b26"

[theme.close]
fg = "#f7768e"
bg = "#1a1b26"
bold = true
"##
        .to_string()
    }
}

/// Tokyo Night color palette
pub mod colors {
    use super::Color;

    pub const BG: Color = Color::Rgb(26, 27, 38); // #1a1b26
    pub const OVERLAY: Color = Color::Rgb(22, 22, 30); // #16161e darker than bg
    pub const FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
    pub const DIM: Color = Color::Rgb(86, 95, 137); // #565f89 gray
    pub const LINK: Color = Color::Rgb(122, 162, 247); // #7aa2f7 blue
    pub const FOCUS: Color = Color::Rgb(255, 158, 100); // #ff9e64 orange
    pub const BORDER: Color = Color::Rgb(59, 66, 97); // #3b4261
    pub const HIGHLIGHT: Color = Color::Rgb(187, 154, 247); // #bb9af7 purple
    pub const CLOSE: Color = Color::Rgb(247, 118, 142); // #f7768e red
}
