use serde::{Deserialize, Serialize};

/// Value of the CSS `color-scheme` property picked in the theme switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    #[serde(rename = "light dark")]
    Automatic,
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 3] = [ColorScheme::Automatic, ColorScheme::Light, ColorScheme::Dark];

    pub fn parse(value: &str) -> Option<Self> {
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.css_value() == value.trim())
    }

    pub fn css_value(self) -> &'static str {
        match self {
            ColorScheme::Automatic => "light dark",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorScheme::Automatic => "Automatic",
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
        }
    }
}

/// One entry of the theme switcher's `<select>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn theme_options() -> Vec<ThemeOption> {
    ColorScheme::ALL
        .into_iter()
        .map(|scheme| ThemeOption {
            value: scheme.css_value(),
            label: scheme.label(),
        })
        .collect()
}
