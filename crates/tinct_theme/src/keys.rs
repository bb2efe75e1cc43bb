//! Persisted theme property keys
//!
//! Key strings are fixed: they name entries in the preference file and must
//! stay stable across releases.

/// A persisted theme property
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ThemeKey {
    FirstTime,
    ActivityTheme,
    IsDark,
    PrimaryColor,
    AccentColor,
    PrimaryTextColor,
    SecondaryTextColor,
    PrimaryTextInverseColor,
    SecondaryTextInverseColor,
    WindowBgColor,
    StatusBarColor,
    NavBarColor,
    LightStatusMode,
}

impl ThemeKey {
    /// All keys, in a fixed delivery order
    pub const ALL: [ThemeKey; 13] = [
        ThemeKey::FirstTime,
        ThemeKey::ActivityTheme,
        ThemeKey::IsDark,
        ThemeKey::PrimaryColor,
        ThemeKey::AccentColor,
        ThemeKey::PrimaryTextColor,
        ThemeKey::SecondaryTextColor,
        ThemeKey::PrimaryTextInverseColor,
        ThemeKey::SecondaryTextInverseColor,
        ThemeKey::WindowBgColor,
        ThemeKey::StatusBarColor,
        ThemeKey::NavBarColor,
        ThemeKey::LightStatusMode,
    ];

    /// The fixed preference-file name of this key
    pub fn name(self) -> &'static str {
        match self {
            ThemeKey::FirstTime => "first_time",
            ThemeKey::ActivityTheme => "activity_theme",
            ThemeKey::IsDark => "is_dark",
            ThemeKey::PrimaryColor => "primary_color",
            ThemeKey::AccentColor => "accent_color",
            ThemeKey::PrimaryTextColor => "primary_text",
            ThemeKey::SecondaryTextColor => "secondary_text",
            ThemeKey::PrimaryTextInverseColor => "primary_text_inverse",
            ThemeKey::SecondaryTextInverseColor => "secondary_text_inverse",
            ThemeKey::WindowBgColor => "window_bg_color",
            ThemeKey::StatusBarColor => "status_bar_color",
            ThemeKey::NavBarColor => "nav_bar_color",
            ThemeKey::LightStatusMode => "light_status_mode",
        }
    }

    /// Look a key up by its preference-file name
    pub fn from_name(name: &str) -> Option<Self> {
        ThemeKey::ALL.into_iter().find(|k| k.name() == name)
    }
}
