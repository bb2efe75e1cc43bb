//! Light/dark status-bar icon policy

use tinct_core::Color;

/// Whether light status-bar icons are requested.
///
/// Persisted as an integer; unrecognized values resolve to `Auto`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AutoSwitchMode {
    /// Never request light icons
    Off,
    /// Always request light icons
    On,
    /// Follow the effective status-bar color's perceived brightness
    #[default]
    Auto,
}

impl AutoSwitchMode {
    pub fn as_int(self) -> i64 {
        match self {
            AutoSwitchMode::Off => 0,
            AutoSwitchMode::On => 1,
            AutoSwitchMode::Auto => 2,
        }
    }

    pub fn from_int(value: i64) -> Self {
        match value {
            0 => AutoSwitchMode::Off,
            1 => AutoSwitchMode::On,
            _ => AutoSwitchMode::Auto,
        }
    }
}

/// Decide whether the status bar should use light (dark-on-light) icons
/// given the mode and the effective status-bar color.
pub fn light_status_bar(mode: AutoSwitchMode, status_bar_color: Color) -> bool {
    match mode {
        AutoSwitchMode::Off => false,
        AutoSwitchMode::On => true,
        AutoSwitchMode::Auto => status_bar_color.is_light(),
    }
}
