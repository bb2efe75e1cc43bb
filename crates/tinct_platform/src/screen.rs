//! The host-screen trait and style-attribute resolution

use crate::error::Result;
use tinct_core::Color;

/// Style attributes a platform resolves theme defaults from.
///
/// When a theme property has never been written, its value falls back to the
/// color the host's current style carries for the matching attribute.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum StyleAttr {
    ColorPrimary,
    ColorPrimaryDark,
    ColorAccent,
    TextColorPrimary,
    TextColorSecondary,
    TextColorPrimaryInverse,
    TextColorSecondaryInverse,
    WindowBackground,
}

impl StyleAttr {
    /// All resolvable attributes, in a fixed order
    pub const ALL: [StyleAttr; 8] = [
        StyleAttr::ColorPrimary,
        StyleAttr::ColorPrimaryDark,
        StyleAttr::ColorAccent,
        StyleAttr::TextColorPrimary,
        StyleAttr::TextColorSecondary,
        StyleAttr::TextColorPrimaryInverse,
        StyleAttr::TextColorSecondaryInverse,
        StyleAttr::WindowBackground,
    ];
}

/// A handle to the currently visible screen.
///
/// Implemented by the host application for whatever object owns the window.
/// All methods are invoked on the UI thread by the theme engine; `recreate`
/// is the destructive path the engine takes when the theme resource changes,
/// because platforms have no lighter-weight way to apply a new style.
pub trait Screen: Send {
    /// Resolve a color from the platform's current style.
    ///
    /// Infallible: a live screen always has an effective style.
    fn resolve_attr(&self, attr: StyleAttr) -> Color;

    /// Install a theme/style resource on the screen (applied on next create)
    fn set_theme_resource(&mut self, resource_id: u32) -> Result<()>;

    /// Tear the screen down and rebuild it with the current theme resource
    fn recreate(&mut self) -> Result<()>;

    fn set_status_bar_color(&mut self, color: Color) -> Result<()>;

    /// Request dark (`false`) or light (`true`) status-bar icons
    fn set_light_status_bar(&mut self, light: bool) -> Result<()>;

    fn set_nav_bar_color(&mut self, color: Color) -> Result<()>;

    fn set_window_background(&mut self, color: Color) -> Result<()>;
}

/// Style defaults captured from a screen when the theme engine attaches.
///
/// Holding a copy keeps default resolution available after the originating
/// screen is replaced (the engine re-captures on each attach).
#[derive(Clone, Copy, Debug)]
pub struct StyleDefaults {
    pub color_primary: Color,
    pub color_primary_dark: Color,
    pub color_accent: Color,
    pub text_color_primary: Color,
    pub text_color_secondary: Color,
    pub text_color_primary_inverse: Color,
    pub text_color_secondary_inverse: Color,
    pub window_background: Color,
}

impl StyleDefaults {
    /// Resolve every attribute from the given screen's current style
    pub fn capture<S: Screen + ?Sized>(screen: &S) -> Self {
        Self {
            color_primary: screen.resolve_attr(StyleAttr::ColorPrimary),
            color_primary_dark: screen.resolve_attr(StyleAttr::ColorPrimaryDark),
            color_accent: screen.resolve_attr(StyleAttr::ColorAccent),
            text_color_primary: screen.resolve_attr(StyleAttr::TextColorPrimary),
            text_color_secondary: screen.resolve_attr(StyleAttr::TextColorSecondary),
            text_color_primary_inverse: screen.resolve_attr(StyleAttr::TextColorPrimaryInverse),
            text_color_secondary_inverse: screen.resolve_attr(StyleAttr::TextColorSecondaryInverse),
            window_background: screen.resolve_attr(StyleAttr::WindowBackground),
        }
    }

    /// Get the default for a single attribute
    pub fn get(&self, attr: StyleAttr) -> Color {
        match attr {
            StyleAttr::ColorPrimary => self.color_primary,
            StyleAttr::ColorPrimaryDark => self.color_primary_dark,
            StyleAttr::ColorAccent => self.color_accent,
            StyleAttr::TextColorPrimary => self.text_color_primary,
            StyleAttr::TextColorSecondary => self.text_color_secondary,
            StyleAttr::TextColorPrimaryInverse => self.text_color_primary_inverse,
            StyleAttr::TextColorSecondaryInverse => self.text_color_secondary_inverse,
            StyleAttr::WindowBackground => self.window_background,
        }
    }
}
