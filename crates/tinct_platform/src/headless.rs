//! Deterministic headless screen for tests and diagnostics
//!
//! Records every effect the theme engine applies instead of touching a real
//! window, and serves style defaults from a configurable table.

use crate::error::Result;
use crate::screen::{Screen, StyleAttr};
use rustc_hash::FxHashMap;
use tinct_core::Color;

/// One side effect applied to a [`HeadlessScreen`], in application order
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AppliedEffect {
    ThemeResource(u32),
    Recreated,
    StatusBarColor(Color),
    LightStatusBar(bool),
    NavBarColor(Color),
    WindowBackground(Color),
}

/// In-process screen that records applied effects.
///
/// Ships with a plain light style; individual attributes can be overridden
/// with [`HeadlessScreen::set_attr`] before attaching.
pub struct HeadlessScreen {
    style: FxHashMap<StyleAttr, Color>,
    effects: Vec<AppliedEffect>,
    theme_resource: u32,
    recreate_count: u32,
}

impl HeadlessScreen {
    pub fn new() -> Self {
        let mut style = FxHashMap::default();
        style.insert(StyleAttr::ColorPrimary, Color::from_hex(0x3584E4));
        style.insert(StyleAttr::ColorPrimaryDark, Color::from_hex(0x1A63C4));
        style.insert(StyleAttr::ColorAccent, Color::from_hex(0x8839EF));
        style.insert(StyleAttr::TextColorPrimary, Color::from_hex(0x1A1A2E));
        style.insert(StyleAttr::TextColorSecondary, Color::from_hex(0x6C6F85));
        style.insert(StyleAttr::TextColorPrimaryInverse, Color::WHITE);
        style.insert(
            StyleAttr::TextColorSecondaryInverse,
            Color::from_hex(0xE6E9EF),
        );
        style.insert(StyleAttr::WindowBackground, Color::from_hex(0xFAFAFA));
        Self {
            style,
            effects: Vec::new(),
            theme_resource: 0,
            recreate_count: 0,
        }
    }

    /// Override a style attribute (takes effect on the next defaults capture)
    pub fn set_attr(&mut self, attr: StyleAttr, color: Color) {
        self.style.insert(attr, color);
    }

    /// Effects applied so far, in order
    pub fn effects(&self) -> &[AppliedEffect] {
        &self.effects
    }

    /// Clear the recorded effect log
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    /// The last installed theme resource id (0 = none)
    pub fn theme_resource(&self) -> u32 {
        self.theme_resource
    }

    /// How many times the screen has been recreated
    pub fn recreate_count(&self) -> u32 {
        self.recreate_count
    }

    /// Last applied value of a given effect kind, if any
    pub fn last_status_bar_color(&self) -> Option<Color> {
        self.effects.iter().rev().find_map(|e| match e {
            AppliedEffect::StatusBarColor(c) => Some(*c),
            _ => None,
        })
    }

    pub fn last_light_status_bar(&self) -> Option<bool> {
        self.effects.iter().rev().find_map(|e| match e {
            AppliedEffect::LightStatusBar(l) => Some(*l),
            _ => None,
        })
    }

    pub fn last_nav_bar_color(&self) -> Option<Color> {
        self.effects.iter().rev().find_map(|e| match e {
            AppliedEffect::NavBarColor(c) => Some(*c),
            _ => None,
        })
    }

    pub fn last_window_background(&self) -> Option<Color> {
        self.effects.iter().rev().find_map(|e| match e {
            AppliedEffect::WindowBackground(c) => Some(*c),
            _ => None,
        })
    }
}

impl Default for HeadlessScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for HeadlessScreen {
    fn resolve_attr(&self, attr: StyleAttr) -> Color {
        self.style.get(&attr).copied().unwrap_or_default()
    }

    fn set_theme_resource(&mut self, resource_id: u32) -> Result<()> {
        self.theme_resource = resource_id;
        self.effects.push(AppliedEffect::ThemeResource(resource_id));
        Ok(())
    }

    fn recreate(&mut self) -> Result<()> {
        self.recreate_count += 1;
        self.effects.push(AppliedEffect::Recreated);
        tracing::debug!(count = self.recreate_count, "headless screen recreated");
        Ok(())
    }

    fn set_status_bar_color(&mut self, color: Color) -> Result<()> {
        self.effects.push(AppliedEffect::StatusBarColor(color));
        Ok(())
    }

    fn set_light_status_bar(&mut self, light: bool) -> Result<()> {
        self.effects.push(AppliedEffect::LightStatusBar(light));
        Ok(())
    }

    fn set_nav_bar_color(&mut self, color: Color) -> Result<()> {
        self.effects.push(AppliedEffect::NavBarColor(color));
        Ok(())
    }

    fn set_window_background(&mut self, color: Color) -> Result<()> {
        self.effects.push(AppliedEffect::WindowBackground(color));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::StyleDefaults;

    #[test]
    fn test_effects_recorded_in_order() {
        let mut screen = HeadlessScreen::new();
        screen.set_status_bar_color(Color::BLACK).unwrap();
        screen.set_light_status_bar(true).unwrap();
        screen.recreate().unwrap();

        assert_eq!(
            screen.effects(),
            &[
                AppliedEffect::StatusBarColor(Color::BLACK),
                AppliedEffect::LightStatusBar(true),
                AppliedEffect::Recreated,
            ]
        );
        assert_eq!(screen.recreate_count(), 1);
    }

    #[test]
    fn test_attr_override_flows_into_defaults() {
        let mut screen = HeadlessScreen::new();
        let teal = Color::from_hex(0x009688);
        screen.set_attr(StyleAttr::ColorPrimary, teal);

        let defaults = StyleDefaults::capture(&screen);
        assert_eq!(defaults.color_primary, teal);
        assert_eq!(defaults.get(StyleAttr::ColorPrimary), teal);
    }

    #[test]
    fn test_last_effect_helpers() {
        let mut screen = HeadlessScreen::new();
        assert_eq!(screen.last_nav_bar_color(), None);

        screen.set_nav_bar_color(Color::BLACK).unwrap();
        screen.set_nav_bar_color(Color::WHITE).unwrap();
        assert_eq!(screen.last_nav_bar_color(), Some(Color::WHITE));
    }
}
