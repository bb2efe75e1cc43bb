use tempfile::{tempdir, TempDir};
use tinct_core::Color;
use tinct_platform::{AppliedEffect, HeadlessScreen, Screen, StyleAttr};
use tinct_theme::{
    AutoSwitchMode, LifecyclePhase, ScreenBinder, ThemeError, ThemeStore, PREFS_FILE_NAME,
};

fn new_store() -> (ThemeStore, TempDir) {
    let dir = tempdir().unwrap();
    let store = ThemeStore::open(dir.path().join(PREFS_FILE_NAME)).unwrap();
    (store, dir)
}

fn resumed_binder(store: &ThemeStore) -> ScreenBinder<HeadlessScreen> {
    let mut binder = ScreenBinder::new(store);
    binder.attach(HeadlessScreen::new()).unwrap();
    binder.resume().unwrap();
    binder
}

#[test]
fn lifecycle_follows_the_three_state_machine() {
    let (store, _dir) = new_store();
    let mut binder = ScreenBinder::new(&store);
    assert_eq!(binder.phase(), LifecyclePhase::Unattached);

    // resume before attach fails fast
    assert!(matches!(binder.resume(), Err(ThemeError::NotAttached)));

    binder.attach(HeadlessScreen::new()).unwrap();
    assert_eq!(binder.phase(), LifecyclePhase::AttachedPaused);
    assert!(store.is_attached());

    // double attach is rejected
    assert!(matches!(
        binder.attach(HeadlessScreen::new()),
        Err(ThemeError::AlreadyAttached)
    ));

    binder.resume().unwrap();
    assert_eq!(binder.phase(), LifecyclePhase::AttachedResumed);

    binder.pause();
    assert_eq!(binder.phase(), LifecyclePhase::AttachedPaused);
    // pause is tolerant of repeats
    binder.pause();
    assert_eq!(binder.phase(), LifecyclePhase::AttachedPaused);

    binder.destroy();
    assert_eq!(binder.phase(), LifecyclePhase::Unattached);
    assert!(!store.is_attached());
    assert!(matches!(
        store.primary_color(),
        Err(ThemeError::NotAttached)
    ));
}

#[test]
fn attach_restores_a_saved_theme_resource() {
    let (store, _dir) = new_store();

    let mut binder = ScreenBinder::new(&store);
    binder.attach(HeadlessScreen::new()).unwrap();
    store.set_activity_theme(7);
    store.apply().unwrap();
    binder.destroy();

    // A fresh screen attaching to the same store gets the saved theme
    let mut binder = ScreenBinder::new(&store);
    binder.attach(HeadlessScreen::new()).unwrap();
    let screen = binder.screen().unwrap();
    assert_eq!(screen.lock().unwrap().theme_resource(), 7);
    // Restoring is not a recreation
    assert_eq!(screen.lock().unwrap().recreate_count(), 0);
}

#[test]
fn resume_applies_current_values_once_each() {
    let (store, _dir) = new_store();
    let binder = resumed_binder(&store);
    let screen = binder.screen().unwrap();

    let screen = screen.lock().unwrap();
    let nav_applies = screen
        .effects()
        .iter()
        .filter(|e| matches!(e, AppliedEffect::NavBarColor(_)))
        .count();
    let bg_applies = screen
        .effects()
        .iter()
        .filter(|e| matches!(e, AppliedEffect::WindowBackground(_)))
        .count();
    assert_eq!(nav_applies, 1);
    assert_eq!(bg_applies, 1);

    // Defaults flowed through: window background matches the screen style
    assert_eq!(
        screen.last_window_background().unwrap().to_argb(),
        screen.resolve_attr(StyleAttr::WindowBackground).to_argb()
    );
    // The default status-bar color (colorPrimaryDark) is dark, so Auto mode
    // keeps dark icons
    assert_eq!(screen.last_light_status_bar(), Some(false));
}

#[test]
fn pause_stops_side_effects_and_resume_reapplies_latest() {
    let (store, _dir) = new_store();
    let mut binder = resumed_binder(&store);
    let screen = binder.screen().unwrap();

    binder.pause();
    screen.lock().unwrap().clear_effects();

    let crimson = Color::from_hex(0xD20F39);
    store.set_nav_bar_color(crimson);
    store.apply().unwrap();
    assert!(screen.lock().unwrap().effects().is_empty());

    binder.resume().unwrap();
    let screen = screen.lock().unwrap();
    let nav_applies: Vec<Color> = screen
        .effects()
        .iter()
        .filter_map(|e| match e {
            AppliedEffect::NavBarColor(c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(nav_applies.len(), 1);
    assert_eq!(nav_applies[0].to_argb(), crimson.to_argb());
}

#[test]
fn activity_theme_change_recreates_the_screen_once() {
    let (store, _dir) = new_store();
    let binder = resumed_binder(&store);
    let screen = binder.screen().unwrap();

    store.set_activity_theme(42);
    store.apply().unwrap();
    {
        let screen = screen.lock().unwrap();
        assert_eq!(screen.recreate_count(), 1);
        assert_eq!(screen.theme_resource(), 42);
    }

    // Re-applying the same theme does not restart again
    store.set_activity_theme(42);
    store.apply().unwrap();
    assert_eq!(screen.lock().unwrap().recreate_count(), 1);

    // Zero means "no theme" and never restarts
    store.set_activity_theme(0);
    store.apply().unwrap();
    assert_eq!(screen.lock().unwrap().recreate_count(), 1);
}

#[test]
fn status_bar_policy_drives_light_icons() {
    let (store, _dir) = new_store();
    let binder = resumed_binder(&store);
    let screen = binder.screen().unwrap();

    // Off ignores the color entirely
    store.set_status_bar_color(Color::WHITE);
    store.set_light_status_bar_mode(AutoSwitchMode::Off);
    store.apply().unwrap();
    assert_eq!(screen.lock().unwrap().last_light_status_bar(), Some(false));

    // On ignores the color entirely
    store.set_status_bar_color(Color::BLACK);
    store.set_light_status_bar_mode(AutoSwitchMode::On);
    store.apply().unwrap();
    assert_eq!(screen.lock().unwrap().last_light_status_bar(), Some(true));

    // Auto follows the effective color's brightness
    store.set_light_status_bar_mode(AutoSwitchMode::Auto);
    store.apply().unwrap();
    assert_eq!(screen.lock().unwrap().last_light_status_bar(), Some(false));

    store.set_status_bar_color(Color::from_hex(0xFFF9C4));
    store.apply().unwrap();
    assert_eq!(screen.lock().unwrap().last_light_status_bar(), Some(true));
    assert_eq!(
        screen.lock().unwrap().last_status_bar_color().unwrap().to_argb(),
        Color::from_hex(0xFFF9C4).to_argb()
    );
}

#[test]
fn auto_derivations_flow_to_the_screen() {
    let (store, _dir) = new_store();
    let binder = resumed_binder(&store);
    let screen = binder.screen().unwrap();

    let primary = Color::from_hex(0x00695C);
    store.set_primary_color(primary).unwrap();
    store.set_status_bar_color_auto().unwrap();
    store.set_nav_bar_color_auto().unwrap();
    store.apply().unwrap();

    let screen = screen.lock().unwrap();
    assert_eq!(
        screen.last_status_bar_color().unwrap().to_argb(),
        primary.darken(tinct_core::DARKEN_FACTOR).to_argb()
    );
    // 0x00695C is dark, so the nav bar takes the primary itself
    assert_eq!(
        screen.last_nav_bar_color().unwrap().to_argb(),
        primary.to_argb()
    );
}
